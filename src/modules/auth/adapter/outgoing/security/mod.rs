pub mod bcrypt_hasher;
pub mod random_token_issuer;

pub use bcrypt_hasher::BcryptHasher;
pub use random_token_issuer::RandomTokenIssuer;

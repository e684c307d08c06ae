pub mod account_repository;
pub mod password_hasher;
pub mod token_issuer;

pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_issuer::{TokenIssueError, TokenIssuer};

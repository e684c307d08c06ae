pub mod create_account;
pub mod verify_account_email;

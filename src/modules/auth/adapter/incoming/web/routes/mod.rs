mod register_account;
mod verify_email;

pub use register_account::{
    register_account_handler, RegisterAccountForm, RegisterAccountResponse, RegisteredAccount,
};
pub use verify_email::{verify_email_handler, VerifyEmailResponse};

// utoipa's `paths(...)` resolves the generated `__path_*` types next to each handler.
pub use register_account::__path_register_account_handler;
pub use verify_email::__path_verify_email_handler;

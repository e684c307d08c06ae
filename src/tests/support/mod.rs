pub mod app_state_builder;
pub mod in_memory_account_repository;
pub mod multipart;
pub mod stubs;

pub mod config;
pub mod engine;
pub mod errors;
pub mod init;
pub mod instruction;
pub mod router;
pub mod templates;
pub mod ui;

pub mod app_module;
pub mod app_router;
pub mod config;
pub mod error;
pub mod generation;
pub mod health;
pub mod history;
pub mod prompts;

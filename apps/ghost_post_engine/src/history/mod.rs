pub mod file_history_store;
pub mod history_controller;
pub mod history_service;
pub mod history_store;
pub mod mongo_history_store;

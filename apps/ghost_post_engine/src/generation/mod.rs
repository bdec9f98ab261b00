pub mod generation_controller;
pub mod generation_service;
pub mod generation_types;
pub mod response_normalizer;

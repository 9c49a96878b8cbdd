pub mod config;
pub mod errors;
pub mod templates;
pub mod wish_utils;

pub mod commands;
pub mod config;
pub mod database;
pub mod errors;
pub mod schema;
pub mod services;
pub mod storage;

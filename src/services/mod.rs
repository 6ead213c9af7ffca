pub mod duplication_service;

pub use duplication_service::*;

//! Orders

pub mod address;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;

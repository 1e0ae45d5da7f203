//! Inquiries

pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

pub use errors::InquiriesServiceError;
pub use service::*;

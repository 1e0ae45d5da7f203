//! Carts

pub mod models;
pub mod storage;

pub use models::{Cart, CartLine, VariantKey};
pub use storage::{CartSession, CartStorage, CartStorageError, JsonCartStorage};

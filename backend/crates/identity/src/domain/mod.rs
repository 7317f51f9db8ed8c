//! Domain Layer
//!
//! Contains the Account entity, value objects, and the store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::account::Account;
pub use repository::AccountStore;

//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod export;
pub mod nlp;
pub mod reports;
pub mod transactions;
pub mod wallets;

// Re-export all handlers for use in router
pub use auth::*;
pub use export::*;
pub use nlp::*;
pub use reports::*;
pub use transactions::*;
pub use wallets::*;

//! Credential helpers: redacted token values and expiry checks against the key-value store.

pub mod expiry;
pub mod token;

pub use expiry::*;
pub use token::*;

//! Operations module
//!
//! Gathers the checkout inputs and coordinates the checkout pipeline

pub mod checkout;
pub mod request;

pub use checkout::*;
pub use request::*;

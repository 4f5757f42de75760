//! String utilities.
//!
//! JSON string escaping per RFC 8259 §7.

mod escape;
mod quote;

pub use escape::{escape, escape_into};
pub use quote::quote;

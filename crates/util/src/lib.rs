//! modelbind-util - text helpers shared by the modelbind codecs.
//!
//! Everything here is allocation-light and infallible: escaping JSON string
//! content and rendering numbers either as JSON number text or as the literal
//! form used in diagnostics.

pub mod number;
pub mod strings;

pub use number::{format_f32, format_f64, literal_f64};
pub use strings::{escape, escape_into, quote};

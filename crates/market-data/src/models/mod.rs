//! Provider-shaped data models.

mod bar;
mod quote;

pub use bar::RawBar;
pub use quote::RawQuote;

//! Utility modules supporting result presentation.
//!
//! - [`Renderer`]: table rendering of result sets, facets and database statistics
//! - [`truncate_with_ellipsis`]: width-aware truncation for terminal cells
//! - [`strip_markup`]: remove provider highlight tags from display text

mod display;

pub use display::{strip_markup, truncate_with_ellipsis, Renderer};

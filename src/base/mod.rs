//! Foundation types for the Datastar parser.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`TextEdit`] - Byte-range edit descriptors for incremental reparsing
//!
//! This module has NO dependencies on other modules of the crate.

mod edit;
mod line_index;

pub use edit::TextEdit;
pub use line_index::{LineCol, LineIndex};
pub use text_size::{TextRange, TextSize};

// Re-export text-size for convenience
pub use text_size;

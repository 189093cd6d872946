//! Utility functions for common operations.
//!
//! - **Text processing**: terminal-safe text and width-aware truncation
//! - **URL validation**: checks before opening links in the system browser
//!
//! # Examples
//!
//! ```
//! use astroslide::util::{display_width, strip_control_chars, truncate_to_width};
//!
//! let clean = strip_control_chars("M42\x1b[31m");
//! assert_eq!(clean, "M42");
//! assert_eq!(display_width(&clean), 3);
//! assert_eq!(truncate_to_width("Horsehead Nebula", 10), "Horsehe...");
//! ```

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

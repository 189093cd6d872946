//! Slide catalog: record types and the startup loader.
//!
//! The catalog is a JSON array of slide records, read once per session from
//! either a local file or an http(s) URL. It is never validated beyond being
//! a JSON array:
//!
//! - An element that is not an object (`null`, a number, a string) is kept
//!   as a hole. It still counts toward the slide count, and navigating onto
//!   it leaves the current slide on screen.
//! - `imageUrl`, `title`, `description` and `wikiPageTitle` become `""` when
//!   missing or `null`. Numbers and booleans are kept as their JSON text.
//! - Acquisition metadata is read loosely. Strings are kept as-is and
//!   non-zero numbers as their JSON text. `true` becomes `"true"`. `0`,
//!   `false`, `null`, arrays and objects count as absent and display as
//!   `"N/A"`.
//! - An `acquisition` value that is not an object leaves every field absent.

mod loader;
mod types;

pub use loader::{load_catalog, CatalogError, CatalogSource, DEFAULT_CATALOG_SOURCE};
pub use types::{Acquisition, Catalog, MetaField, Slide, PLACEHOLDER};

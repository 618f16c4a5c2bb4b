//! Project catalog and document loading.
//!
//! A [`Loader`] turns a project id into rendered HTML: it looks the id up in
//! its [`Catalog`], fetches `base_path + id + extension` from storage (once),
//! strips the front matter, renders the body and caches the result (once).

mod catalog;
pub mod error;
mod loader;
mod path;
pub mod scan;

pub use crate::catalog::{Catalog, CatalogEntry};
pub use crate::loader::{LoadedProject, Loader, RefreshOutcome};
pub use crate::path::document_path;
pub use crate::scan::{ScanEvent, scan};

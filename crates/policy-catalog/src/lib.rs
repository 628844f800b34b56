#![deny(unsafe_code)]

//! Loading of the master-data catalogs the mapping engine matches against.
//!
//! Each catalog lives in its own file inside one directory
//! (`combustibles.json`, `tarifas.csv`, ...). See [`load_catalogs`].

pub mod error;
pub mod loaders;
pub mod paths;

pub use crate::error::{CatalogError, Result};
pub use crate::loaders::{CatalogSource, catalog_file_stem, load_catalog_file, load_catalogs};
pub use crate::paths::{CATALOG_ENV_VAR, catalog_root};

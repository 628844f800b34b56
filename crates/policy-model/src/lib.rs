#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod extracted;
pub mod form;

pub use catalog::{Catalog, Catalogs, MasterDataItem};
pub use error::{ModelError, Result};
pub use extracted::ExtractedData;
pub use form::{FormData, FormField};

//! JSON and CSV catalog loaders.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use policy_model::{Catalog, Catalogs, FormField, MasterDataItem};

use crate::error::{CatalogError, Result};

/// Wrapper keys under which the backend API returns item lists.
const WRAPPER_KEYS: &[&str] = &["items", "data"];

/// File name (without extension) of the catalog backing a form field.
pub fn catalog_file_stem(field: FormField) -> &'static str {
    match field {
        FormField::Combustible => "combustibles",
        FormField::Destino => "destinos",
        FormField::Departamento => "departamentos",
        FormField::Calidad => "calidades",
        FormField::Categoria => "categorias",
        FormField::Tarifa => "tarifas",
    }
}

/// Which file a catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Json(PathBuf),
    Csv(PathBuf),
    /// Neither file exists; the catalog is empty.
    Missing,
}

impl CatalogSource {
    /// Locates the catalog file for `field` in `dir`. JSON wins over CSV.
    pub fn locate(dir: &Path, field: FormField) -> Self {
        let stem = catalog_file_stem(field);
        let json = dir.join(format!("{stem}.json"));
        if json.is_file() {
            return Self::Json(json);
        }
        let csv = dir.join(format!("{stem}.csv"));
        if csv.is_file() {
            return Self::Csv(csv);
        }
        Self::Missing
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Json(path) | Self::Csv(path) => Some(path),
            Self::Missing => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Csv(_) => "csv",
            Self::Missing => "missing",
        }
    }
}

/// Loads all six catalogs from `dir`.
///
/// A missing catalog file yields an empty catalog; a malformed one is an
/// error.
pub fn load_catalogs(dir: &Path) -> Result<Catalogs> {
    if !dir.is_dir() {
        return Err(CatalogError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut catalogs = Catalogs::default();
    for field in FormField::ALL {
        let source = CatalogSource::locate(dir, field);
        let catalog = match &source {
            CatalogSource::Missing => {
                warn!(
                    catalog = catalog_file_stem(field),
                    dir = %dir.display(),
                    "catalog file not found, using empty catalog"
                );
                Catalog::default()
            }
            CatalogSource::Json(path) | CatalogSource::Csv(path) => load_catalog_file(path)?,
        };
        debug!(
            catalog = catalog_file_stem(field),
            source = source.kind(),
            items = catalog.len(),
            "catalog loaded"
        );
        *catalogs.catalog_mut(field) = catalog;
    }
    Ok(catalogs)
}

/// Loads one catalog file, choosing the format from its extension.
/// Anything other than `.csv` is read as JSON.
pub fn load_catalog_file(path: &Path) -> Result<Catalog> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_csv_catalog(path)
    } else {
        load_json_catalog(path)
    }
}

fn load_json_catalog(path: &Path) -> Result<Catalog> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json_error = |source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    };
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(json_error)?;
    let items = item_list(value).map_err(json_error)?;
    let items: Vec<MasterDataItem> = serde_json::from_value(items).map_err(json_error)?;
    let total = items.len();
    let catalog: Catalog = items
        .into_iter()
        .filter(|item| !item.id.trim().is_empty())
        .collect();
    if catalog.len() < total {
        debug!(
            path = %path.display(),
            skipped = total - catalog.len(),
            "skipping JSON items without id"
        );
    }
    Ok(catalog)
}

/// Unwraps `{ "items": [...] }` / `{ "data": [...] }` envelopes.
fn item_list(value: Value) -> serde_json::Result<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => WRAPPER_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(list @ Value::Array(_)) => Some(list),
                _ => None,
            })
            .ok_or_else(|| {
                serde::de::Error::custom("expected an item array or an object with `items`/`data`")
            }),
        _ => Err(serde::de::Error::custom("expected an item array")),
    }
}

fn load_csv_catalog(path: &Path) -> Result<Catalog> {
    let rows = read_csv_rows(path)?;
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        let id = required(&row, "id", path)?;
        if id.is_empty() {
            debug!(path = %path.display(), "skipping CSV row without id");
            continue;
        }
        let nombre = required(&row, "nombre", path)?;
        let item = MasterDataItem::new(id, nombre);
        items.push(match row.get("codigo").filter(|code| !code.is_empty()) {
            Some(code) => item.with_codigo(code.clone()),
            None => item,
        });
    }
    Ok(Catalog::new(items))
}

fn required<'r>(
    row: &'r BTreeMap<String, String>,
    column: &'static str,
    path: &Path,
) -> Result<&'r str> {
    row.get(column)
        .map(String::as_str)
        .ok_or_else(|| CatalogError::MissingColumn {
            column,
            path: path.to_path_buf(),
        })
}

fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let csv_error = |source| CatalogError::CsvRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_lowercase())
        .collect();
    for column in ["id", "nombre"] {
        if !headers.iter().any(|header| header == column) {
            return Err(CatalogError::MissingColumn {
                column,
                path: path.to_path_buf(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value.trim().to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

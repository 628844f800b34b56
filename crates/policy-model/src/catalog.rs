//! Master-data catalogs.
//!
//! A catalog is an ordered snapshot of the valid options for one form field
//! (fuel types, destinations, tariffs, ...). Order matters: it breaks ties
//! between equally good matches and picks the last-resort tariff.

use serde::{Deserialize, Deserializer, Serialize};

use crate::form::FormField;

/// One row of an enumerated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterDataItem {
    /// Catalog identifier. Accepts JSON strings or integers on input.
    #[serde(deserialize_with = "de_identifier")]
    pub id: String,
    /// Display name.
    pub nombre: String,
    /// Optional short code (e.g. `GAS`, `DIS`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
}

impl MasterDataItem {
    pub fn new(id: impl Into<String>, nombre: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nombre: nombre.into(),
            codigo: None,
        }
    }

    #[must_use]
    pub fn with_codigo(mut self, codigo: impl Into<String>) -> Self {
        self.codigo = Some(codigo.into());
        self
    }
}

fn de_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(value) => value,
        RawId::Int(value) => value.to_string(),
        RawId::Unsigned(value) => value.to_string(),
    })
}

/// Ordered list of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<MasterDataItem>,
}

impl Catalog {
    pub fn new(items: Vec<MasterDataItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MasterDataItem> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&MasterDataItem> {
        self.items.first()
    }

    /// Finds an item by identifier.
    pub fn get(&self, id: &str) -> Option<&MasterDataItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl FromIterator<MasterDataItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = MasterDataItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MasterDataItem;
    type IntoIter = std::slice::Iter<'a, MasterDataItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The six catalogs consulted when filling a policy form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalogs {
    pub combustibles: Catalog,
    pub destinos: Catalog,
    pub departamentos: Catalog,
    pub calidades: Catalog,
    pub categorias: Catalog,
    pub tarifas: Catalog,
}

impl Catalogs {
    /// Returns the catalog backing a form field.
    pub fn catalog(&self, field: FormField) -> &Catalog {
        match field {
            FormField::Combustible => &self.combustibles,
            FormField::Destino => &self.destinos,
            FormField::Departamento => &self.departamentos,
            FormField::Calidad => &self.calidades,
            FormField::Categoria => &self.categorias,
            FormField::Tarifa => &self.tarifas,
        }
    }

    pub fn catalog_mut(&mut self, field: FormField) -> &mut Catalog {
        match field {
            FormField::Combustible => &mut self.combustibles,
            FormField::Destino => &mut self.destinos,
            FormField::Departamento => &mut self.departamentos,
            FormField::Calidad => &mut self.calidades,
            FormField::Categoria => &mut self.categorias,
            FormField::Tarifa => &mut self.tarifas,
        }
    }
}

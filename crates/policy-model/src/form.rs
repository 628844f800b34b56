use serde::{Deserialize, Serialize};
use std::fmt;

/// The six catalog-backed fields of the policy form.
///
/// Variants are declared in processing order; the tariff field comes last
/// because it may derive its value from the resolved category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Combustible,
    Destino,
    Departamento,
    Calidad,
    Categoria,
    Tarifa,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Combustible,
        FormField::Destino,
        FormField::Departamento,
        FormField::Calidad,
        FormField::Categoria,
        FormField::Tarifa,
    ];

    /// Wire name of the field in the form payload.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Combustible => "combustibleId",
            FormField::Destino => "destinoId",
            FormField::Departamento => "departamentoId",
            FormField::Calidad => "calidadId",
            FormField::Categoria => "categoriaId",
            FormField::Tarifa => "tarifaId",
        }
    }

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Combustible => "Combustible",
            FormField::Destino => "Destino",
            FormField::Departamento => "Departamento",
            FormField::Calidad => "Calidad",
            FormField::Categoria => "Categoría",
            FormField::Tarifa => "Tarifa",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Form state: one catalog identifier per field, empty string means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub combustible_id: String,
    pub destino_id: String,
    pub departamento_id: String,
    pub calidad_id: String,
    pub categoria_id: String,
    pub tarifa_id: String,
}

impl FormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Combustible => &self.combustible_id,
            FormField::Destino => &self.destino_id,
            FormField::Departamento => &self.departamento_id,
            FormField::Calidad => &self.calidad_id,
            FormField::Categoria => &self.categoria_id,
            FormField::Tarifa => &self.tarifa_id,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Combustible => &mut self.combustible_id,
            FormField::Destino => &mut self.destino_id,
            FormField::Departamento => &mut self.departamento_id,
            FormField::Calidad => &mut self.calidad_id,
            FormField::Categoria => &mut self.categoria_id,
            FormField::Tarifa => &mut self.tarifa_id,
        };
        *slot = value.into();
    }

    /// Any non-empty value counts as a user choice, whitespace included.
    pub fn is_set(&self, field: FormField) -> bool {
        !self.get(field).is_empty()
    }

    pub fn unset_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| !self.is_set(*field))
            .collect()
    }
}

//! Static lookup data: scanner source keys, label echoes and keyword tables.
//!
//! Source keys must match the scanner output spelling exactly, legacy
//! spellings included. Keyword tables map a token found in the cleaned text
//! to catalog-name substrings tried in order.

use policy_model::FormField;

/// Token → ordered catalog substrings.
pub type KeywordTable = &'static [(&'static str, &'static [&'static str])];

/// How one catalog-backed field is read from the scanner output.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: FormField,
    /// Candidate source keys, probed in order.
    pub source_keys: &'static [&'static str],
    /// Label echoes stripped from the raw value, longest first.
    pub labels: &'static [&'static str],
    pub keywords: KeywordTable,
    /// Whether keyword candidates may also match the item code.
    pub match_codes: bool,
}

pub const FUEL_KEYS: &[&str] = &[
    "combustible",
    "vehiculo.combustible",
    "tipoCombustible",
    "vehiculo.tipoCombustible",
    "tipo_combustible",
    "combustibleVehiculo",
    "fuel",
];

pub const DESTINATION_KEYS: &[&str] = &[
    "destino",
    "vehiculo.destino",
    "uso",
    "vehiculo.uso",
    "destinoVehiculo",
    "destino_vehiculo",
    "usoVehiculo",
];

pub const DEPARTMENT_KEYS: &[&str] = &[
    "departamento",
    "asegurado.departamento",
    "cliente.departamento",
    "domicilio.departamento",
    "departamentoCirculacion",
    "depto",
    "dpto",
];

pub const QUALITY_KEYS: &[&str] = &[
    "calidad",
    "asegurado.calidad",
    "calidadAsegurado",
    "calidad_asegurado",
    "calidadCliente",
];

pub const CATEGORY_KEYS: &[&str] = &[
    "categoria",
    "vehiculo.categoria",
    "categoriaVehiculo",
    "tipoVehiculo",
    "vehiculo.tipo",
    "tipo_vehiculo",
];

pub const COVERAGE_KEYS: &[&str] = &[
    "modalidad",
    "poliza.modalidad",
    "cobertura",
    "poliza.cobertura",
    "tipoCobertura",
    "modalidadCobertura",
    "plan",
    "tarifa",
];

pub const COVERAGE_LABELS: &[&str] = &[
    "MODALIDAD DE COBERTURA",
    "MODALIDAD",
    "TIPO DE COBERTURA",
    "COBERTURA",
    "PLAN",
];

pub const FUEL_KEYWORDS: KeywordTable = &[
    ("HIBRID", &["HIBRIDO", "HYB"]),
    ("ELECTRIC", &["ELECTRICO", "ELE"]),
    ("GASOIL", &["GASOIL", "DIESEL", "DIS"]),
    ("DIESEL", &["DIESEL", "GASOIL", "DIS"]),
    ("GNC", &["GNC", "GAS NATURAL"]),
    ("NAFTA", &["NAFTA", "GASOLINA", "GAS"]),
    ("GASOLINA", &["GASOLINA", "NAFTA", "GAS"]),
];

pub const DESTINATION_KEYWORDS: KeywordTable = &[
    ("PARTICULAR", &["PARTICULAR", "PRIVADO", "PERSONAL"]),
    ("PRIVADO", &["PARTICULAR", "PRIVADO"]),
    ("PERSONAL", &["PARTICULAR", "PERSONAL"]),
    ("TAXI", &["TAXI", "REMISE", "ALQUILER"]),
    ("REMIS", &["REMISE", "TAXI", "ALQUILER"]),
    ("APLICACION", &["APLICACION", "PLATAFORMA", "REMISE"]),
    ("UBER", &["APLICACION", "PLATAFORMA", "REMISE"]),
    ("ALQUILER", &["ALQUILER", "RENT A CAR"]),
    ("CARGA", &["CARGA", "COMERCIAL"]),
    ("COMERCIAL", &["COMERCIAL", "TRABAJO", "CARGA"]),
    ("TRABAJO", &["TRABAJO", "COMERCIAL"]),
    ("OFICIAL", &["OFICIAL", "ESTATAL"]),
];

pub const CATEGORY_KEYWORDS: KeywordTable = &[
    ("CAMIONETA", &["CAMIONETA", "PICK", "UTILITARIO"]),
    ("PICK", &["PICK", "CAMIONETA"]),
    ("FURGON", &["FURGON", "UTILITARIO", "CAMIONETA"]),
    ("UTILITARIO", &["UTILITARIO", "FURGON", "CAMIONETA"]),
    ("CAMION", &["CAMION", "CARGA"]),
    ("OMNIBUS", &["OMNIBUS", "BUS"]),
    ("MICRO", &["OMNIBUS", "MICRO"]),
    ("MOTO", &["MOTO", "CICLOMOTOR"]),
    ("CICLOMOTOR", &["CICLOMOTOR", "MOTO"]),
    ("SUV", &["SUV", "TODO TERRENO", "CAMIONETA"]),
    ("JEEP", &["TODO TERRENO", "SUV", "JEEP"]),
    ("AUTOMOVIL", &["AUTOMOVIL", "AUTO", "SEDAN"]),
    ("SEDAN", &["AUTOMOVIL", "AUTO", "SEDAN"]),
    ("AUTO", &["AUTOMOVIL", "AUTO"]),
    ("REMOLQUE", &["REMOLQUE", "TRAILER"]),
];

/// Name fragments of a tariff that works as a general-purpose default.
pub const DEFAULT_TARIFF_NAMES: &[&str] = &["general", "estandar", "normal"];

/// Rules in processing order. The tariff has no rule: it is resolved from
/// the coverage text instead.
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: FormField::Combustible,
        source_keys: FUEL_KEYS,
        labels: &["TIPO DE COMBUSTIBLE", "TIPO COMBUSTIBLE", "COMBUSTIBLE"],
        keywords: FUEL_KEYWORDS,
        match_codes: true,
    },
    FieldRule {
        field: FormField::Destino,
        source_keys: DESTINATION_KEYS,
        labels: &["DESTINO DEL VEHICULO", "USO DEL VEHICULO", "DESTINO", "USO"],
        keywords: DESTINATION_KEYWORDS,
        match_codes: false,
    },
    FieldRule {
        field: FormField::Departamento,
        source_keys: DEPARTMENT_KEYS,
        labels: &["DEPARTAMENTO", "DEPTO", "DPTO"],
        keywords: &[],
        match_codes: false,
    },
    FieldRule {
        field: FormField::Calidad,
        source_keys: QUALITY_KEYS,
        labels: &["CALIDAD DEL ASEGURADO", "CALIDAD"],
        keywords: &[],
        match_codes: false,
    },
    FieldRule {
        field: FormField::Categoria,
        source_keys: CATEGORY_KEYS,
        labels: &[
            "CATEGORIA DEL VEHICULO",
            "TIPO DE VEHICULO",
            "TIPO VEHICULO",
            "CATEGORIA",
        ],
        keywords: CATEGORY_KEYWORDS,
        match_codes: false,
    },
];

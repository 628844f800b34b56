//! Mapping engine implementation.

use policy_model::{Catalog, Catalogs, ExtractedData, FormData, FormField, MasterDataItem};
use serde::Serialize;
use tracing::{debug, debug_span, info, trace};

use crate::coverage::CoverageClass;
use crate::patterns::{
    COVERAGE_KEYS, COVERAGE_LABELS, DEFAULT_TARIFF_NAMES, FIELD_RULES, FieldRule, KeywordTable,
};
use crate::score::find_best_match;
use crate::utils::{clean_value, contains_folded, fold_upper};

/// Placeholder logged instead of scanner text unless data logging is enabled.
const REDACTED_VALUE: &str = "[REDACTED]";

/// Minimum similarity a catalog item needs to be accepted for each field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchThresholds {
    pub fuel: f64,
    pub destination: f64,
    pub department: f64,
    pub quality: f64,
    pub category: f64,
    /// Coverage text against tariff names.
    pub tariff: f64,
    /// Resolved category name against tariff names.
    pub tariff_from_category: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            fuel: 0.6,
            destination: 0.5,
            department: 0.8,
            quality: 0.8,
            category: 0.6,
            tariff: 0.6,
            tariff_from_category: 0.7,
        }
    }
}

impl MatchThresholds {
    /// Thresholds that only accept close matches.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            fuel: 0.75,
            destination: 0.65,
            department: 0.9,
            quality: 0.9,
            category: 0.75,
            tariff: 0.75,
            tariff_from_category: 0.85,
        }
    }

    /// Thresholds for exploratory runs over noisy scans.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            fuel: 0.5,
            destination: 0.4,
            department: 0.7,
            quality: 0.7,
            category: 0.5,
            tariff: 0.5,
            tariff_from_category: 0.6,
        }
    }

    /// Similarity threshold for a field. For the tariff this is the
    /// coverage-text threshold.
    pub fn for_field(&self, field: FormField) -> f64 {
        match field {
            FormField::Combustible => self.fuel,
            FormField::Destino => self.destination,
            FormField::Departamento => self.department,
            FormField::Calidad => self.quality,
            FormField::Categoria => self.category,
            FormField::Tarifa => self.tariff,
        }
    }
}

/// How a field value was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Domain keyword table hit.
    Keyword { token: &'static str },
    /// Generic similarity against the catalog.
    Similarity,
    /// Coverage class recognized in the tariff text.
    Coverage { class: CoverageClass },
    /// Tariff derived from the resolved category name.
    CategoryDerived,
    /// Tariff named like a general-purpose default.
    DefaultName,
    /// First tariff in catalog order.
    FirstEntry,
}

impl MatchStrategy {
    pub fn describe(&self) -> String {
        match self {
            Self::Keyword { token } => format!("keyword {token}"),
            Self::Similarity => "similarity".to_string(),
            Self::Coverage { class } => format!("coverage {class}"),
            Self::CategoryDerived => "from category".to_string(),
            Self::DefaultName => "default tariff".to_string(),
            Self::FirstEntry => "first tariff".to_string(),
        }
    }
}

/// A value written into a previously empty field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAssignment {
    pub field: FormField,
    pub id: String,
    pub nombre: String,
    pub strategy: MatchStrategy,
    /// Similarity score, for strategies that compute one.
    pub score: Option<f64>,
    /// Scanner key the text was read from.
    pub source_key: Option<&'static str>,
}

impl FieldAssignment {
    fn new(
        field: FormField,
        item: &MasterDataItem,
        strategy: MatchStrategy,
        score: Option<f64>,
        source_key: Option<&'static str>,
    ) -> Self {
        Self {
            field,
            id: item.id.clone(),
            nombre: item.nombre.clone(),
            strategy,
            score,
            source_key,
        }
    }
}

/// Result of one auto-fill pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingOutcome {
    /// Updated form. Fields that were already set are untouched.
    pub form: FormData,
    /// Fields filled by this pass, in processing order.
    pub assignments: Vec<FieldAssignment>,
}

impl MappingOutcome {
    pub fn changed_fields(&self) -> Vec<FormField> {
        self.assignments.iter().map(|a| a.field).collect()
    }

    pub fn is_unchanged(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignment(&self, field: FormField) -> Option<&FieldAssignment> {
        self.assignments.iter().find(|a| a.field == field)
    }

    /// User-facing message listing the auto-filled fields, or `None` when
    /// the pass changed nothing.
    pub fn notification(&self) -> Option<String> {
        let labels: Vec<&str> = self.assignments.iter().map(|a| a.field.label()).collect();
        match labels.len() {
            0 => None,
            1 => Some(format!("Se completó automáticamente 1 campo: {}", labels[0])),
            n => Some(format!(
                "Se completaron automáticamente {n} campos: {}",
                labels.join(", ")
            )),
        }
    }
}

/// Fills empty policy form fields from scanned document text.
///
/// The engine is stateless between calls: the same inputs always produce
/// the same outcome, and feeding an outcome's form back in changes nothing.
///
/// # Example
///
/// ```
/// use policy_map::{MappingEngine, MatchThresholds};
/// use policy_model::{Catalog, Catalogs, ExtractedData, FormData, MasterDataItem};
///
/// let catalogs = Catalogs {
///     combustibles: Catalog::new(vec![MasterDataItem::new("2", "Nafta").with_codigo("GAS")]),
///     tarifas: Catalog::new(vec![MasterDataItem::new("1", "Tarifa General")]),
///     ..Catalogs::default()
/// };
/// let extracted: ExtractedData = [("combustible", "NAFTA")].into_iter().collect();
///
/// let engine = MappingEngine::new(MatchThresholds::default());
/// let outcome = engine.map_fields(&extracted, &FormData::default(), &catalogs);
/// assert_eq!(outcome.form.combustible_id, "2");
/// assert_eq!(outcome.form.tarifa_id, "1");
/// assert_eq!(
///     outcome.notification().as_deref(),
///     Some("Se completaron automáticamente 2 campos: Combustible, Tarifa")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingEngine {
    thresholds: MatchThresholds,
    log_data: bool,
}

impl MappingEngine {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self {
            thresholds,
            log_data: false,
        }
    }

    /// Allow raw scanner text in trace logs.
    #[must_use]
    pub fn with_data_logging(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }

    /// Runs one auto-fill pass over every empty field.
    pub fn map_fields(
        &self,
        extracted: &ExtractedData,
        current: &FormData,
        catalogs: &Catalogs,
    ) -> MappingOutcome {
        let span = debug_span!("map_fields", extracted_keys = extracted.len());
        let _guard = span.enter();

        let mut form = current.clone();
        let mut assignments = Vec::new();

        for rule in FIELD_RULES {
            if form.is_set(rule.field) {
                debug!(field = %rule.field, "field already set");
                continue;
            }
            if let Some(assignment) =
                self.resolve_field(rule, extracted, catalogs.catalog(rule.field))
            {
                form.set(rule.field, assignment.id.clone());
                assignments.push(assignment);
            }
        }

        if form.is_set(FormField::Tarifa) {
            debug!(field = %FormField::Tarifa, "field already set");
        } else if let Some(assignment) = self.resolve_tariff(extracted, &form, catalogs) {
            form.set(FormField::Tarifa, assignment.id.clone());
            assignments.push(assignment);
        }

        info!(
            filled = assignments.len(),
            unset = form.unset_fields().len(),
            "auto-fill pass finished"
        );
        MappingOutcome { form, assignments }
    }

    fn resolve_field(
        &self,
        rule: &FieldRule,
        extracted: &ExtractedData,
        catalog: &Catalog,
    ) -> Option<FieldAssignment> {
        let Some((key, raw)) = extracted.first_text(rule.source_keys) else {
            debug!(field = %rule.field, "no scanner value");
            return None;
        };
        trace!(field = %rule.field, key, value = self.loggable(&raw), "scanner value");

        let text = clean_value(&raw, rule.labels);
        if text.is_empty() {
            debug!(field = %rule.field, key, "scanner value empty after cleaning");
            return None;
        }

        if let Some((token, item)) = keyword_match(&text, rule.keywords, catalog, rule.match_codes)
        {
            debug!(field = %rule.field, key, token, id = %item.id, "keyword match");
            return Some(FieldAssignment::new(
                rule.field,
                item,
                MatchStrategy::Keyword { token },
                None,
                Some(key),
            ));
        }

        let threshold = self.thresholds.for_field(rule.field);
        match find_best_match(&text, catalog, threshold) {
            Some(found) => {
                debug!(
                    field = %rule.field,
                    key,
                    id = %found.item.id,
                    score = found.score,
                    "similarity match"
                );
                Some(FieldAssignment::new(
                    rule.field,
                    found.item,
                    MatchStrategy::Similarity,
                    Some(found.score),
                    Some(key),
                ))
            }
            None => {
                debug!(field = %rule.field, key, threshold, "no catalog item cleared threshold");
                None
            }
        }
    }

    /// Resolves the tariff. Whenever the tariff catalog is non-empty this
    /// produces a value: the last fallbacks are a default-named tariff and
    /// then the first catalog entry.
    fn resolve_tariff(
        &self,
        extracted: &ExtractedData,
        form: &FormData,
        catalogs: &Catalogs,
    ) -> Option<FieldAssignment> {
        let field = FormField::Tarifa;
        let catalog = &catalogs.tarifas;
        if catalog.is_empty() {
            debug!(field = %field, "tariff catalog empty");
            return None;
        }

        if let Some((key, raw)) = extracted.first_text(COVERAGE_KEYS) {
            trace!(field = %field, key, value = self.loggable(&raw), "scanner value");
            let text = clean_value(&raw, COVERAGE_LABELS);
            if let Some(class) = CoverageClass::classify(&text) {
                if let Some(item) = first_candidate(catalog, class.tariff_candidates(), false) {
                    debug!(field = %field, key, %class, id = %item.id, "coverage match");
                    return Some(FieldAssignment::new(
                        field,
                        item,
                        MatchStrategy::Coverage { class },
                        None,
                        Some(key),
                    ));
                }
                debug!(field = %field, %class, "no tariff named for coverage class");
            }
            if let Some(found) = find_best_match(&raw, catalog, self.thresholds.tariff) {
                debug!(
                    field = %field,
                    key,
                    id = %found.item.id,
                    score = found.score,
                    "similarity match"
                );
                return Some(FieldAssignment::new(
                    field,
                    found.item,
                    MatchStrategy::Similarity,
                    Some(found.score),
                    Some(key),
                ));
            }
        }

        if let Some(category) = catalogs.categorias.get(form.get(FormField::Categoria)) {
            if let Some(found) =
                find_best_match(&category.nombre, catalog, self.thresholds.tariff_from_category)
            {
                debug!(
                    field = %field,
                    category = %category.nombre,
                    id = %found.item.id,
                    score = found.score,
                    "tariff derived from category"
                );
                return Some(FieldAssignment::new(
                    field,
                    found.item,
                    MatchStrategy::CategoryDerived,
                    Some(found.score),
                    None,
                ));
            }
        }

        if let Some(item) = catalog.iter().find(|item| {
            DEFAULT_TARIFF_NAMES
                .iter()
                .any(|name| contains_folded(&item.nombre, name))
        }) {
            debug!(field = %field, id = %item.id, "default tariff");
            return Some(FieldAssignment::new(
                field,
                item,
                MatchStrategy::DefaultName,
                None,
                None,
            ));
        }

        let item = catalog.first()?;
        debug!(field = %field, id = %item.id, "first tariff used as default");
        Some(FieldAssignment::new(
            field,
            item,
            MatchStrategy::FirstEntry,
            None,
            None,
        ))
    }

    fn loggable<'a>(&self, value: &'a str) -> &'a str {
        if self.log_data { value } else { REDACTED_VALUE }
    }
}

/// Runs one auto-fill pass with the default thresholds.
pub fn map_fields(
    extracted: &ExtractedData,
    current: &FormData,
    catalogs: &Catalogs,
) -> MappingOutcome {
    MappingEngine::default().map_fields(extracted, current, catalogs)
}

/// Looks up the first keyword token contained in `text` whose candidates
/// name a catalog item.
fn keyword_match<'c>(
    text: &str,
    table: KeywordTable,
    catalog: &'c Catalog,
    match_codes: bool,
) -> Option<(&'static str, &'c MasterDataItem)> {
    let folded = fold_upper(text);
    table
        .iter()
        .filter(|(token, _)| folded.contains(token))
        .find_map(|(token, candidates)| {
            first_candidate(catalog, candidates, match_codes).map(|item| (*token, item))
        })
}

/// Tries `candidates` in order; for each, the first catalog item whose name
/// (or code) contains it wins.
fn first_candidate<'c>(
    catalog: &'c Catalog,
    candidates: &[&str],
    match_codes: bool,
) -> Option<&'c MasterDataItem> {
    candidates.iter().find_map(|candidate| {
        catalog.iter().find(|item| {
            contains_folded(&item.nombre, candidate)
                || item_code(item, match_codes)
                    .is_some_and(|code| contains_folded(code, candidate))
        })
    })
}

fn item_code(item: &MasterDataItem, match_codes: bool) -> Option<&str> {
    if match_codes {
        item.codigo.as_deref()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, nombre: &str, codigo: Option<&str>) -> MasterDataItem {
        let item = MasterDataItem::new(id, nombre);
        match codigo {
            Some(code) => item.with_codigo(code),
            None => item,
        }
    }

    #[test]
    fn candidates_follow_catalog_order() {
        let catalog: Catalog = vec![
            item("1", "Todo Riesgo Plus", None),
            item("2", "Todo Riesgo", None),
        ]
        .into_iter()
        .collect();
        let found = first_candidate(&catalog, &["TODO RIESGO"], false).unwrap();
        assert_eq!(found.id, "1");
    }

    #[test]
    fn earlier_candidate_beats_earlier_item() {
        let catalog: Catalog = vec![
            item("1", "Gasoil", Some("DIS")),
            item("2", "Nafta", Some("GAS")),
        ]
        .into_iter()
        .collect();
        let found = first_candidate(&catalog, &["NAFTA", "GAS"], true).unwrap();
        assert_eq!(found.id, "2");
    }

    #[test]
    fn codes_are_ignored_unless_enabled() {
        let catalog: Catalog = vec![item("1", "Privado", Some("PART"))].into_iter().collect();
        assert!(first_candidate(&catalog, &["PART"], false).is_none());
        assert!(first_candidate(&catalog, &["PART"], true).is_some());
    }

    #[test]
    fn keyword_falls_through_to_next_token() {
        let table: KeywordTable = &[("TAXI", &["TAXI"]), ("REMIS", &["REMISE"])];
        let catalog: Catalog = vec![item("9", "Remise", None)].into_iter().collect();
        let (token, found) = keyword_match("taxi / remis", table, &catalog, false).unwrap();
        assert_eq!(token, "REMIS");
        assert_eq!(found.id, "9");
    }

    #[test]
    fn thresholds_lookup_per_field() {
        let thresholds = MatchThresholds::default();
        assert_eq!(thresholds.for_field(FormField::Destino), 0.5);
        assert_eq!(thresholds.for_field(FormField::Calidad), 0.8);
        assert!(MatchThresholds::strict().fuel > thresholds.fuel);
        assert!(MatchThresholds::relaxed().fuel < thresholds.fuel);
    }

    #[test]
    fn notification_pluralizes() {
        let nafta = item("2", "Nafta", None);
        let mut outcome = MappingOutcome {
            form: FormData::default(),
            assignments: vec![],
        };
        assert_eq!(outcome.notification(), None);
        outcome.assignments.push(FieldAssignment::new(
            FormField::Combustible,
            &nafta,
            MatchStrategy::Similarity,
            Some(1.0),
            Some("combustible"),
        ));
        assert_eq!(
            outcome.notification().as_deref(),
            Some("Se completó automáticamente 1 campo: Combustible")
        );
    }
}

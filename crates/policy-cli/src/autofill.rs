//! Input loading and output writing for the `autofill` command.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use policy_catalog::{catalog_root, load_catalogs};
use policy_map::{MappingEngine, MappingOutcome, MatchThresholds};
use policy_model::{ExtractedData, FormData};

/// Everything one auto-fill run needs.
#[derive(Debug, Clone)]
pub struct AutofillOptions {
    /// Scanner output (JSON object).
    pub extracted: PathBuf,
    /// Current form state; an empty form when absent.
    pub form: Option<PathBuf>,
    /// Catalog directory; see [`resolve_catalog_dir`].
    pub catalogs: Option<PathBuf>,
    pub thresholds: MatchThresholds,
    pub log_data: bool,
}

#[derive(Debug, Clone)]
pub struct AutofillResult {
    pub catalog_dir: PathBuf,
    pub outcome: MappingOutcome,
}

/// Explicit directory if given, else `POLICY_CATALOG_DIR`, else the
/// workspace `catalogs/` directory.
pub fn resolve_catalog_dir(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(catalog_root, Path::to_path_buf)
}

pub fn read_extracted(path: &Path) -> Result<ExtractedData> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read extracted: {}", path.display()))?;
    ExtractedData::from_json_str(&text)
        .with_context(|| format!("parse extracted: {}", path.display()))
}

pub fn read_form(path: &Path) -> Result<FormData> {
    let text = fs::read_to_string(path).with_context(|| format!("read form: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse form: {}", path.display()))
}

pub fn run_autofill(options: &AutofillOptions) -> Result<AutofillResult> {
    let span = info_span!("autofill", extracted = %options.extracted.display());
    let _guard = span.enter();

    let extracted = read_extracted(&options.extracted)?;
    let current = match &options.form {
        Some(path) => read_form(path)?,
        None => FormData::default(),
    };
    let catalog_dir = resolve_catalog_dir(options.catalogs.as_deref());
    let catalogs = load_catalogs(&catalog_dir)
        .with_context(|| format!("load catalogs: {}", catalog_dir.display()))?;
    debug!(
        catalog_dir = %catalog_dir.display(),
        extracted_keys = extracted.len(),
        "inputs loaded"
    );

    let engine = MappingEngine::new(options.thresholds).with_data_logging(options.log_data);
    let outcome = engine.map_fields(&extracted, &current, &catalogs);
    Ok(AutofillResult {
        catalog_dir,
        outcome,
    })
}

/// Pretty JSON of the form, newline-terminated.
pub fn form_json(form: &FormData) -> Result<String> {
    let mut json = serde_json::to_string_pretty(form).context("serialize form")?;
    json.push('\n');
    Ok(json)
}

/// Writes the form JSON to `output`, or to `writer` when no path is given.
pub fn write_form(form: &FormData, output: Option<&Path>, writer: &mut impl Write) -> Result<()> {
    let json = form_json(form)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write form: {}", path.display()))
        }
        None => writer.write_all(json.as_bytes()).context("write form"),
    }
}

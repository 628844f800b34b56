use std::io;

use anyhow::{Context, Result};
use tracing::info;

use policy_catalog::{CatalogSource, load_catalogs};
use policy_cli::autofill::{
    AutofillOptions, AutofillResult, resolve_catalog_dir, run_autofill, write_form,
};
use policy_cli::logging::log_data_enabled;
use policy_map::{MatchThresholds, similarity};
use policy_model::FormField;

use crate::cli::{AutofillArgs, CatalogsArgs, SimilarityArgs};
use crate::summary::{CatalogRow, catalog_table};

pub fn run_autofill_command(args: &AutofillArgs) -> Result<AutofillResult> {
    let thresholds = if args.strict {
        MatchThresholds::strict()
    } else if args.relaxed {
        MatchThresholds::relaxed()
    } else {
        MatchThresholds::default()
    };
    let options = AutofillOptions {
        extracted: args.extracted.clone(),
        form: args.form.clone(),
        catalogs: args.catalogs.dir.clone(),
        thresholds,
        log_data: log_data_enabled(),
    };
    let result = run_autofill(&options)?;
    write_form(
        &result.outcome.form,
        args.output.as_deref(),
        &mut io::stdout().lock(),
    )?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), "form written");
    }
    Ok(result)
}

pub fn run_similarity(args: &SimilarityArgs) {
    println!("{:.4}", similarity(&args.a, &args.b));
}

pub fn run_catalogs(args: &CatalogsArgs) -> Result<()> {
    let dir = resolve_catalog_dir(args.dir.as_deref());
    let catalogs =
        load_catalogs(&dir).with_context(|| format!("load catalogs: {}", dir.display()))?;
    let rows: Vec<CatalogRow> = FormField::ALL
        .into_iter()
        .map(|field| CatalogRow {
            field,
            source: CatalogSource::locate(&dir, field),
            items: catalogs.catalog(field).len(),
        })
        .collect();
    println!("Catalogs: {}", dir.display());
    println!("{}", catalog_table(&rows));
    Ok(())
}

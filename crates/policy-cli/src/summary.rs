use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use policy_catalog::CatalogSource;
use policy_cli::autofill::AutofillResult;
use policy_map::{FieldAssignment, MappingOutcome};
use policy_model::FormField;

/// One row of the `catalogs` listing.
pub struct CatalogRow {
    pub field: FormField,
    pub source: CatalogSource,
    pub items: usize,
}

pub fn print_outcome(result: &AutofillResult) {
    let outcome = &result.outcome;
    eprintln!("Catalogs: {}", result.catalog_dir.display());
    eprintln!("{}", outcome_table(outcome));
    match outcome.notification() {
        Some(message) => eprintln!("{message}"),
        None => eprintln!("No fields were filled."),
    }
}

/// Field / value / strategy / score for every form field. Fields that were
/// already set or stayed empty are shown dimmed.
pub fn outcome_table(outcome: &MappingOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Strategy"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for field in FormField::ALL {
        let row = match outcome.assignment(field) {
            Some(assignment) => assignment_row(assignment),
            None if outcome.form.is_set(field) => vec![
                Cell::new(field.label()),
                Cell::new(outcome.form.get(field)),
                dim_cell("preset"),
                dim_cell("-"),
            ],
            None => vec![
                Cell::new(field.label()),
                dim_cell("-"),
                dim_cell("no match"),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    table
}

fn assignment_row(assignment: &FieldAssignment) -> Vec<Cell> {
    let score = match assignment.score {
        Some(score) => Cell::new(format!("{score:.2}")),
        None => dim_cell("-"),
    };
    vec![
        Cell::new(assignment.field.label()).add_attribute(Attribute::Bold),
        Cell::new(format!("{} ({})", assignment.nombre, assignment.id)).fg(Color::Green),
        Cell::new(assignment.strategy.describe()),
        score,
    ]
}

pub fn catalog_table(rows: &[CatalogRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Catalog"),
        header_cell("Source"),
        header_cell("Items"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        let source = match row.source.path() {
            Some(path) => Cell::new(path.display()),
            None => Cell::new("missing").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(policy_catalog::catalog_file_stem(row.field)),
            source,
            Cell::new(row.items),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_map::map_fields;
    use policy_model::{Catalog, Catalogs, ExtractedData, FormData, MasterDataItem};

    #[test]
    fn outcome_table_has_one_row_per_field() {
        let catalogs = Catalogs {
            tarifas: Catalog::new(vec![MasterDataItem::new("1", "Tarifa General")]),
            ..Catalogs::default()
        };
        let current = FormData {
            departamento_id: "5".to_string(),
            ..FormData::default()
        };
        let outcome = map_fields(&ExtractedData::new(), &current, &catalogs);
        let table = outcome_table(&outcome);
        assert_eq!(table.row_count(), FormField::ALL.len());

        let rendered = table.to_string();
        assert!(rendered.contains("Tarifa General (1)"), "{rendered}");
        assert!(rendered.contains("default tariff"), "{rendered}");
        assert!(rendered.contains("preset"), "{rendered}");
        assert!(rendered.contains("no match"), "{rendered}");
    }
}

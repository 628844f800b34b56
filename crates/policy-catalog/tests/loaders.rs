use std::fs;
use std::path::Path;

use policy_catalog::{CatalogError, CatalogSource, load_catalog_file, load_catalogs};
use policy_model::{FormField, MasterDataItem};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

#[test]
fn loads_json_and_csv_catalogs_side_by_side() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "combustibles.json",
        r#"[{"id": 1, "nombre": "Gasoil", "codigo": "DIS"}, {"id": "2", "nombre": "Nafta"}]"#,
    );
    write(
        dir.path(),
        "departamentos.csv",
        "\u{feff}id,nombre\n1,Montevideo\n2, Canelones \n",
    );
    write(
        dir.path(),
        "tarifas.json",
        r#"{"total": 1, "items": [{"id": 9, "nombre": "Tarifa General"}]}"#,
    );

    let catalogs = load_catalogs(dir.path()).expect("load catalogs");

    assert_eq!(
        catalogs.combustibles.first(),
        Some(&MasterDataItem::new("1", "Gasoil").with_codigo("DIS"))
    );
    assert_eq!(catalogs.combustibles.get("2").map(|i| i.codigo.clone()), Some(None));
    assert_eq!(
        catalogs.departamentos.get("2").map(|i| i.nombre.as_str()),
        Some("Canelones")
    );
    assert_eq!(catalogs.tarifas.len(), 1);
    assert!(catalogs.destinos.is_empty());
    assert!(catalogs.calidades.is_empty());
    assert!(catalogs.categorias.is_empty());
}

#[test]
fn json_wins_over_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "destinos.csv", "id,nombre\n1,Desde CSV\n");
    write(dir.path(), "destinos.json", r#"[{"id": 1, "nombre": "Desde JSON"}]"#);

    assert!(matches!(
        CatalogSource::locate(dir.path(), FormField::Destino),
        CatalogSource::Json(_)
    ));
    let catalogs = load_catalogs(dir.path()).expect("load catalogs");
    assert_eq!(catalogs.destinos.first().map(|i| i.nombre.as_str()), Some("Desde JSON"));
}

#[test]
fn csv_codigo_column_is_optional_and_blank_means_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("combustibles.csv");
    fs::write(&path, "ID,Nombre,Codigo\n1,Gasoil,DIS\n2,Nafta,\n,sin id,\n").expect("write");

    let catalog = load_catalog_file(&path).expect("load csv");
    let items: Vec<_> = catalog.iter().cloned().collect();
    assert_eq!(
        items,
        vec![
            MasterDataItem::new("1", "Gasoil").with_codigo("DIS"),
            MasterDataItem::new("2", "Nafta"),
        ]
    );
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");
    let err = load_catalogs(&missing).unwrap_err();
    assert!(matches!(err, CatalogError::DirectoryNotFound { ref path } if path == &missing));
}

#[test]
fn csv_without_nombre_column_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "calidades.csv", "id,name\n1,Propietario\n");
    let err = load_catalogs(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn { column: "nombre", .. }));
}

#[test]
fn malformed_json_reports_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "categorias.json", r#"{"rows": []}"#);
    let err = load_catalogs(dir.path()).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, CatalogError::Json { .. }));
    assert!(message.contains("categorias.json"), "{message}");
}

#[test]
fn empty_directory_yields_empty_catalogs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalogs = load_catalogs(dir.path()).expect("load catalogs");
    for field in FormField::ALL {
        assert!(catalogs.catalog(field).is_empty(), "{field}");
    }
}

#[test]
fn json_items_without_id_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tarifas.json");
    fs::write(
        &path,
        r#"[{"id": "", "nombre": "Sin id"}, {"id": "  ", "nombre": "Blanco"}, {"id": 4, "nombre": "General"}]"#,
    )
    .expect("write");

    let catalog = load_catalog_file(&path).expect("load json");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.first().map(|item| item.id.as_str()), Some("4"));
}

//! Integration tests for the auto-fill command plumbing.

use std::fs;
use std::path::{Path, PathBuf};

use policy_cli::autofill::{
    AutofillOptions, form_json, read_form, resolve_catalog_dir, run_autofill, write_form,
};
use policy_map::MatchThresholds;
use policy_model::{FormData, FormField};

fn workspace_catalogs() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalogs")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn options(extracted: PathBuf) -> AutofillOptions {
    AutofillOptions {
        extracted,
        form: None,
        catalogs: Some(workspace_catalogs()),
        thresholds: MatchThresholds::default(),
        log_data: false,
    }
}

#[test]
fn fills_form_from_scan_and_bundled_catalogs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scan = write(
        dir.path(),
        "scan.json",
        r#"{
            "vehiculo": {
                "combustible": "NAFTA",
                "uso": "PARTICULAR",
                "tipo": "AUTOMOVIL SEDAN"
            },
            "asegurado": { "departamento": "Montevideo", "calidad": "Propietario" },
            "modalidad": "Modalidad: Responsabilidad Civil"
        }"#,
    );

    let result = run_autofill(&options(scan)).expect("autofill");
    assert_eq!(result.catalog_dir, workspace_catalogs());
    let outcome = &result.outcome;

    assert_eq!(outcome.changed_fields(), FormField::ALL.to_vec());
    insta::assert_snapshot!(form_json(&outcome.form).unwrap(), @r#"
    {
      "combustibleId": "2",
      "destinoId": "1",
      "departamentoId": "1",
      "calidadId": "1",
      "categoriaId": "1",
      "tarifaId": "1"
    }
    "#);
}

#[test]
fn preset_form_is_respected_and_written_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scan = write(dir.path(), "scan.json", r#"{"combustible": "Gasoil"}"#);
    let form = write(
        dir.path(),
        "form.json",
        r#"{"combustibleId": "3", "tarifaId": "4"}"#,
    );

    let mut options = options(scan);
    options.form = Some(form);
    let result = run_autofill(&options).expect("autofill");
    assert!(result.outcome.is_unchanged());

    let output = dir.path().join("out.json");
    let mut stdout = Vec::new();
    write_form(&result.outcome.form, Some(&output), &mut stdout).expect("write form");
    assert!(stdout.is_empty());

    let written = read_form(&output).expect("read written form");
    assert_eq!(written.combustible_id, "3");
    assert_eq!(written.tarifa_id, "4");
    assert_eq!(written.destino_id, "");
}

#[test]
fn form_goes_to_writer_without_output_path() {
    let form = FormData {
        calidad_id: "2".to_string(),
        ..FormData::default()
    };
    let mut buffer = Vec::new();
    write_form(&form, None, &mut buffer).expect("write form");
    let text = String::from_utf8(buffer).expect("utf8");
    assert!(text.contains(r#""calidadId": "2""#), "{text}");
    assert!(text.ends_with('\n'));
}

#[test]
fn scan_that_is_not_an_object_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scan = write(dir.path(), "scan.json", r#"["NAFTA"]"#);
    let error = run_autofill(&options(scan)).unwrap_err();
    assert!(format!("{error:#}").contains("parse extracted"), "{error:#}");
}

#[test]
fn missing_catalog_directory_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let scan = write(dir.path(), "scan.json", "{}");
    let mut options = options(scan);
    options.catalogs = Some(dir.path().join("no-catalogs"));
    let error = run_autofill(&options).unwrap_err();
    assert!(format!("{error:#}").contains("load catalogs"), "{error:#}");
}

#[test]
fn explicit_catalog_dir_wins() {
    let explicit = Path::new("/srv/catalogs");
    assert_eq!(resolve_catalog_dir(Some(explicit)), explicit.to_path_buf());
}

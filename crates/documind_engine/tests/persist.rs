use std::fs;
use std::time::Duration;

use chrono::NaiveDate;
use documind_core::{ActionResult, IncomingFile, Msg, Settings, Simulation};
use documind_engine::{default_report_filename, export_contract, export_report, PersistError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn extraction_result() -> ActionResult {
    let origin = NaiveDate::from_ymd_opt(2025, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap();
    let mut sim = Simulation::new(Settings::default(), origin);
    sim.upload(vec![
        IncomingFile::new("a.pdf", "application/pdf", 1),
        IncomingFile::new("b.pdf", "application/pdf", 1),
    ]);
    let ids: Vec<_> = sim.state().documents().iter().map(|d| d.id.clone()).collect();
    for id in ids {
        sim.dispatch(Msg::DocumentSelected(id));
    }
    sim.dispatch(Msg::ExtractClicked);
    sim.advance(Duration::from_secs(2));
    sim.state().action_result().cloned().unwrap()
}

#[test]
fn export_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("summary.json");
    fs::write(&path, "stale contents that are longer than the new report").unwrap();

    let result = extraction_result();
    export_report(&result, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with('{'));
    assert!(!text.contains("stale"));
    // Only the target remains; the staging file was renamed over it.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn export_under_a_file_fails_without_partial_output() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let err = export_report(&extraction_result(), &file_path.join("report.json")).unwrap_err();
    assert!(matches!(err, PersistError::ExportDir { .. }));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}

#[test]
fn export_path_needs_a_file_name() {
    let err = export_report(&extraction_result(), std::path::Path::new("/")).unwrap_err();
    assert!(matches!(err, PersistError::NoFileName(_)));
}

#[test]
fn exported_report_is_pretty_tagged_json() {
    let temp = TempDir::new().unwrap();
    let result = extraction_result();
    let path = temp.path().join("nested").join(default_report_filename(result.kind()));

    let written = export_report(&result, &path).unwrap();
    assert_eq!(written, path);

    let text = fs::read_to_string(&written).unwrap();
    assert!(text.contains("\n  \"kind\": \"extract\""));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["format_version"], 1);
    assert_eq!(json["title"], "Extracted Data");
    assert_eq!(json["source_documents"][1], "b.pdf");
    assert_eq!(json["payload"]["kind"], "extraction");
    assert_eq!(json["payload"]["data"]["contacts"][0]["name"], "John Smith");
}

#[test]
fn contract_export_writes_plain_text() {
    let temp = TempDir::new().unwrap();
    let contract = documind_core::GeneratedContract {
        template_id: "re1".into(),
        template_name: Some("Purchase Agreement".into()),
        source_documents: Vec::new(),
        description: String::new(),
        content: documind_core::fixtures::GENERATED_CONTRACT.to_string(),
    };
    let path = temp.path().join("contract.txt");
    export_contract(&contract, &path).unwrap();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .starts_with("REAL ESTATE PURCHASE AGREEMENT"));
}

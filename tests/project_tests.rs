mod common;

use cardpress::{CardRecord, ExportFormat, FieldKind, Project, ProjectError, ProjectStore};
use common::fixtures::*;
use common::pdf_assertions::*;
use common::{GeneratedPdf, TestResult, init_logging};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_new_project_round_trips_through_the_store() -> TestResult {
    init_logging();
    let home = tempdir()?;
    let store = ProjectStore::new(home.path());

    let mut project = store.create("team")?;
    project.deck.records.push(CardRecord::new().with("Name", "Ada Lovelace").with("Title", "Analyst"));
    store.save(&mut project)?;

    let reopened = store.open("team")?;
    assert_eq!(reopened.deck, project.deck);
    assert_eq!(store.list()?, vec!["team".to_string()]);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(project.project_file())?)?;
    assert!(json["template"]["fields"].is_array());
    assert_eq!(json["template"]["background"], "#FFFFFF");
    assert_eq!(json["cards"][0]["Name"], "Ada Lovelace");
    Ok(())
}

#[test]
fn test_save_load_save_is_idempotent_with_images() -> TestResult {
    init_logging();
    let home = tempdir()?;
    let outside = tempdir()?;
    let photo = outside.path().join("photo.png");
    write_png(&photo, 8, 8);

    let store = ProjectStore::new(home.path());
    let mut project = store.create("photos")?;
    project.deck.records.push(CardRecord::new().with("Name", "Grace").with("Photo", photo.to_string_lossy()));

    let first = store.save(&mut project)?;
    assert_eq!(first.copied, vec!["images/photo.png".to_string()]);
    assert_eq!(project.deck.records[0].get("Photo"), "images/photo.png");
    let saved = fs::read(project.project_file())?;

    let mut loaded = store.open("photos")?;
    let second = store.save(&mut loaded)?;
    assert!(second.copied.is_empty());
    assert_eq!(fs::read(project.project_file())?, saved);
    assert_eq!(fs::read_dir(project.images_dir())?.count(), 1);
    Ok(())
}

#[test]
fn test_colliding_image_names_get_suffixes() -> TestResult {
    let home = tempdir()?;
    let a = tempdir()?;
    let b = tempdir()?;
    write_png(&a.path().join("logo.png"), 4, 4);
    write_png(&b.path().join("logo.png"), 6, 6);

    let store = ProjectStore::new(home.path());
    let mut project = store.create("brands")?;
    let first = project.deck.add_record();
    let second = project.deck.add_record();

    assert_eq!(project.assign_image(first, "Photo", &a.path().join("logo.png"))?, "images/logo.png");
    assert_eq!(project.assign_image(second, "Photo", &b.path().join("logo.png"))?, "images/logo_1.png");
    Ok(())
}

#[test]
fn test_removing_a_field_cascades_and_persists() -> TestResult {
    let home = tempdir()?;
    let store = ProjectStore::new(home.path());
    let mut project = store.create("cascade")?;
    for name in ["Ada", "Grace"] {
        project.deck.records.push(CardRecord::new().with("Name", name).with("Email", format!("{}@example.com", name)));
    }

    project.deck.remove_field("Email")?;
    assert!(project.deck.records.iter().all(|r| !r.contains("Email")));
    store.save(&mut project)?;

    let reopened = store.open("cascade")?;
    assert!(reopened.deck.template.field("Email").is_none());
    assert!(reopened.deck.records.iter().all(|r| !r.contains("Email")));
    Ok(())
}

#[test]
fn test_malformed_project_is_reported() -> TestResult {
    let home = tempdir()?;
    let dir = home.path().join("broken");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("project.json"), r#"{"template": {"fields": []}}"#)?;

    let store = ProjectStore::new(home.path());
    assert!(matches!(store.open("broken"), Err(ProjectError::MalformedProject(_))));
    assert!(matches!(store.open("absent"), Err(ProjectError::NotFound(_))));
    Ok(())
}

#[test]
fn test_project_export_resolves_copied_images() -> TestResult {
    init_logging();
    let home = tempdir()?;
    let outside = tempdir()?;
    let photo = outside.path().join("portrait.png");
    write_png(&photo, 40, 80);

    let store = ProjectStore::new(home.path());
    let mut project = store.create("export")?;
    let index = project.deck.add_record();
    project.deck.set_value(index, "Name", "Ada Lovelace")?;
    project.assign_image(index, "Photo", &photo)?;
    store.save(&mut project)?;

    let out = outside.path().join("export.pdf");
    let report = cardpress::export_project(&project, 2, ExportFormat::Pdf, &out)?;
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let pdf = GeneratedPdf::from_file(&out)?;
    assert_eq!(image_placements(&pdf.doc, 1).len(), 1);
    assert!(shown_text(&pdf.doc, 1).contains(&"Ada Lovelace".to_string()));
    Ok(())
}

#[test]
fn test_default_template_has_an_image_field() -> TestResult {
    let dir = tempdir()?;
    let project = Project::with_default_template("fresh", dir.path());
    let photo = project.deck.template.field("Photo").ok_or("missing Photo field")?;
    assert_eq!(photo.kind, FieldKind::Image);
    Ok(())
}

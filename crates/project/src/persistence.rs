use crate::error::ProjectError;
use crate::images;
use crate::project::Project;
use cardpress_model::CardDeck;
use cardpress_resource::match_destination_permissions;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the serialized deck inside a project directory.
pub const PROJECT_FILE: &str = "project.json";

/// What a save did besides writing `project.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    /// Project-relative paths of images copied in during this save.
    pub copied: Vec<String>,
    /// Images that could not be copied; their values were left unchanged.
    pub warnings: Vec<String>,
}

fn project_dir_of(path: &Path) -> (PathBuf, PathBuf) {
    if path.file_name().is_some_and(|name| name == PROJECT_FILE) {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        (dir, path.to_path_buf())
    } else {
        (path.to_path_buf(), path.join(PROJECT_FILE))
    }
}

/// Loads a project from its directory or from its `project.json`.
///
/// Card values for fields the template no longer defines are kept as-is.
pub fn load(path: &Path) -> Result<Project, ProjectError> {
    let (dir, file) = project_dir_of(path);
    let json = match fs::read_to_string(&file) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ProjectError::NotFound(file)),
        Err(e) => return Err(e.into()),
    };
    let deck: CardDeck = serde_json::from_str(&json)?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    log::info!(
        "Loaded project '{}' ({} fields, {} cards)",
        name,
        deck.template.len(),
        deck.records.len()
    );
    Ok(Project::new(name, dir, deck))
}

/// Copies external images into the project, then writes `project.json`
/// atomically. A failed image copy leaves that value untouched and is
/// reported as a warning rather than failing the save.
pub fn save(project: &mut Project) -> Result<SaveReport, ProjectError> {
    fs::create_dir_all(project.dir())?;
    let report = copy_in_images(project);

    let json = serde_json::to_string_pretty(&project.deck)?;
    let mut tmp = NamedTempFile::new_in(project.dir())?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    match_destination_permissions(tmp.as_file(), &project.project_file())?;
    tmp.persist(project.project_file()).map_err(|e| e.error)?;

    log::info!(
        "Saved project '{}' to {} ({} image(s) copied)",
        project.name(),
        project.project_file().display(),
        report.copied.len()
    );
    Ok(report)
}

fn copy_in_images(project: &mut Project) -> SaveReport {
    let mut report = SaveReport::default();
    let image_fields: Vec<String> = project
        .deck
        .template
        .fields()
        .iter()
        .filter(|f| f.is_image())
        .map(|f| f.id.clone())
        .collect();
    let dir = project.dir().to_path_buf();
    let mut stored_by_source: HashMap<PathBuf, String> = HashMap::new();

    for (index, record) in project.deck.records.iter_mut().enumerate() {
        for field_id in &image_fields {
            let value = record.get(field_id).trim().to_string();
            if value.is_empty() {
                continue;
            }
            if let Some(internal) = images::internal_value(&dir, &value) {
                if internal != value {
                    record.set(field_id.as_str(), internal);
                }
                continue;
            }

            let source = images::resolve_source(&dir, &value);
            if let Some(stored) = stored_by_source.get(&source) {
                record.set(field_id.as_str(), stored.clone());
                continue;
            }
            match images::copy_into_project(&dir, &source) {
                Ok(stored) => {
                    record.set(field_id.as_str(), stored.clone());
                    stored_by_source.insert(source, stored.clone());
                    report.copied.push(stored);
                }
                Err(e) => {
                    let warning = format!("card {} field '{}': could not copy image '{}': {}", index + 1, field_id, value, e);
                    log::warn!("{}", warning);
                    report.warnings.push(warning);
                }
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpress_model::{CardRecord, CardTemplate, FieldDefinition};
    use tempfile::tempdir;

    fn deck() -> CardDeck {
        let template = CardTemplate::new()
            .with_field(FieldDefinition::text("Name").at(10.0, 10.0).sized(100.0, 20.0))
            .unwrap()
            .with_field(FieldDefinition::image("Logo").at(10.0, 40.0).sized(50.0, 50.0))
            .unwrap();
        CardDeck::with_records(template, vec![CardRecord::new().with("Name", "Ada Lovelace")])
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let mut project = Project::new("demo", dir.path().join("demo"), deck());
        let report = save(&mut project).unwrap();
        assert!(report.warnings.is_empty());

        let loaded = load(&dir.path().join("demo")).unwrap();
        assert_eq!(loaded.name(), "demo");
        assert_eq!(loaded.deck, project.deck);

        let by_file = load(&project.project_file()).unwrap();
        assert_eq!(by_file.deck, project.deck);
    }

    #[test]
    fn saving_twice_is_byte_identical_and_copies_once() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let source = outside.path().join("logo.png");
        fs::write(&source, b"png").unwrap();

        let mut project = Project::new("demo", dir.path(), deck());
        project.deck.records[0].set("Logo", source.to_string_lossy());

        let first = save(&mut project).unwrap();
        assert_eq!(first.copied, vec!["images/logo.png".to_string()]);
        let first_json = fs::read(project.project_file()).unwrap();

        let mut reloaded = load(dir.path()).unwrap();
        let second = save(&mut reloaded).unwrap();
        assert!(second.copied.is_empty());
        assert_eq!(fs::read(project.project_file()).unwrap(), first_json);
        assert_eq!(fs::read_dir(project.images_dir()).unwrap().count(), 1);
    }

    #[test]
    fn missing_image_is_a_warning_not_a_failure() {
        let dir = tempdir().unwrap();
        let mut project = Project::new("demo", dir.path(), deck());
        project.deck.records[0].set("Logo", "/definitely/not/here.png");

        let report = save(&mut project).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(project.deck.records[0].get("Logo"), "/definitely/not/here.png");
        assert!(project.project_file().is_file());
    }

    #[test]
    fn stale_record_keys_survive_a_load() {
        let dir = tempdir().unwrap();
        let json = r##"{
            "template": {"fields": [{"id": "Name", "kind": "text", "x": 0, "y": 0, "width": 100, "height": 20}], "background": "#FFFFFF"},
            "cards": [{"Name": "Ada", "Removed": "old value"}]
        }"##;
        fs::write(dir.path().join(PROJECT_FILE), json).unwrap();

        let project = load(dir.path()).unwrap();
        assert_eq!(project.deck.records[0].get("Removed"), "old value");
        assert_eq!(project.deck.template.len(), 1);
    }

    #[test]
    fn malformed_json_and_missing_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PROJECT_FILE);

        fs::write(&file, "{ not json").unwrap();
        assert!(matches!(load(dir.path()), Err(ProjectError::MalformedProject(_))));

        fs::write(&file, r#"{"template": {"fields": []}}"#).unwrap();
        assert!(matches!(load(dir.path()), Err(ProjectError::MalformedProject(_))));

        fs::write(&file, r##"{"template": {"background": "#FFFFFF"}, "cards": []}"##).unwrap();
        assert!(matches!(load(dir.path()), Err(ProjectError::MalformedProject(_))));
    }

    #[test]
    fn non_hex_colors_are_malformed() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(PROJECT_FILE);

        fs::write(&file, r##"{"template": {"fields": [], "background": "#é1"}, "cards": []}"##).unwrap();
        assert!(matches!(load(dir.path()), Err(ProjectError::MalformedProject(_))));

        let field = r##"{"id": "Name", "kind": "text", "style": {"color": "#aé"}}"##;
        fs::write(&file, format!(r#"{{"template": {{"fields": [{}]}}, "cards": []}}"#, field)).unwrap();
        assert!(matches!(load(dir.path()), Err(ProjectError::MalformedProject(_))));
    }

    #[test]
    fn shared_external_image_is_copied_once_per_save() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let source = outside.path().join("logo.png");
        fs::write(&source, b"png").unwrap();

        let mut project = Project::new("demo", dir.path(), deck());
        project.deck.records.push(CardRecord::new().with("Name", "Grace Hopper"));
        for record in &mut project.deck.records {
            record.set("Logo", source.to_string_lossy());
        }

        let report = save(&mut project).unwrap();
        assert_eq!(report.copied, vec!["images/logo.png".to_string()]);
        assert!(project.deck.records.iter().all(|r| r.get("Logo") == "images/logo.png"));
        assert_eq!(fs::read_dir(project.images_dir()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn saved_project_file_keeps_a_readable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let mut project = Project::new("demo", dir.path(), deck());
        save(&mut project).unwrap();
        let mode = fs::metadata(project.project_file()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        fs::set_permissions(project.project_file(), fs::Permissions::from_mode(0o600)).unwrap();
        save(&mut project).unwrap();
        let mode = fs::metadata(project.project_file()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn loading_a_missing_project_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(load(&dir.path().join("nope")), Err(ProjectError::NotFound(_))));
    }
}

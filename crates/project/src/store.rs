use crate::error::ProjectError;
use crate::persistence::{self, PROJECT_FILE, SaveReport};
use crate::project::Project;
use directories::BaseDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory under the user's home that holds all projects.
pub const DEFAULT_STORE_DIR: &str = ".business-card-generator";
/// Overrides the store location when set.
pub const STORE_ENV_VAR: &str = "CARDPRESS_HOME";

/// The directory of projects, one sub-directory per project.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    base: PathBuf,
}

impl ProjectStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Locates the store from `CARDPRESS_HOME`, falling back to
    /// `~/.business-card-generator`.
    pub fn from_env() -> Result<Self, ProjectError> {
        let base = match std::env::var_os(STORE_ENV_VAR) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => BaseDirs::new()
                .map(|dirs| dirs.home_dir().join(DEFAULT_STORE_DIR))
                .ok_or(ProjectError::NoHomeDirectory)?,
        };
        log::debug!("Using project store at {}", base.display());
        Ok(Self::new(base))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn project_dir(&self, name: &str) -> Result<PathBuf, ProjectError> {
        validate_name(name)?;
        Ok(self.base.join(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.project_dir(name)
            .map(|dir| dir.join(PROJECT_FILE).is_file())
            .unwrap_or(false)
    }

    /// Names of all projects that have a `project.json`, sorted.
    pub fn list(&self) -> Result<Vec<String>, ProjectError> {
        let entries = match fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.path().join(PROJECT_FILE).is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Creates and saves a new project with the default template.
    pub fn create(&self, name: &str) -> Result<Project, ProjectError> {
        let dir = self.project_dir(name)?;
        if dir.join(PROJECT_FILE).exists() {
            return Err(ProjectError::AlreadyExists(name.to_string()));
        }
        let mut project = Project::with_default_template(name, dir);
        persistence::save(&mut project)?;
        log::info!("Created project '{}'", name);
        Ok(project)
    }

    pub fn open(&self, name: &str) -> Result<Project, ProjectError> {
        persistence::load(&self.project_dir(name)?)
    }

    pub fn save(&self, project: &mut Project) -> Result<SaveReport, ProjectError> {
        persistence::save(project)
    }
}

fn validate_name(name: &str) -> Result<(), ProjectError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed != name
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains(std::path::MAIN_SEPARATOR);
    if invalid {
        Err(ProjectError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_list_and_open() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());

        store.create("zeta").unwrap();
        store.create("alpha").unwrap();
        fs::create_dir_all(dir.path().join("not-a-project")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha".to_string(), "zeta".to_string()]);
        let project = store.open("alpha").unwrap();
        assert_eq!(project.name(), "alpha");
        assert_eq!(project.deck.template.len(), 6);
        assert!(project.deck.records.is_empty());
    }

    #[test]
    fn create_refuses_existing_projects() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path());
        store.create("demo").unwrap();
        assert!(matches!(store.create("demo"), Err(ProjectError::AlreadyExists(_))));
        assert!(store.exists("demo"));
        assert!(!store.exists("other"));
    }

    #[test]
    fn names_with_separators_are_rejected() {
        let store = ProjectStore::new("/tmp/unused");
        for bad in ["", " ", "a/b", "a\\b", "..", " padded"] {
            assert!(matches!(store.project_dir(bad), Err(ProjectError::InvalidName(_))), "{bad:?}");
        }
        assert!(store.project_dir("My Cards").is_ok());
    }

    #[test]
    fn missing_base_lists_nothing() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }
}

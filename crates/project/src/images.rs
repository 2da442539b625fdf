use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Directory inside a project that holds copied images.
pub const IMAGES_DIR: &str = "images";

/// Returns the project-relative value for `value` when it already names a
/// file directly inside the project's images directory.
pub(crate) fn internal_value(project_dir: &Path, value: &str) -> Option<String> {
    let path = Path::new(value);
    if path.is_relative() {
        let mut components = path.components();
        return match (components.next(), components.next(), components.next()) {
            (Some(Component::Normal(dir)), Some(Component::Normal(file)), None) if dir == OsStr::new(IMAGES_DIR) => {
                Some(relative_value(file))
            }
            _ => None,
        };
    }

    let images_dir = fs::canonicalize(project_dir.join(IMAGES_DIR)).ok()?;
    let parent = fs::canonicalize(path.parent()?).ok()?;
    if parent == images_dir {
        path.file_name().map(relative_value)
    } else {
        None
    }
}

fn relative_value(file_name: &OsStr) -> String {
    format!("{}/{}", IMAGES_DIR, file_name.to_string_lossy())
}

/// Where an external image value points. Relative values are tried against
/// the project directory before the working directory.
pub(crate) fn resolve_source(project_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let in_project = project_dir.join(path);
    if in_project.exists() { in_project } else { path.to_path_buf() }
}

/// First free name for `file_name` in `dir`, appending `_1`, `_2`, ... to the
/// stem on collision.
pub(crate) fn unique_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let as_path = Path::new(file_name);
    let stem = as_path.file_stem().unwrap_or(file_name).to_string_lossy().into_owned();
    let extension = as_path.extension().map(|e| e.to_string_lossy().into_owned());
    (1..)
        .map(|n| match &extension {
            Some(ext) => dir.join(format!("{}_{}.{}", stem, n, ext)),
            None => dir.join(format!("{}_{}", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Copies `source` into the project's images directory and returns the new
/// project-relative value.
pub(crate) fn copy_into_project(project_dir: &Path, source: &Path) -> io::Result<String> {
    if !source.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("image file not found: {}", source.display()),
        ));
    }
    let file_name = source
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "image path has no file name"))?;

    let images_dir = project_dir.join(IMAGES_DIR);
    fs::create_dir_all(&images_dir)?;
    let destination = unique_destination(&images_dir, file_name);
    fs::copy(source, &destination)?;

    let stored = destination.file_name().unwrap_or(file_name);
    log::debug!("Copied {} to {}", source.display(), destination.display());
    Ok(relative_value(stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn relative_images_paths_are_internal() {
        let dir = tempdir().unwrap();
        assert_eq!(internal_value(dir.path(), "images/logo.png"), Some("images/logo.png".into()));
        assert_eq!(internal_value(dir.path(), "logo.png"), None);
        assert_eq!(internal_value(dir.path(), "images/sub/logo.png"), None);
        assert_eq!(internal_value(dir.path(), "../images/logo.png"), None);
    }

    #[test]
    fn absolute_paths_inside_images_are_internal() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(IMAGES_DIR)).unwrap();
        let inside = dir.path().join(IMAGES_DIR).join("a.png");
        fs::write(&inside, b"x").unwrap();
        assert_eq!(internal_value(dir.path(), inside.to_str().unwrap()), Some("images/a.png".into()));

        let outside = dir.path().join("b.png");
        fs::write(&outside, b"x").unwrap();
        assert_eq!(internal_value(dir.path(), outside.to_str().unwrap()), None);
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"1").unwrap();
        fs::write(dir.path().join("logo_1.png"), b"2").unwrap();
        let next = unique_destination(dir.path(), OsStr::new("logo.png"));
        assert_eq!(next, dir.path().join("logo_2.png"));
        assert_eq!(unique_destination(dir.path(), OsStr::new("other.png")), dir.path().join("other.png"));
    }

    #[test]
    fn copy_creates_images_dir_and_returns_relative_value() {
        let project = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let source = outside.path().join("photo.jpg");
        fs::write(&source, b"jpeg").unwrap();

        assert_eq!(copy_into_project(project.path(), &source).unwrap(), "images/photo.jpg");
        assert_eq!(copy_into_project(project.path(), &source).unwrap(), "images/photo_1.jpg");
        assert_eq!(fs::read(project.path().join("images/photo_1.jpg")).unwrap(), b"jpeg");
    }

    #[test]
    fn copying_a_missing_file_fails() {
        let project = tempdir().unwrap();
        let err = copy_into_project(project.path(), Path::new("/no/such/file.png")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

use std::fs::{self, File, Permissions};
use std::io;
use std::path::Path;

/// Gives a staged file the permissions it should have once it replaces
/// `destination`: the existing file's mode if there is one, otherwise the
/// usual mode for a new user document.
///
/// Temporary files are created owner-only, so this must run before the
/// staged file is moved into place.
pub fn match_destination_permissions(staged: &File, destination: &Path) -> io::Result<()> {
    let permissions = match fs::metadata(destination) {
        Ok(meta) => meta.permissions(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(staged)?,
        Err(e) => return Err(e),
    };
    staged.set_permissions(permissions)
}

#[cfg(unix)]
fn new_file_permissions(_staged: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(staged: &File) -> io::Result<Permissions> {
    Ok(staged.metadata()?.permissions())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::{NamedTempFile, tempdir};

    fn mode(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn new_destination_gets_a_readable_mode() {
        let dir = tempdir().unwrap();
        let staged = NamedTempFile::new_in(dir.path()).unwrap();
        let destination = dir.path().join("cards.pdf");

        match_destination_permissions(staged.as_file(), &destination).unwrap();
        staged.persist(&destination).unwrap();
        assert_eq!(mode(&destination), 0o644);
    }

    #[test]
    fn existing_destination_keeps_its_mode() {
        let dir = tempdir().unwrap();
        let destination = dir.path().join("cards.pdf");
        fs::write(&destination, b"old").unwrap();
        fs::set_permissions(&destination, Permissions::from_mode(0o640)).unwrap();

        let staged = NamedTempFile::new_in(dir.path()).unwrap();
        match_destination_permissions(staged.as_file(), &destination).unwrap();
        staged.persist(&destination).unwrap();
        assert_eq!(mode(&destination), 0o640);
    }
}

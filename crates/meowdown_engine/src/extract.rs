//! Archive extraction for the transcoder bootstrap.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::DependencyError;

/// Unpacks `archive` into `into`, dispatching on the archive filename.
pub fn extract_archive(archive: &Path, into: &Path) -> Result<(), DependencyError> {
    let name = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.ends_with(".zip") {
        let file = File::open(archive)?;
        let mut zip = zip::ZipArchive::new(file)
            .map_err(|err| DependencyError::Extract(err.to_string()))?;
        zip.extract(into)
            .map_err(|err| DependencyError::Extract(err.to_string()))?;
        Ok(())
    } else if name.ends_with(".tar.xz") {
        let file = File::open(archive)?;
        let decoder = xz2::read::XzDecoder::new(file);
        let mut tar = tar::Archive::new(decoder);
        tar.unpack(into)?;
        Ok(())
    } else {
        Err(DependencyError::Extract(format!(
            "unrecognized archive format: {name}"
        )))
    }
}

/// Finds a file called `name` anywhere under `root`. Archive layouts nest
/// the binaries at arbitrary depth, so this walks the whole tree.
pub fn find_binary(root: &Path, name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(root).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.file_name().is_some_and(|file| file == name) {
            return Some(path);
        }
    }
    for dir in subdirs {
        if let Some(found) = find_binary(&dir, name) {
            return Some(found);
        }
    }
    None
}

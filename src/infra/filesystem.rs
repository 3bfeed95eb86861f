//! Filesystem operations
//!
//! Handles the directory creation and copies done while staging a
//! distribution.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a single directory
///
/// Fails if the directory already exists.
pub fn create_dir(path: &Path) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FilesystemError::CreateDir {
            path: parent.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    std::fs::create_dir(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Copy a file or a directory tree into `dest_dir`
///
/// The copy keeps the source's file name. Returns the destination path.
pub fn copy_into(src: &Path, dest_dir: &Path) -> Result<PathBuf, FilesystemError> {
    let Some(name) = src.file_name() else {
        return Err(FilesystemError::SourceNotFound {
            path: src.to_path_buf(),
        });
    };
    let dest = dest_dir.join(name);

    if src.is_dir() {
        copy_tree(src, &dest)?;
    } else if src.is_file() {
        copy_file(src, &dest)?;
    } else {
        return Err(FilesystemError::SourceNotFound {
            path: src.to_path_buf(),
        });
    }

    Ok(dest)
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), FilesystemError> {
    let copy_err = |e: std::io::Error| FilesystemError::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        error: e.to_string(),
    };
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(copy_err)?;
    }
    std::fs::copy(src, dest).map_err(copy_err)?;
    Ok(())
}

fn copy_tree(src: &Path, dest: &Path) -> Result<(), FilesystemError> {
    for entry in walkdir::WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| FilesystemError::Copy {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            error: e.to_string(),
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| FilesystemError::CreateDir {
                path: target.clone(),
                error: e.to_string(),
            })?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

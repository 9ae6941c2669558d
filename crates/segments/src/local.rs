//! Filesystem-backed deep storage
//!
//! Segments pushed to a shared filesystem carry a load spec of the form
//! `{"type": "local", "path": "..."}`. The path names either an index
//! directory, copied file by file, or a `.tar.zst` archive of one, unpacked
//! into the target directory.

use crate::puller::SegmentPuller;
use crate::{Error, Result, SegmentReference};
use std::fs;
use std::path::{Path, PathBuf};

/// Load spec type handled by [`LocalDeepStoragePuller`]
pub const LOCAL_LOAD_SPEC_TYPE: &str = "local";

/// Pulls segments from a directory tree on a local or mounted filesystem
#[derive(Debug, Clone)]
pub struct LocalDeepStoragePuller {
    root: PathBuf,
}

impl LocalDeepStoragePuller {
    /// Create a puller resolving relative load-spec paths against `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage root for relative load-spec paths
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn source_path(&self, segment: &SegmentReference) -> Result<PathBuf> {
        let load_spec = segment.load_spec();
        match load_spec.get("type").and_then(|t| t.as_str()) {
            Some(LOCAL_LOAD_SPEC_TYPE) => {}
            Some(other) => {
                return Err(Error::pull(
                    segment,
                    format!("unsupported load spec type '{other}'"),
                ));
            }
            None => return Err(Error::pull(segment, "load spec has no type")),
        }
        let path = load_spec
            .get("path")
            .and_then(|p| p.as_str())
            .ok_or_else(|| Error::pull(segment, "local load spec has no path"))?;
        Ok(self.root.join(path))
    }
}

impl SegmentPuller for LocalDeepStoragePuller {
    fn pull(&self, segment: &SegmentReference, target_dir: &Path) -> Result<PathBuf> {
        let source = self.source_path(segment)?;
        if !source.exists() {
            return Err(Error::pull(
                segment,
                format!("no segment data at {}", source.display()),
            ));
        }

        fs::create_dir_all(target_dir).map_err(|e| Error::io(e, target_dir, "create_dir_all"))?;

        if source.is_dir() {
            let copied = copy_tree(&source, target_dir)?;
            tracing::debug!(
                segment = %segment,
                source = %source.display(),
                files = copied,
                "Copied segment directory"
            );
        } else if is_tar_zst(&source) {
            unpack_tar_zst(&source, target_dir)
                .map_err(|e| Error::pull(segment, format!("failed to unpack {}: {e}", source.display())))?;
            tracing::debug!(segment = %segment, source = %source.display(), "Unpacked segment archive");
        } else {
            return Err(Error::pull(
                segment,
                format!("unsupported segment artifact {}", source.display()),
            ));
        }

        Ok(target_dir.to_path_buf())
    }
}

fn is_tar_zst(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".tar.zst"))
}

fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
    let mut count = 0usize;
    for entry in walkdir::WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            Error::io(e.into(), path, "walk")
        })?;
        let p = entry.path();
        if p.is_dir() {
            continue;
        }
        let rel = p.strip_prefix(source).map_err(|_| {
            Error::configuration(format!(
                "path {} is not under {}",
                p.display(),
                source.display()
            ))
        })?;
        let dst = destination.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(e, parent, "create_dir_all"))?;
        }
        fs::copy(p, &dst).map_err(|e| Error::io(e, &dst, "copy"))?;
        count += 1;
    }
    Ok(count)
}

fn unpack_tar_zst(archive: &Path, destination: &Path) -> std::io::Result<()> {
    let file = fs::File::open(archive)?;
    let decoder = zstd::Decoder::new(file)?;
    tar::Archive::new(decoder).unpack(destination)
}

//! Integration test utilities for loom manifests

use anyhow::Result;
use lm_manifest::LoadedManifest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path of a checked-in fixture under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a checked-in fixture manifest
///
/// # Errors
///
/// Returns an error if the fixture cannot be read or does not load
pub fn load_fixture(name: &str) -> Result<LoadedManifest> {
    Ok(lm_manifest::load_file(&fixture_path(name))?)
}

/// Scratch directory for manifests written by a test
pub struct TestFixture {
    dir: TempDir,
    /// Manifests written so far
    pub files: Vec<PathBuf>,
}

impl TestFixture {
    /// Creates an empty fixture directory
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            files: Vec::new(),
        })
    }

    /// Writes a manifest into the fixture directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn add_manifest(&mut self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, contents)?;
        self.files.push(path.clone());
        Ok(path)
    }

    /// Writes a manifest and loads it back from disk
    ///
    /// # Errors
    ///
    /// Returns an error if writing or loading fails
    pub fn load(&mut self, name: &str, contents: &str) -> Result<LoadedManifest> {
        let path = self.add_manifest(name, contents)?;
        Ok(lm_manifest::load_file(&path)?)
    }
}

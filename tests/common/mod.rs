#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Two-row export from the form, with one duplicate mobile. The second row
/// should win on merge.
pub const DUPLICATE_EXPORT: &str = "Timestamp,Name,Tshirt,Size,Mobile\n\
    2024-01-01,Asha,Asha,M,9876543210\n\
    2024-01-02,Asha K,Asha,L,9876543210\n";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Path to a file that does not exist yet (e.g. a store the command
    /// should create).
    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Reads a workspace file to a string.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read temp file")
    }
}

/// Parses a store file written by the binary back into JSON values.
pub fn read_store_json(path: &Path) -> serde_json::Value {
    let contents = fs::read_to_string(path).expect("read store file");
    serde_json::from_str(&contents).expect("parse store JSON")
}

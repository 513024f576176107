//! Content pack access

use crate::error::Result;
use log::error;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";

/// Identity of an installed content pack
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackManifest {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.0.0".to_string()
}

impl PackManifest {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for PackManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// An installed content pack the host exposes for reading and writing
pub trait ContentPack {
    fn manifest(&self) -> &PackManifest;

    fn directory(&self) -> &Path;

    /// Read a file relative to the pack root; `Ok(None)` if it does not exist
    fn read_file(&self, relative: &str) -> Result<Option<String>>;

    fn write_file(&self, relative: &str, contents: &str) -> Result<()>;
}

/// A content pack on the local filesystem
#[derive(Debug, Clone)]
pub struct DirectoryPack {
    manifest: PackManifest,
    root: PathBuf,
}

impl DirectoryPack {
    /// Open a pack directory. The manifest is optional; without one the
    /// directory name is used.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let manifest = match read_optional(&root.join(MANIFEST_FILE))? {
            Some(text) => serde_json::from_str(&text)?,
            None => {
                let name = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| root.display().to_string());
                PackManifest::new(name, default_version())
            }
        };
        Ok(Self { manifest, root })
    }

    /// Open every sub-directory of `root` as a pack, in name order.
    /// Directories that fail to open are logged and skipped.
    pub fn discover(root: impl AsRef<Path>) -> Result<Vec<Self>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(root.as_ref())? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();

        let mut packs = Vec::with_capacity(dirs.len());
        for dir in dirs {
            match Self::open(&dir) {
                Ok(pack) => packs.push(pack),
                Err(e) => error!("Skipping pack at {}: {}", dir.display(), e),
            }
        }
        Ok(packs)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl ContentPack for DirectoryPack {
    fn manifest(&self) -> &PackManifest {
        &self.manifest
    }

    fn directory(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, relative: &str) -> Result<Option<String>> {
        read_optional(&self.root.join(relative))
    }

    fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

/// A content pack held in memory, for hosts that stream pack files
#[derive(Debug)]
pub struct MemoryPack {
    manifest: PackManifest,
    root: PathBuf,
    files: RefCell<HashMap<String, String>>,
}

impl MemoryPack {
    pub fn new(name: impl Into<String>) -> Self {
        let manifest = PackManifest::new(name, default_version());
        let root = PathBuf::from(&manifest.name);
        Self {
            manifest,
            root,
            files: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_file(self, relative: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(relative.into(), contents.into());
        self
    }

    pub fn file(&self, relative: &str) -> Option<String> {
        self.files.borrow().get(relative).cloned()
    }
}

impl ContentPack for MemoryPack {
    fn manifest(&self) -> &PackManifest {
        &self.manifest
    }

    fn directory(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, relative: &str) -> Result<Option<String>> {
        Ok(self.file(relative))
    }

    fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(relative.to_string(), contents.to_string());
        Ok(())
    }
}

//! Filesystem capability used by the builder and the walker.
//!
//! All side effects go through [`FileSystem`], so both components can run
//! against [`MemoryFs`] in tests and [`RealFs`] in production.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;
use indexmap::IndexMap;

use crate::node::NodeKind;

/// A directory entry as reported by [`FileSystem::list_entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    /// Entry name (not full path).
    pub name: CompactString,
    /// File or directory.
    pub kind: NodeKind,
}

impl FsEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<CompactString>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Operations the codec needs from a filesystem.
pub trait FileSystem {
    /// Check whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and any missing parents. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create an empty file unless one already exists.
    ///
    /// Never truncates. Returns `true` when a new file was created.
    fn create_file_if_absent(&self, path: &Path) -> io::Result<bool>;

    /// List the files and directories directly inside `path`.
    ///
    /// Entries that are neither regular files nor directories are omitted.
    fn list_entries(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

    /// Read at most `limit` bytes from the start of a file.
    fn read_prefix(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>>;

    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Resolve `path` to an absolute path without `.` or `..` components.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The real, disk-backed filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create_file_if_absent(&self, path: &Path) -> io::Result<bool> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                // Opening in append mode fails for directories and leaves files intact.
                OpenOptions::new().append(true).open(path)?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let kind = if file_type.is_dir() {
                NodeKind::Directory
            } else if file_type.is_file() {
                NodeKind::File
            } else {
                continue;
            };
            entries.push(FsEntry::new(entry.file_name().to_string_lossy(), kind));
        }
        Ok(entries)
    }

    fn read_prefix(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        File::open(path)?.take(limit).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

#[derive(Debug, Clone)]
enum MemEntry {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem double.
///
/// Directory listings come back in insertion order. Paths registered with
/// [`MemoryFs::fail_on`] reject every operation with `PermissionDenied`.
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: RefCell<IndexMap<PathBuf, MemEntry>>,
    failing: RefCell<HashSet<PathBuf>>,
}

impl MemoryFs {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and its missing parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let _ = self.create_dir_all(path.as_ref());
        self
    }

    /// Add a file with contents, creating missing parents.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.entries
            .borrow_mut()
            .insert(path.to_path_buf(), MemEntry::File(contents.into()));
        self
    }

    /// Make every operation on `path` fail.
    pub fn fail_on(&self, path: impl Into<PathBuf>) -> &Self {
        self.failing.borrow_mut().insert(path.into());
        self
    }

    /// Check whether `path` is a file.
    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        matches!(
            self.entries.borrow().get(path.as_ref()),
            Some(MemEntry::File(_))
        )
    }

    /// Contents of a file, if `path` is one.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.entries.borrow().get(path.as_ref()) {
            Some(MemEntry::File(data)) => Some(data.clone()),
            _ => None,
        }
    }

    /// All known paths, in creation order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.borrow().keys().cloned().collect()
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.failing.borrow().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.entries.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.entries.borrow().get(path), Some(MemEntry::Dir))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check(path)?;
        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        ancestors.reverse();

        let mut entries = self.entries.borrow_mut();
        for dir in ancestors {
            match entries.get(dir) {
                Some(MemEntry::Dir) => {}
                Some(MemEntry::File(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("not a directory: {}", dir.display()),
                    ));
                }
                None => {
                    entries.insert(dir.to_path_buf(), MemEntry::Dir);
                }
            }
        }
        Ok(())
    }

    fn create_file_if_absent(&self, path: &Path) -> io::Result<bool> {
        self.check(path)?;
        let mut entries = self.entries.borrow_mut();
        match entries.get(path) {
            Some(MemEntry::File(_)) => return Ok(false),
            Some(MemEntry::Dir) => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("is a directory: {}", path.display()),
                ));
            }
            None => {}
        }
        let parent_is_dir = path
            .parent()
            .is_some_and(|p| p.as_os_str().is_empty() || matches!(entries.get(p), Some(MemEntry::Dir)));
        if !parent_is_dir {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory missing: {}", path.display()),
            ));
        }
        entries.insert(path.to_path_buf(), MemEntry::File(Vec::new()));
        Ok(true)
    }

    fn list_entries(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        self.check(path)?;
        let entries = self.entries.borrow();
        match entries.get(path) {
            Some(MemEntry::Dir) => {}
            Some(MemEntry::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", path.display()),
                ));
            }
        }

        Ok(entries
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, entry)| {
                let name = p.file_name()?.to_string_lossy();
                let kind = match entry {
                    MemEntry::Dir => NodeKind::Directory,
                    MemEntry::File(_) => NodeKind::File,
                };
                Some(FsEntry::new(name, kind))
            })
            .collect())
    }

    fn read_prefix(&self, path: &Path, limit: u64) -> io::Result<Vec<u8>> {
        self.check(path)?;
        match self.entries.borrow().get(path) {
            Some(MemEntry::File(data)) => {
                let end = data.len().min(usize::try_from(limit).unwrap_or(usize::MAX));
                Ok(data[..end].to_vec())
            }
            Some(MemEntry::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )),
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let data = self.read_prefix(path, u64::MAX)?;
        String::from_utf8(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Lexical resolution against `/`; there are no links to follow.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let mut resolved = PathBuf::from("/");
        for component in path.components() {
            match component {
                Component::Normal(name) => resolved.push(name),
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        if !self.exists(&resolved) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such path: {}", path.display()),
            ));
        }
        Ok(resolved)
    }
}

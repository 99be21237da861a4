//! Owning storage for every loaded file
//!
//! Collections, brain structures and the spec file manifest refer to files
//! by [`FileId`]; the arena is the only owner.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use imcortex_io::DataFile;

/// Handle of a file held by a [`FileArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

#[derive(Debug)]
struct ArenaEntry {
    file: Box<dyn DataFile>,
    /// Set for dynamic companions
    parent: Option<FileId>,
    /// Path on disk when it differs from the file name
    source: Option<String>,
}

/// Arena of loaded files keyed by [`FileId`]
#[derive(Debug, Default)]
pub struct FileArena {
    entries: BTreeMap<FileId, ArenaEntry>,
    next_id: u64,
}

impl FileArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> FileId {
        self.next_id += 1;
        FileId(self.next_id)
    }

    /// Take ownership of a file
    pub fn insert(&mut self, file: Box<dyn DataFile>) -> FileId {
        let id = self.allocate();
        self.entries.insert(
            id,
            ArenaEntry {
                file,
                parent: None,
                source: None,
            },
        );
        id
    }

    /// Take ownership of a companion created for `parent`
    pub fn insert_companion(&mut self, file: Box<dyn DataFile>, parent: FileId) -> FileId {
        let id = self.allocate();
        self.entries.insert(
            id,
            ArenaEntry {
                file,
                parent: Some(parent),
                source: None,
            },
        );
        id
    }

    pub fn get(&self, id: FileId) -> Option<&dyn DataFile> {
        self.entries.get(&id).map(|e| e.file.as_ref())
    }

    pub fn get_mut(&mut self, id: FileId) -> Option<&mut (dyn DataFile + 'static)> {
        self.entries.get_mut(&id).map(|e| e.file.as_mut())
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Release ownership of a file
    pub fn remove(&mut self, id: FileId) -> Option<Box<dyn DataFile>> {
        self.entries.remove(&id).map(|e| e.file)
    }

    /// Swap in new content for a registered file, returning the old content
    pub fn replace(&mut self, id: FileId, file: Box<dyn DataFile>) -> Option<Box<dyn DataFile>> {
        let entry = self.entries.get_mut(&id)?;
        Some(std::mem::replace(&mut entry.file, file))
    }

    /// Record where a file was read from when its name no longer says so
    pub fn set_source(&mut self, id: FileId, source: Option<String>) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.source = source;
        }
    }

    /// Path a file is read from and written to: the recorded source, else
    /// the file name
    pub fn source_of(&self, id: FileId) -> Option<&str> {
        self.entries
            .get(&id)
            .map(|e| e.source.as_deref().unwrap_or_else(|| e.file.file_name()))
    }

    /// Parent of a dynamic companion
    pub fn parent_of(&self, id: FileId) -> Option<FileId> {
        self.entries.get(&id).and_then(|e| e.parent)
    }

    /// Companion created for `parent`
    pub fn companion_of(&self, parent: FileId) -> Option<FileId> {
        self.entries
            .iter()
            .find(|(_, e)| e.parent == Some(parent))
            .map(|(id, _)| *id)
    }

    pub fn ids(&self) -> impl Iterator<Item = FileId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imcortex_io::files::{DynamicConnectivityFile, SurfaceFile};
    use imcortex_io::DataFileType;

    #[test]
    fn test_insert_replace_remove() {
        let mut arena = FileArena::new();
        let id = arena.insert(Box::new(SurfaceFile::new()));
        assert!(arena.contains(id));

        let mut replacement = SurfaceFile::new();
        replacement.set_file_name("/d/b.surf.gii");
        let old = arena.replace(id, Box::new(replacement)).unwrap();
        assert_eq!(old.file_name(), "");
        assert_eq!(arena.get(id).map(|f| f.file_name()), Some("/d/b.surf.gii"));

        assert_eq!(arena.source_of(id), Some("/d/b.surf.gii"));
        arena.set_source(id, Some("/d/a.surf.gii".to_string()));
        arena.replace(id, Box::new(SurfaceFile::new()));
        assert_eq!(arena.source_of(id), Some("/d/a.surf.gii"));

        assert!(arena.remove(id).is_some());
        assert!(arena.is_empty());
        assert_eq!(arena.source_of(id), None);
        assert!(arena.replace(id, Box::new(SurfaceFile::new())).is_none());
    }

    #[test]
    fn test_companion_links() {
        let mut arena = FileArena::new();
        let parent = arena.insert(Box::new(SurfaceFile::new()));
        let companion = arena.insert_companion(
            Box::new(DynamicConnectivityFile::new(
                DataFileType::MetricDynamic,
                "/d/a.func.gii",
                false,
            )),
            parent,
        );
        assert_eq!(arena.parent_of(companion), Some(parent));
        assert_eq!(arena.companion_of(parent), Some(companion));
        assert_eq!(arena.parent_of(parent), None);
        let ids: Vec<FileId> = arena.ids().collect();
        assert_eq!(ids, vec![parent, companion]);
    }
}

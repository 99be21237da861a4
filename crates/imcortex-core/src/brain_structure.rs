//! Per-structure collections of surfaces and surface-mapped files

use imcortex_io::{DataFile, DataFileType, Structure};
use imcortex_scene::{SceneAttributes, SceneClass};

use crate::arena::{FileArena, FileId};
use crate::error::{BrainError, BrainResult};

/// Name fragments that identify an anatomical surface, most preferred first
const ANATOMICAL_NAME_PREFERENCE: [&[&str]; 5] = [
    &["midthickness"],
    &["white", "gray_white", "graywhite"],
    &["pial"],
    &["anatomical"],
    &["fiducial"],
];

/// Surfaces, labels, metrics and RGBA files of one anatomical structure.
///
/// Every file reports the same vertex count, taken from the first surface
/// and kept for as long as any file remains.
#[derive(Debug, Clone)]
pub struct BrainStructure {
    structure: Structure,
    number_of_nodes: usize,
    surfaces: Vec<FileId>,
    label_files: Vec<FileId>,
    metric_files: Vec<FileId>,
    rgba_files: Vec<FileId>,
    primary_anatomical_surface: Option<FileId>,
}

impl BrainStructure {
    pub fn new(structure: Structure) -> Self {
        Self {
            structure,
            number_of_nodes: 0,
            surfaces: Vec::new(),
            label_files: Vec::new(),
            metric_files: Vec::new(),
            rgba_files: Vec::new(),
            primary_anatomical_surface: None,
        }
    }

    pub fn structure(&self) -> Structure {
        self.structure
    }

    /// Vertex count shared by every file (0 while the structure is empty)
    pub fn number_of_nodes(&self) -> usize {
        self.number_of_nodes
    }

    pub fn surfaces(&self) -> &[FileId] {
        &self.surfaces
    }

    pub fn label_files(&self) -> &[FileId] {
        &self.label_files
    }

    pub fn metric_files(&self) -> &[FileId] {
        &self.metric_files
    }

    pub fn rgba_files(&self) -> &[FileId] {
        &self.rgba_files
    }

    pub fn has_surfaces(&self) -> bool {
        !self.surfaces.is_empty()
    }

    /// Every file, surfaces first
    pub fn all_files(&self) -> Vec<FileId> {
        self.surfaces
            .iter()
            .chain(&self.label_files)
            .chain(&self.metric_files)
            .chain(&self.rgba_files)
            .copied()
            .collect()
    }

    pub fn number_of_files(&self) -> usize {
        self.surfaces.len() + self.label_files.len() + self.metric_files.len() + self.rgba_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.number_of_files() == 0
    }

    pub fn contains(&self, id: FileId) -> bool {
        self.all_files().contains(&id)
    }

    /// Check that a file may join this structure
    pub fn validate_file(&self, file: &dyn DataFile) -> BrainResult<()> {
        let file_type = file.data_file_type();
        if !file_type.is_structure_scoped() {
            return Err(BrainError::program(format!(
                "{file_type} files do not belong to brain structures"
            )));
        }
        if file.structure() != self.structure {
            return Err(BrainError::StructureMismatch {
                path: file.file_name().to_string(),
                file_structure: file.structure(),
                structure: self.structure,
            });
        }
        if file_type != DataFileType::Surface && self.surfaces.is_empty() {
            return Err(BrainError::SurfaceRequired {
                path: file.file_name().to_string(),
                file_type,
                structure: self.structure,
            });
        }
        if !self.is_empty() && file.number_of_nodes() != self.number_of_nodes {
            return Err(BrainError::NodeCountMismatch {
                path: file.file_name().to_string(),
                file_type,
                structure: self.structure,
                file_nodes: file.number_of_nodes(),
                structure_nodes: self.number_of_nodes,
            });
        }
        Ok(())
    }

    /// Add a file that passed [`BrainStructure::validate_file`]
    pub fn add_file(&mut self, id: FileId, file: &dyn DataFile) -> BrainResult<()> {
        self.validate_file(file)?;
        if self.is_empty() {
            self.number_of_nodes = file.number_of_nodes();
        }
        match file.data_file_type() {
            DataFileType::Surface => self.surfaces.push(id),
            DataFileType::Label => self.label_files.push(id),
            DataFileType::Metric => self.metric_files.push(id),
            DataFileType::Rgba => self.rgba_files.push(id),
            other => {
                return Err(BrainError::program(format!(
                    "{other} files do not belong to brain structures"
                )))
            }
        }
        Ok(())
    }

    /// Remove a file; returns false if it was not here
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let mut removed = false;
        for list in [
            &mut self.surfaces,
            &mut self.label_files,
            &mut self.metric_files,
            &mut self.rgba_files,
        ] {
            let before = list.len();
            list.retain(|f| *f != id);
            removed |= list.len() != before;
        }
        if self.primary_anatomical_surface == Some(id) {
            self.primary_anatomical_surface = None;
        }
        if self.is_empty() {
            self.number_of_nodes = 0;
        }
        removed
    }

    pub fn set_primary_anatomical_surface(&mut self, id: FileId) {
        if self.surfaces.contains(&id) {
            self.primary_anatomical_surface = Some(id);
        }
    }

    /// Surface used for anatomical display: the explicit choice, else the
    /// best match by name, else the first surface
    pub fn primary_anatomical_surface(&self, arena: &FileArena) -> Option<FileId> {
        if let Some(id) = self.primary_anatomical_surface {
            if self.surfaces.contains(&id) {
                return Some(id);
            }
        }
        for fragments in ANATOMICAL_NAME_PREFERENCE {
            let found = self.surfaces.iter().copied().find(|id| {
                arena.get(*id).is_some_and(|f| {
                    let name = f.file_name_no_path().to_lowercase();
                    fragments.iter().any(|frag| name.contains(frag))
                })
            });
            if found.is_some() {
                return found;
            }
        }
        self.surfaces.first().copied()
    }

    pub fn save_to_scene(
        &self,
        arena: &FileArena,
        _attributes: &SceneAttributes,
        instance_name: &str,
    ) -> SceneClass {
        let mut class = SceneClass::new(instance_name, "BrainStructure", 1);
        class.add_integer("numberOfNodes", self.number_of_nodes as i64);
        class.add_enumerated_type("m_structure", self.structure.name());
        if let Some(file) = self
            .primary_anatomical_surface(arena)
            .and_then(|id| arena.get(id))
        {
            class.add_path_name("primaryAnatomicalSurface", file.file_name());
        }
        class
    }

    /// True if a saved class describes this structure
    pub fn matches_scene_class(&self, class: &SceneClass) -> bool {
        let structure = class
            .get_enumerated_type_name("m_structure")
            .and_then(Structure::from_name);
        let nodes = class.get_integer_value("numberOfNodes", -1);
        structure == Some(self.structure)
            && usize::try_from(nodes).is_ok_and(|n| n == self.number_of_nodes)
    }

    pub fn restore_from_scene(
        &mut self,
        arena: &FileArena,
        attributes: &mut SceneAttributes,
        class: &SceneClass,
    ) {
        let saved = class.get_path_name_value("primaryAnatomicalSurface", "");
        if saved.is_empty() {
            return;
        }
        let saved_no_path = imcortex_io::file_name_no_path(&saved);
        let by_full = self
            .surfaces
            .iter()
            .copied()
            .find(|id| arena.get(*id).is_some_and(|f| f.file_name() == saved));
        let found = by_full.or_else(|| {
            self.surfaces
                .iter()
                .copied()
                .find(|id| arena.get(*id).is_some_and(|f| f.file_name_no_path() == saved_no_path))
        });
        match found {
            Some(id) => self.primary_anatomical_surface = Some(id),
            None => attributes.add_to_error_message(format!(
                "Primary anatomical surface {saved} for {} is not loaded",
                self.structure
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imcortex_io::files::node_data::NodeDataContent;
    use imcortex_io::files::surface::SurfaceContent;
    use imcortex_io::files::{NodeDataFile, SurfaceFile};

    fn surface(name: &str, nodes: usize) -> SurfaceFile {
        SurfaceFile::with_content(
            name,
            SurfaceContent {
                structure: Structure::CortexLeft,
                number_of_nodes: nodes,
                ..Default::default()
            },
        )
    }

    fn node_data(file_type: DataFileType, nodes: usize) -> NodeDataFile {
        NodeDataFile::with_content(
            file_type,
            "/d/x.gii",
            NodeDataContent {
                structure: Structure::CortexLeft,
                number_of_nodes: nodes,
                map_names: vec!["m".to_string()],
            },
        )
    }

    #[test]
    fn test_first_surface_sets_node_count() {
        let mut arena = FileArena::new();
        let mut bs = BrainStructure::new(Structure::CortexLeft);
        let s = surface("/d/lh.pial.surf.gii", 32492);
        let id = arena.insert(Box::new(s.clone()));
        bs.add_file(id, &s).unwrap();
        assert_eq!(bs.number_of_nodes(), 32492);

        let bad = surface("/d/lh.inflated.surf.gii", 100);
        assert!(matches!(
            bs.validate_file(&bad),
            Err(BrainError::NodeCountMismatch { file_nodes: 100, structure_nodes: 32492, .. })
        ));
    }

    #[test]
    fn test_node_count_outlives_last_surface() {
        let mut arena = FileArena::new();
        let mut bs = BrainStructure::new(Structure::CortexLeft);
        let s = surface("/d/lh.pial.surf.gii", 100);
        let sid = arena.insert(Box::new(s.clone()));
        bs.add_file(sid, &s).unwrap();
        let m = node_data(DataFileType::Metric, 100);
        let mid = arena.insert(Box::new(m.clone()));
        bs.add_file(mid, &m).unwrap();

        bs.remove_file(sid);
        assert_eq!(bs.number_of_nodes(), 100);
        let smaller = surface("/d/lh.white.surf.gii", 50);
        assert!(matches!(
            bs.validate_file(&smaller),
            Err(BrainError::NodeCountMismatch { file_nodes: 50, structure_nodes: 100, .. })
        ));
        assert!(bs.validate_file(&surface("/d/lh.white.surf.gii", 100)).is_ok());
    }

    #[test]
    fn test_label_requires_surface() {
        let bs = BrainStructure::new(Structure::CortexLeft);
        assert!(matches!(
            bs.validate_file(&node_data(DataFileType::Label, 10)),
            Err(BrainError::SurfaceRequired { .. })
        ));
    }

    #[test]
    fn test_structure_mismatch() {
        let bs = BrainStructure::new(Structure::CortexRight);
        assert!(matches!(
            bs.validate_file(&surface("/d/lh.surf.gii", 5)),
            Err(BrainError::StructureMismatch { .. })
        ));
    }

    #[test]
    fn test_primary_anatomical_surface_heuristic() {
        let mut arena = FileArena::new();
        let mut bs = BrainStructure::new(Structure::CortexLeft);
        for name in ["/d/lh.inflated.surf.gii", "/d/lh.pial.surf.gii", "/d/lh.white.surf.gii"] {
            let s = surface(name, 5);
            let id = arena.insert(Box::new(s.clone()));
            bs.add_file(id, &s).unwrap();
        }
        let primary = bs.primary_anatomical_surface(&arena).unwrap();
        assert_eq!(arena.get(primary).unwrap().file_name(), "/d/lh.white.surf.gii");

        let s = surface("/d/lh.midthickness.surf.gii", 5);
        let mid = arena.insert(Box::new(s.clone()));
        bs.add_file(mid, &s).unwrap();
        assert_eq!(bs.primary_anatomical_surface(&arena), Some(mid));

        let first = bs.surfaces()[0];
        bs.set_primary_anatomical_surface(first);
        assert_eq!(bs.primary_anatomical_surface(&arena), Some(first));
    }

    #[test]
    fn test_remove_and_scene_round_trip() {
        let mut arena = FileArena::new();
        let mut bs = BrainStructure::new(Structure::CortexLeft);
        let s = surface("/d/lh.pial.surf.gii", 5);
        let sid = arena.insert(Box::new(s.clone()));
        bs.add_file(sid, &s).unwrap();
        let m = node_data(DataFileType::Metric, 5);
        let mid = arena.insert(Box::new(m.clone()));
        bs.add_file(mid, &m).unwrap();
        assert_eq!(bs.all_files(), vec![sid, mid]);

        let class = bs.save_to_scene(&arena, &SceneAttributes::default(), "bs");
        assert!(bs.matches_scene_class(&class));

        let mut restored = bs.clone();
        restored.primary_anatomical_surface = None;
        let mut attrs = SceneAttributes::default();
        restored.restore_from_scene(&arena, &mut attrs, &class);
        assert_eq!(restored.primary_anatomical_surface, Some(sid));

        assert!(bs.remove_file(mid));
        assert!(!bs.remove_file(mid));
        assert!(bs.remove_file(sid));
        assert!(bs.is_empty());
        assert_eq!(bs.number_of_nodes(), 0);
    }
}

//! The interface every loadable file implements

use std::fmt;

use imcortex_scene::{Scene, SceneAttributes, SceneClass};

use crate::context::{file_name_no_path, ReadContext};
use crate::error::IoResult;
use crate::file_type::DataFileType;
use crate::files::coloring::PaletteColoring;
use crate::hierarchy::GroupAndNameHierarchy;
use crate::structure::Structure;

/// A loadable data file.
///
/// The brain core works with files only through this trait: it reads and
/// writes them, tracks their modification status and asks the accessors
/// below whether a file takes part in validation, models and scenes. Kinds
/// that have no use for an accessor keep the default.
pub trait DataFile: fmt::Debug + Send {
    /// Category of this file
    fn data_file_type(&self) -> DataFileType;

    /// Full path or URL
    fn file_name(&self) -> &str;

    fn set_file_name(&mut self, file_name: &str);

    /// File name without directory
    fn file_name_no_path(&self) -> String {
        file_name_no_path(self.file_name())
    }

    /// Anatomical structure the file models
    fn structure(&self) -> Structure {
        Structure::Invalid
    }

    /// Override the file's structure; kinds without a structure ignore it
    fn set_structure(&mut self, _structure: Structure) {}

    fn is_modified(&self) -> bool;

    fn set_modified(&mut self);

    fn clear_modified(&mut self);

    /// True when the user changed palette coloring since the last read
    fn is_modified_palette_coloring(&self) -> bool {
        false
    }

    /// Palette assignment of files colored through a palette
    fn palette_coloring_mut(&mut self) -> Option<&mut PaletteColoring> {
        None
    }

    /// True when the file holds no data
    fn is_empty(&self) -> bool;

    fn number_of_maps(&self) -> usize {
        0
    }

    /// Vertex count for surface-mapped files
    fn number_of_nodes(&self) -> usize {
        0
    }

    /// Brainordinates per surface structure for CIFTI files
    fn brainordinate_counts(&self) -> Vec<(Structure, usize)> {
        Vec::new()
    }

    /// True if the file can be shown in volume slices
    fn is_volume_mappable(&self) -> bool {
        false
    }

    /// Line/matrix chart support in the original chart model
    fn supports_chart_one(&self) -> bool {
        false
    }

    /// Support for the layered chart model
    fn supports_chart_two(&self) -> bool {
        false
    }

    /// Replace the content with the file at `path`
    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()>;

    /// Write the content to `path`
    fn write_file(&mut self, path: &str) -> IoResult<()>;

    /// Remove all content, keeping the file name
    fn clear(&mut self);

    fn name_hierarchy(&self) -> Option<&GroupAndNameHierarchy> {
        None
    }

    fn name_hierarchy_mut(&mut self) -> Option<&mut GroupAndNameHierarchy> {
        None
    }

    /// Name of the fiber orientation file a trajectory file was computed from
    fn fiber_orientation_file_name(&self) -> Option<&str> {
        None
    }

    /// Record which loaded orientation file a trajectory file uses
    fn set_matched_fiber_orientation(&mut self, _file_name: Option<String>) {}

    fn matched_fiber_orientation(&self) -> Option<&str> {
        None
    }

    /// Substitution names and their values, for annotation text layers
    fn text_substitutions(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Type of the dynamic companion this file needs, if any
    fn dynamic_companion_type(&self) -> Option<DataFileType> {
        None
    }

    /// Enable or disable a dynamic companion as a display layer
    fn set_enabled_as_layer(&mut self, _enabled: bool) {}

    fn is_enabled_as_layer(&self) -> bool {
        false
    }

    /// Recompute coloring after palettes or map data changed
    fn update_coloring(&mut self) {}

    /// Scenes held by a scene file
    fn scenes(&self) -> &[Scene] {
        &[]
    }

    /// Store a scene, replacing one with the same name. Returns false for
    /// kinds that cannot hold scenes.
    fn replace_scene(&mut self, _scene: Scene) -> bool {
        false
    }

    /// Save view state; `None` when the file has nothing to save
    fn save_to_scene(
        &self,
        _attributes: &SceneAttributes,
        _instance_name: &str,
    ) -> Option<SceneClass> {
        None
    }

    /// Restore view state saved by [`DataFile::save_to_scene`]
    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, _class: &SceneClass) {}
}

/// State shared by every file kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBase {
    pub file_name: String,
    pub modified: bool,
}

impl FileBase {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            modified: false,
        }
    }

    /// Scene class for a file of `file_type` named by its instance name
    pub fn scene_class(&self, file_type: DataFileType, instance_name: &str) -> SceneClass {
        SceneClass::new(instance_name, file_type.name(), 1)
    }
}

/// Implements the file-name and modification-status members of
/// [`DataFile`] for a struct with a `base: FileBase` field
#[macro_export]
macro_rules! impl_file_base {
    () => {
        fn file_name(&self) -> &str {
            &self.base.file_name
        }

        fn set_file_name(&mut self, file_name: &str) {
            self.base.file_name = file_name.to_string();
        }

        fn is_modified(&self) -> bool {
            self.base.modified
        }

        fn set_modified(&mut self) {
            self.base.modified = true;
        }
    };
}

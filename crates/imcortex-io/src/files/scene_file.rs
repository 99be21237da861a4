//! Scene files: named collections of scenes

use serde::{Deserialize, Serialize};

use imcortex_scene::Scene;

use crate::codec::{read_document, write_document};
use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::IoResult;
use crate::file_type::DataFileType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFileContent {
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// A file holding scenes
#[derive(Debug, Clone, Default)]
pub struct SceneFile {
    base: FileBase,
    content: SceneFileContent,
}

impl SceneFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(file_name: &str) -> Self {
        Self {
            base: FileBase::new(file_name),
            content: SceneFileContent::default(),
        }
    }

    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.content.scenes.iter().find(|s| s.name == name)
    }
}

impl DataFile for SceneFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        DataFileType::Scene
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        self.content.scenes.is_empty()
    }

    fn read_file(&mut self, path: &str, ctx: &ReadContext) -> IoResult<()> {
        self.content = read_document(path, DataFileType::Scene, ctx)?;
        self.base.file_name = path.to_string();
        Ok(())
    }

    fn write_file(&mut self, path: &str) -> IoResult<()> {
        write_document(path, DataFileType::Scene, &self.content)
    }

    fn clear(&mut self) {
        self.content = SceneFileContent::default();
    }

    fn scenes(&self) -> &[Scene] {
        &self.content.scenes
    }

    fn replace_scene(&mut self, scene: Scene) -> bool {
        match self.content.scenes.iter_mut().find(|s| s.name == scene.name) {
            Some(existing) => *existing = scene,
            None => self.content.scenes.push(scene),
        }
        self.base.modified = true;
        true
    }
}

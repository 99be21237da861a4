//! Dynamic connectivity companions
//!
//! A companion computes connectivity on the fly from its parent's maps. It
//! has no file of its own: it is named after its parent and cannot be read
//! or written.

use imcortex_scene::{SceneAttributes, SceneClass};

use crate::context::ReadContext;
use crate::data_file::{DataFile, FileBase};
use crate::error::{IoError, IoResult};
use crate::file_type::DataFileType;

/// Companion of a metric, volume or dense time series file
#[derive(Debug, Clone)]
pub struct DynamicConnectivityFile {
    file_type: DataFileType,
    base: FileBase,
    parent_file_name: String,
    enabled_as_layer: bool,
}

impl DynamicConnectivityFile {
    pub fn new(file_type: DataFileType, parent_file_name: &str, enabled_as_layer: bool) -> Self {
        debug_assert!(file_type.is_dynamic());
        Self {
            file_type,
            base: FileBase::new(format!("{parent_file_name}.dynconn")),
            parent_file_name: parent_file_name.to_string(),
            enabled_as_layer,
        }
    }

    pub fn parent_file_name(&self) -> &str {
        &self.parent_file_name
    }
}

impl DataFile for DynamicConnectivityFile {
    crate::impl_file_base!();

    fn data_file_type(&self) -> DataFileType {
        self.file_type
    }

    fn clear_modified(&mut self) {
        self.base.modified = false;
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn supports_chart_two(&self) -> bool {
        self.file_type == DataFileType::ConnectivityDenseDynamic
    }

    fn read_file(&mut self, _path: &str, _ctx: &ReadContext) -> IoResult<()> {
        Err(IoError::NotImplemented {
            file_type: self.file_type,
            operation: "Reading".to_string(),
        })
    }

    fn write_file(&mut self, _path: &str) -> IoResult<()> {
        Err(IoError::NotImplemented {
            file_type: self.file_type,
            operation: "Writing".to_string(),
        })
    }

    fn clear(&mut self) {}

    fn set_enabled_as_layer(&mut self, enabled: bool) {
        if enabled != self.enabled_as_layer {
            self.enabled_as_layer = enabled;
            self.base.modified = true;
        }
    }

    fn is_enabled_as_layer(&self) -> bool {
        self.enabled_as_layer
    }

    fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> Option<SceneClass> {
        let mut class = self.base.scene_class(self.file_type, instance_name);
        class.add_boolean("enabledAsLayer", self.enabled_as_layer);
        Some(class)
    }

    fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        self.enabled_as_layer = class.get_boolean_value("enabledAsLayer", self.enabled_as_layer);
    }
}

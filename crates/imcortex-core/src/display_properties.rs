//! Display properties shared by all files of a category

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderDisplay {
    pub displayed: bool,
    pub line_width: f64,
}

impl Default for BorderDisplay {
    fn default() -> Self {
        Self {
            displayed: true,
            line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FociDisplay {
    pub displayed: bool,
    pub size: f64,
}

impl Default for FociDisplay {
    fn default() -> Self {
        Self {
            displayed: true,
            size: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDisplay {
    pub opacity: f64,
    pub show_outline: bool,
}

impl Default for VolumeDisplay {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            show_outline: false,
        }
    }
}

/// The display property singletons of a brain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayProperties {
    pub borders: BorderDisplay,
    pub foci: FociDisplay,
    pub volume: VolumeDisplay,
    pub annotations_displayed: bool,
}

impl DisplayProperties {
    pub fn new() -> Self {
        Self {
            annotations_displayed: true,
            ..Default::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> SceneClass {
        let mut class = SceneClass::new(instance_name, "DisplayProperties", 1);
        class.add_boolean("bordersDisplayed", self.borders.displayed);
        class.add_float("borderLineWidth", self.borders.line_width);
        class.add_boolean("fociDisplayed", self.foci.displayed);
        class.add_float("fociSize", self.foci.size);
        class.add_float("volumeOpacity", self.volume.opacity);
        class.add_boolean("volumeShowOutline", self.volume.show_outline);
        class.add_boolean("annotationsDisplayed", self.annotations_displayed);
        class
    }

    /// Values missing from the scene fall back to the defaults
    pub fn restore_from_scene(&mut self, _attributes: &mut SceneAttributes, class: &SceneClass) {
        let defaults = Self::new();
        self.borders.displayed = class.get_boolean_value("bordersDisplayed", defaults.borders.displayed);
        self.borders.line_width = class.get_float_value("borderLineWidth", defaults.borders.line_width);
        self.foci.displayed = class.get_boolean_value("fociDisplayed", defaults.foci.displayed);
        self.foci.size = class.get_float_value("fociSize", defaults.foci.size);
        self.volume.opacity = class.get_float_value("volumeOpacity", defaults.volume.opacity);
        self.volume.show_outline =
            class.get_boolean_value("volumeShowOutline", defaults.volume.show_outline);
        self.annotations_displayed =
            class.get_boolean_value("annotationsDisplayed", defaults.annotations_displayed);
    }
}

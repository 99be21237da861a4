//! Palette coloring state of mapped files

use serde::{Deserialize, Serialize};

use imcortex_scene::SceneClass;

pub const DEFAULT_PALETTE: &str = "ROY-BIG-BL";

/// Palette assignment and coloring status for one mapped file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColoring {
    pub palette_name: String,
    pub selected_map: usize,
    /// Set when the user (or a restored scene) changes the palette
    #[serde(skip)]
    modified: bool,
    /// Bumped each time coloring is recomputed
    #[serde(skip)]
    generation: u64,
}

impl Default for PaletteColoring {
    fn default() -> Self {
        Self {
            palette_name: DEFAULT_PALETTE.to_string(),
            selected_map: 0,
            modified: false,
            generation: 0,
        }
    }
}

impl PaletteColoring {
    pub fn set_palette_name(&mut self, palette_name: impl Into<String>) {
        self.palette_name = palette_name.into();
        self.modified = true;
    }

    pub fn select_map(&mut self, map_index: usize) {
        self.selected_map = map_index;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn recompute(&mut self) {
        self.generation += 1;
    }

    pub fn save_to_scene(&self, class: &mut SceneClass) {
        class.add_string("paletteName", self.palette_name.as_str());
        class.add_integer("selectedMapIndex", self.selected_map as i64);
    }

    /// Restoring a palette from a scene counts as a coloring change so the
    /// file is never silently reused by a later scene
    pub fn restore_from_scene(&mut self, class: &SceneClass, number_of_maps: usize) {
        if class.contains("paletteName") {
            let name = class.get_string_value("paletteName", DEFAULT_PALETTE);
            self.set_palette_name(name);
        }
        let index = class.get_integer_value("selectedMapIndex", 0);
        if let Ok(index) = usize::try_from(index) {
            if index < number_of_maps {
                self.selected_map = index;
            }
        }
    }
}

//! Anatomical structure tags

use std::fmt;

use serde::{Deserialize, Serialize};

/// Anatomical structure a file or brain structure models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Structure {
    All,
    AllGreyMatter,
    AllWhiteMatter,
    CortexLeft,
    CortexRight,
    Cerebellum,
    CerebellumLeft,
    CerebellumRight,
    HippocampusLeft,
    HippocampusRight,
    ThalamusLeft,
    ThalamusRight,
    Other,
    #[default]
    Invalid,
}

impl Structure {
    /// Every structure, in declaration order
    pub const ALL_STRUCTURES: [Structure; 14] = [
        Structure::All,
        Structure::AllGreyMatter,
        Structure::AllWhiteMatter,
        Structure::CortexLeft,
        Structure::CortexRight,
        Structure::Cerebellum,
        Structure::CerebellumLeft,
        Structure::CerebellumRight,
        Structure::HippocampusLeft,
        Structure::HippocampusRight,
        Structure::ThalamusLeft,
        Structure::ThalamusRight,
        Structure::Other,
        Structure::Invalid,
    ];

    /// Name used in files and scenes
    pub fn name(&self) -> &'static str {
        match self {
            Structure::All => "ALL",
            Structure::AllGreyMatter => "ALL_GREY_MATTER",
            Structure::AllWhiteMatter => "ALL_WHITE_MATTER",
            Structure::CortexLeft => "CORTEX_LEFT",
            Structure::CortexRight => "CORTEX_RIGHT",
            Structure::Cerebellum => "CEREBELLUM",
            Structure::CerebellumLeft => "CEREBELLUM_LEFT",
            Structure::CerebellumRight => "CEREBELLUM_RIGHT",
            Structure::HippocampusLeft => "HIPPOCAMPUS_LEFT",
            Structure::HippocampusRight => "HIPPOCAMPUS_RIGHT",
            Structure::ThalamusLeft => "THALAMUS_LEFT",
            Structure::ThalamusRight => "THALAMUS_RIGHT",
            Structure::Other => "OTHER",
            Structure::Invalid => "INVALID",
        }
    }

    /// Name shown to the user
    pub fn gui_name(&self) -> &'static str {
        match self {
            Structure::All => "All",
            Structure::AllGreyMatter => "All Grey Matter",
            Structure::AllWhiteMatter => "All White Matter",
            Structure::CortexLeft => "CortexLeft",
            Structure::CortexRight => "CortexRight",
            Structure::Cerebellum => "Cerebellum",
            Structure::CerebellumLeft => "CerebellumLeft",
            Structure::CerebellumRight => "CerebellumRight",
            Structure::HippocampusLeft => "HippocampusLeft",
            Structure::HippocampusRight => "HippocampusRight",
            Structure::ThalamusLeft => "ThalamusLeft",
            Structure::ThalamusRight => "ThalamusRight",
            Structure::Other => "Other",
            Structure::Invalid => "Invalid",
        }
    }

    /// Parse a structure from its name or GUI name
    pub fn from_name(name: &str) -> Option<Structure> {
        Self::ALL_STRUCTURES
            .iter()
            .copied()
            .find(|s| s.name() == name || s.gui_name() == name)
    }

    pub fn is_valid(&self) -> bool {
        *self != Structure::Invalid
    }

    /// True for structures that may own surfaces
    pub fn is_single_structure(&self) -> bool {
        !matches!(
            self,
            Structure::All
                | Structure::AllGreyMatter
                | Structure::AllWhiteMatter
                | Structure::Invalid
        )
    }

    pub fn is_left(&self) -> bool {
        matches!(
            self,
            Structure::CortexLeft
                | Structure::CerebellumLeft
                | Structure::HippocampusLeft
                | Structure::ThalamusLeft
        )
    }

    pub fn is_right(&self) -> bool {
        matches!(
            self,
            Structure::CortexRight
                | Structure::CerebellumRight
                | Structure::HippocampusRight
                | Structure::ThalamusRight
        )
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gui_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for s in Structure::ALL_STRUCTURES {
            assert_eq!(Structure::from_name(s.name()), Some(s));
            assert_eq!(Structure::from_name(s.gui_name()), Some(s));
        }
        assert_eq!(Structure::from_name("NOT_A_STRUCTURE"), None);
    }

    #[test]
    fn test_structure_predicates() {
        assert!(Structure::CortexLeft.is_left());
        assert!(Structure::CerebellumRight.is_right());
        assert!(!Structure::Invalid.is_valid());
        assert!(!Structure::All.is_single_structure());
        assert!(Structure::Cerebellum.is_single_structure());
    }

    #[test]
    fn test_serde_uses_file_names() {
        let json = serde_json::to_string(&Structure::CortexLeft).unwrap();
        assert_eq!(json, "\"CORTEX_LEFT\"");
    }
}

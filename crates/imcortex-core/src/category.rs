//! Per-category load policy
//!
//! One generic add/read/reload routine serves every file category. What
//! differs between categories is captured here, once per type.

use imcortex_io::{new_data_file, DataFile, DataFileType};

/// Whether a category can go through the generic add/read/reload routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Add, read and reload are available
    Supported,
    /// Rejected with an "unsupported" error
    NotImplemented,
    /// Reaching the routine means the caller broke a contract
    ProgramError,
}

/// How the generic routine treats one file category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPolicy {
    pub file_type: DataFileType,
    /// Owned by a brain structure instead of a flat collection
    pub structure_scoped: bool,
    /// Brainordinate counts must match the loaded brain structures
    pub consistency_check: bool,
    pub support: Support,
    /// Reloading from disk is meaningful
    pub reloadable: bool,
}

impl CategoryPolicy {
    /// Policy for a file category
    pub fn for_type(file_type: DataFileType) -> CategoryPolicy {
        let support = match file_type {
            DataFileType::Palette => Support::NotImplemented,
            DataFileType::ConnectivityDenseDynamic
            | DataFileType::MetricDynamic
            | DataFileType::VolumeDynamic
            | DataFileType::Specification
            | DataFileType::Unknown => Support::ProgramError,
            _ => Support::Supported,
        };
        CategoryPolicy {
            file_type,
            structure_scoped: file_type.is_structure_scoped(),
            consistency_check: file_type.is_cifti_brainordinate_mapped(),
            support,
            reloadable: support == Support::Supported,
        }
    }

    /// Empty instance ready to be read
    pub fn construct(&self) -> Option<Box<dyn DataFile>> {
        match self.support {
            Support::Supported => new_data_file(self.file_type),
            Support::NotImplemented | Support::ProgramError => None,
        }
    }

    /// Files of this category are kept across scene loads when unmodified.
    ///
    /// The excluded types are a fixed list.
    pub fn reusable_across_scenes(&self) -> bool {
        !matches!(
            self.file_type,
            DataFileType::Palette
                | DataFileType::Samples
                | DataFileType::Scene
                | DataFileType::Specification
                | DataFileType::Unknown
        ) && !self.file_type.is_dynamic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_flags() {
        let surface = CategoryPolicy::for_type(DataFileType::Surface);
        assert!(surface.structure_scoped);
        assert!(!surface.consistency_check);
        assert_eq!(surface.support, Support::Supported);

        let dscalar = CategoryPolicy::for_type(DataFileType::ConnectivityDenseScalar);
        assert!(dscalar.consistency_check);
        assert!(!dscalar.structure_scoped);

        assert_eq!(
            CategoryPolicy::for_type(DataFileType::Palette).support,
            Support::NotImplemented
        );
        assert_eq!(
            CategoryPolicy::for_type(DataFileType::VolumeDynamic).support,
            Support::ProgramError
        );
    }

    #[test]
    fn test_construct_matches_type() {
        for file_type in DataFileType::ALL {
            let policy = CategoryPolicy::for_type(file_type);
            match policy.construct() {
                Some(file) => assert_eq!(file.data_file_type(), file_type),
                None => assert_ne!(policy.support, Support::Supported),
            }
        }
    }

    #[test]
    fn test_reuse_exclusions() {
        for file_type in [
            DataFileType::Palette,
            DataFileType::Samples,
            DataFileType::Scene,
            DataFileType::Specification,
            DataFileType::Unknown,
            DataFileType::MetricDynamic,
        ] {
            assert!(!CategoryPolicy::for_type(file_type).reusable_across_scenes());
        }
        assert!(CategoryPolicy::for_type(DataFileType::Annotation).reusable_across_scenes());
        assert!(CategoryPolicy::for_type(DataFileType::Volume).reusable_across_scenes());
    }
}

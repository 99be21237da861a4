//! Cross-file consistency checks

use imcortex_io::DataFile;

use crate::brain_structure::BrainStructure;
use crate::error::{BrainError, BrainResult};

/// Check a CIFTI brainordinate-mapped file against the loaded brain
/// structures.
///
/// For every loaded structure the file maps with a nonzero count, the count
/// must equal the structure's vertex count exactly. Structures that are not
/// loaded are not checked.
pub fn validate_cifti_mappable_data_file(
    file: &dyn DataFile,
    structures: &[BrainStructure],
) -> BrainResult<()> {
    let counts = file.brainordinate_counts();
    for bs in structures {
        let structure_nodes = bs.number_of_nodes();
        if structure_nodes == 0 {
            continue;
        }
        let Some((_, file_nodes)) = counts.iter().find(|(s, _)| *s == bs.structure()) else {
            continue;
        };
        if *file_nodes > 0 && *file_nodes != structure_nodes {
            return Err(BrainError::NodeCountMismatch {
                path: file.file_name().to_string(),
                file_type: file.data_file_type(),
                structure: bs.structure(),
                file_nodes: *file_nodes,
                structure_nodes,
            });
        }
    }
    Ok(())
}

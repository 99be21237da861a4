//! Concrete file kinds

pub mod annotation;
pub mod cifti;
pub mod class_names;
pub mod coloring;
pub mod dynamic;
pub mod fiber;
pub mod histology;
pub mod media;
pub mod node_data;
pub mod palette;
pub mod scene_file;
pub mod surface;
pub mod volume;

pub use annotation::{AnnotationFile, TextSubstitutionFile, SCENE_ANNOTATION_FILE_NAME};
pub use cifti::CiftiMappableFile;
pub use class_names::ClassNameFile;
pub use coloring::PaletteColoring;
pub use dynamic::DynamicConnectivityFile;
pub use fiber::{FiberOrientationFile, FiberTrajectoryFile};
pub use histology::HistologySlicesFile;
pub use media::MediaFile;
pub use node_data::NodeDataFile;
pub use palette::PaletteFile;
pub use scene_file::SceneFile;
pub use surface::SurfaceFile;
pub use volume::VolumeFile;

use crate::data_file::DataFile;
use crate::file_type::DataFileType;

/// Create an empty file of the given type, ready for `read_file`.
///
/// Returns `None` for types that are never read on their own: dynamic
/// companions (created for a parent file), spec files (owned by the brain)
/// and unknown files.
pub fn new_data_file(file_type: DataFileType) -> Option<Box<dyn DataFile>> {
    let file: Box<dyn DataFile> = match file_type {
        DataFileType::Annotation | DataFileType::Samples => Box::new(AnnotationFile::new(file_type)),
        DataFileType::AnnotationTextSubstitution => Box::new(TextSubstitutionFile::new()),
        DataFileType::Border | DataFileType::Foci => Box::new(ClassNameFile::new(file_type)),
        DataFileType::ConnectivityFiberOrientationsTemporary => {
            Box::new(FiberOrientationFile::new())
        }
        DataFileType::ConnectivityFiberTrajectoryTemporary => Box::new(FiberTrajectoryFile::new()),
        DataFileType::ConnectivityDense
        | DataFileType::ConnectivityDenseLabel
        | DataFileType::ConnectivityDenseParcel
        | DataFileType::ConnectivityDenseScalar
        | DataFileType::ConnectivityDenseTimeSeries
        | DataFileType::ConnectivityParcel
        | DataFileType::ConnectivityParcelDense
        | DataFileType::ConnectivityParcelLabel
        | DataFileType::ConnectivityParcelScalar
        | DataFileType::ConnectivityParcelSeries
        | DataFileType::ConnectivityScalarDataSeries => Box::new(CiftiMappableFile::new(file_type)),
        DataFileType::CziImage | DataFileType::Image | DataFileType::OmeZarrImage => {
            Box::new(MediaFile::new(file_type))
        }
        DataFileType::HistologySlices => Box::new(HistologySlicesFile::new()),
        DataFileType::Label | DataFileType::Metric | DataFileType::Rgba => {
            Box::new(NodeDataFile::new(file_type))
        }
        DataFileType::Palette => Box::new(PaletteFile::new()),
        DataFileType::Scene => Box::new(SceneFile::new()),
        DataFileType::Surface => Box::new(SurfaceFile::new()),
        DataFileType::Volume => Box::new(VolumeFile::new()),
        DataFileType::ConnectivityDenseDynamic
        | DataFileType::MetricDynamic
        | DataFileType::VolumeDynamic
        | DataFileType::Specification
        | DataFileType::Unknown => return None,
    };
    Some(file)
}

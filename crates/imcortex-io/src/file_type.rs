//! Data file categories
//!
//! The set of categories is closed. Every category has a file-level name
//! (used in spec files and scenes), a GUI name and a list of extensions.
//! Extensions are matched against the end of a file name, longest first, so
//! `a.dconn.nii` is a dense connectivity file rather than a volume.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataFileType {
    Annotation,
    AnnotationTextSubstitution,
    Border,
    ConnectivityDense,
    ConnectivityDenseDynamic,
    ConnectivityDenseLabel,
    ConnectivityDenseParcel,
    ConnectivityDenseScalar,
    ConnectivityDenseTimeSeries,
    ConnectivityFiberOrientationsTemporary,
    ConnectivityFiberTrajectoryTemporary,
    ConnectivityParcel,
    ConnectivityParcelDense,
    ConnectivityParcelLabel,
    ConnectivityParcelScalar,
    ConnectivityParcelSeries,
    ConnectivityScalarDataSeries,
    CziImage,
    Foci,
    HistologySlices,
    Image,
    Label,
    Metric,
    MetricDynamic,
    OmeZarrImage,
    Palette,
    Rgba,
    Samples,
    Scene,
    Specification,
    Surface,
    Unknown,
    Volume,
    VolumeDynamic,
}

impl DataFileType {
    /// Every category, in declaration order
    pub const ALL: [DataFileType; 34] = [
        DataFileType::Annotation,
        DataFileType::AnnotationTextSubstitution,
        DataFileType::Border,
        DataFileType::ConnectivityDense,
        DataFileType::ConnectivityDenseDynamic,
        DataFileType::ConnectivityDenseLabel,
        DataFileType::ConnectivityDenseParcel,
        DataFileType::ConnectivityDenseScalar,
        DataFileType::ConnectivityDenseTimeSeries,
        DataFileType::ConnectivityFiberOrientationsTemporary,
        DataFileType::ConnectivityFiberTrajectoryTemporary,
        DataFileType::ConnectivityParcel,
        DataFileType::ConnectivityParcelDense,
        DataFileType::ConnectivityParcelLabel,
        DataFileType::ConnectivityParcelScalar,
        DataFileType::ConnectivityParcelSeries,
        DataFileType::ConnectivityScalarDataSeries,
        DataFileType::CziImage,
        DataFileType::Foci,
        DataFileType::HistologySlices,
        DataFileType::Image,
        DataFileType::Label,
        DataFileType::Metric,
        DataFileType::MetricDynamic,
        DataFileType::OmeZarrImage,
        DataFileType::Palette,
        DataFileType::Rgba,
        DataFileType::Samples,
        DataFileType::Scene,
        DataFileType::Specification,
        DataFileType::Surface,
        DataFileType::Unknown,
        DataFileType::Volume,
        DataFileType::VolumeDynamic,
    ];

    /// Order in which files listed in a spec file are read.
    ///
    /// Surfaces come first because label, metric and RGBA files need the
    /// brain structure a surface creates; volumes precede the CIFTI files
    /// that may map onto them. Types that are never listed in a spec file
    /// are absent.
    pub const LOADING_ORDER: [DataFileType; 29] = [
        DataFileType::Surface,
        DataFileType::Label,
        DataFileType::Metric,
        DataFileType::Rgba,
        DataFileType::Volume,
        DataFileType::ConnectivityDense,
        DataFileType::ConnectivityDenseLabel,
        DataFileType::ConnectivityDenseParcel,
        DataFileType::ConnectivityDenseScalar,
        DataFileType::ConnectivityDenseTimeSeries,
        DataFileType::ConnectivityParcel,
        DataFileType::ConnectivityParcelDense,
        DataFileType::ConnectivityParcelLabel,
        DataFileType::ConnectivityParcelScalar,
        DataFileType::ConnectivityParcelSeries,
        DataFileType::ConnectivityScalarDataSeries,
        DataFileType::ConnectivityFiberOrientationsTemporary,
        DataFileType::ConnectivityFiberTrajectoryTemporary,
        DataFileType::Border,
        DataFileType::Foci,
        DataFileType::Annotation,
        DataFileType::AnnotationTextSubstitution,
        DataFileType::Samples,
        DataFileType::Image,
        DataFileType::CziImage,
        DataFileType::OmeZarrImage,
        DataFileType::HistologySlices,
        DataFileType::Palette,
        DataFileType::Scene,
    ];

    /// Name used in spec files and scenes
    pub fn name(&self) -> &'static str {
        match self {
            DataFileType::Annotation => "ANNOTATION",
            DataFileType::AnnotationTextSubstitution => "ANNOTATION_TEXT_SUBSTITUTION",
            DataFileType::Border => "BORDER",
            DataFileType::ConnectivityDense => "CONNECTIVITY_DENSE",
            DataFileType::ConnectivityDenseDynamic => "CONNECTIVITY_DENSE_DYNAMIC",
            DataFileType::ConnectivityDenseLabel => "CONNECTIVITY_DENSE_LABEL",
            DataFileType::ConnectivityDenseParcel => "CONNECTIVITY_DENSE_PARCEL",
            DataFileType::ConnectivityDenseScalar => "CONNECTIVITY_DENSE_SCALAR",
            DataFileType::ConnectivityDenseTimeSeries => "CONNECTIVITY_DENSE_TIME_SERIES",
            DataFileType::ConnectivityFiberOrientationsTemporary => {
                "CONNECTIVITY_FIBER_ORIENTATIONS_TEMPORARY"
            }
            DataFileType::ConnectivityFiberTrajectoryTemporary => {
                "CONNECTIVITY_FIBER_TRAJECTORY_TEMPORARY"
            }
            DataFileType::ConnectivityParcel => "CONNECTIVITY_PARCEL",
            DataFileType::ConnectivityParcelDense => "CONNECTIVITY_PARCEL_DENSE",
            DataFileType::ConnectivityParcelLabel => "CONNECTIVITY_PARCEL_LABEL",
            DataFileType::ConnectivityParcelScalar => "CONNECTIVITY_PARCEL_SCALAR",
            DataFileType::ConnectivityParcelSeries => "CONNECTIVITY_PARCEL_SERIES",
            DataFileType::ConnectivityScalarDataSeries => "CONNECTIVITY_SCALAR_DATA_SERIES",
            DataFileType::CziImage => "CZI_IMAGE_FILE",
            DataFileType::Foci => "FOCI",
            DataFileType::HistologySlices => "HISTOLOGY_SLICES",
            DataFileType::Image => "IMAGE",
            DataFileType::Label => "LABEL",
            DataFileType::Metric => "METRIC",
            DataFileType::MetricDynamic => "METRIC_DYNAMIC",
            DataFileType::OmeZarrImage => "OME_ZARR_IMAGE_FILE",
            DataFileType::Palette => "PALETTE",
            DataFileType::Rgba => "RGBA",
            DataFileType::Samples => "SAMPLES",
            DataFileType::Scene => "SCENE",
            DataFileType::Specification => "SPECIFICATION",
            DataFileType::Surface => "SURFACE",
            DataFileType::Unknown => "UNKNOWN",
            DataFileType::Volume => "VOLUME",
            DataFileType::VolumeDynamic => "VOLUME_DYNAMIC",
        }
    }

    /// Name shown to the user
    pub fn gui_name(&self) -> &'static str {
        match self {
            DataFileType::Annotation => "Annotation",
            DataFileType::AnnotationTextSubstitution => "Annotation Text Substitution",
            DataFileType::Border => "Border",
            DataFileType::ConnectivityDense => "Connectivity - Dense",
            DataFileType::ConnectivityDenseDynamic => "Connectivity - Dense Dynamic",
            DataFileType::ConnectivityDenseLabel => "Connectivity - Dense Label",
            DataFileType::ConnectivityDenseParcel => "Connectivity - Dense Parcel",
            DataFileType::ConnectivityDenseScalar => "Connectivity - Dense Scalar",
            DataFileType::ConnectivityDenseTimeSeries => "Connectivity - Dense Data Series",
            DataFileType::ConnectivityFiberOrientationsTemporary => {
                "Connectivity - Fiber Orientations TEMPORARY"
            }
            DataFileType::ConnectivityFiberTrajectoryTemporary => {
                "Connectivity - Fiber Trajectory TEMPORARY"
            }
            DataFileType::ConnectivityParcel => "Connectivity - Parcel",
            DataFileType::ConnectivityParcelDense => "Connectivity - Parcel Dense",
            DataFileType::ConnectivityParcelLabel => "Connectivity - Parcel Label",
            DataFileType::ConnectivityParcelScalar => "Connectivity - Parcel Scalar",
            DataFileType::ConnectivityParcelSeries => "Connectivity - Parcel Series",
            DataFileType::ConnectivityScalarDataSeries => "Connectivity - Scalar Data Series",
            DataFileType::CziImage => "CZI Image",
            DataFileType::Foci => "Foci",
            DataFileType::HistologySlices => "Histology Slices",
            DataFileType::Image => "Image",
            DataFileType::Label => "Label",
            DataFileType::Metric => "Metric",
            DataFileType::MetricDynamic => "Metric Dynamic",
            DataFileType::OmeZarrImage => "OME-ZARR Image",
            DataFileType::Palette => "Palette",
            DataFileType::Rgba => "RGBA",
            DataFileType::Samples => "Samples",
            DataFileType::Scene => "Scene",
            DataFileType::Specification => "Specification",
            DataFileType::Surface => "Surface",
            DataFileType::Unknown => "Unknown",
            DataFileType::Volume => "Volume",
            DataFileType::VolumeDynamic => "Volume Dynamic",
        }
    }

    /// File name extensions, the first one being the default
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DataFileType::Annotation => &["annot", "wb_annot"],
            DataFileType::AnnotationTextSubstitution => &["wb_annsub.csv"],
            DataFileType::Border => &["border", "wb_border"],
            DataFileType::ConnectivityDense => &["dconn.nii"],
            DataFileType::ConnectivityDenseLabel => &["dlabel.nii"],
            DataFileType::ConnectivityDenseParcel => &["dpconn.nii"],
            DataFileType::ConnectivityDenseScalar => &["dscalar.nii"],
            DataFileType::ConnectivityDenseTimeSeries => &["dtseries.nii"],
            DataFileType::ConnectivityFiberOrientationsTemporary => &["fiberTEMP.nii"],
            DataFileType::ConnectivityFiberTrajectoryTemporary => &["trajTEMP.wbsparse"],
            DataFileType::ConnectivityParcel => &["pconn.nii"],
            DataFileType::ConnectivityParcelDense => &["pdconn.nii"],
            DataFileType::ConnectivityParcelLabel => &["plabel.nii"],
            DataFileType::ConnectivityParcelScalar => &["pscalar.nii"],
            DataFileType::ConnectivityParcelSeries => &["ptseries.nii"],
            DataFileType::ConnectivityScalarDataSeries => &["sdseries.nii"],
            DataFileType::CziImage => &["czi"],
            DataFileType::Foci => &["foci", "wb_foci"],
            DataFileType::HistologySlices => &["histology", "wb_histology"],
            DataFileType::Image => &["png", "ppm", "jpg", "jpeg"],
            DataFileType::Label => &["label.gii"],
            DataFileType::Metric => &["func.gii", "shape.gii"],
            DataFileType::OmeZarrImage => &["ome.zarr"],
            DataFileType::Palette => &["palette", "wb_palette"],
            DataFileType::Rgba => &["rgba.gii"],
            DataFileType::Samples => &["wb_samples"],
            DataFileType::Scene => &["scene", "wb_scene"],
            DataFileType::Specification => &["spec", "wb_spec"],
            DataFileType::Surface => &["surf.gii"],
            DataFileType::Volume => &["nii", "nii.gz"],
            DataFileType::ConnectivityDenseDynamic
            | DataFileType::MetricDynamic
            | DataFileType::VolumeDynamic
            | DataFileType::Unknown => &[],
        }
    }

    /// Default extension, empty for types without files of their own
    pub fn default_extension(&self) -> &'static str {
        self.extensions().first().copied().unwrap_or("")
    }

    /// Parse a type from its file-level name
    pub fn from_name(name: &str) -> Option<DataFileType> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Determine the type of a file from its name.
    ///
    /// The longest extension that matches the end of the name (preceded by
    /// a '.') wins; names matching nothing are `Unknown`.
    pub fn from_file_name(file_name: &str) -> DataFileType {
        let mut best: Option<(usize, DataFileType)> = None;
        for file_type in Self::ALL {
            for ext in file_type.extensions() {
                let dotted_len = ext.len() + 1;
                if file_name.len() <= dotted_len {
                    continue;
                }
                let split = file_name.len() - dotted_len;
                if !file_name.is_char_boundary(split) {
                    continue;
                }
                let tail = &file_name[split..];
                if tail.starts_with('.') && &tail[1..] == *ext {
                    let longer = best.map_or(true, |(len, _)| ext.len() > len);
                    if longer {
                        best = Some((ext.len(), file_type));
                    }
                }
            }
        }
        best.map(|(_, t)| t).unwrap_or(DataFileType::Unknown)
    }

    /// Split a file name into the part before the type extension and the
    /// extension itself (without the dot)
    pub fn split_extension<'a>(&self, file_name: &'a str) -> (&'a str, Option<&'static str>) {
        let mut matched: Option<&'static str> = None;
        for ext in self.extensions() {
            let dotted = format!(".{ext}");
            if file_name.ends_with(&dotted) && file_name.len() > dotted.len() {
                let longer = matched.map_or(true, |m| ext.len() > m.len());
                if longer {
                    matched = Some(ext);
                }
            }
        }
        match matched {
            Some(ext) => (&file_name[..file_name.len() - ext.len() - 1], Some(ext)),
            None => (file_name, None),
        }
    }

    /// CIFTI files whose brainordinates map onto surfaces and volumes
    pub fn is_cifti_brainordinate_mapped(&self) -> bool {
        matches!(
            self,
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
                | DataFileType::ConnectivityScalarDataSeries
                | DataFileType::ConnectivityFiberOrientationsTemporary
        )
    }

    /// Files shown as connectivity matrices
    pub fn is_connectivity_matrix(&self) -> bool {
        matches!(
            self,
            DataFileType::ConnectivityDense
                | DataFileType::ConnectivityDenseParcel
                | DataFileType::ConnectivityParcel
                | DataFileType::ConnectivityParcelDense
                | DataFileType::ConnectivityDenseDynamic
        )
    }

    /// Companion types created for another file rather than read from disk
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            DataFileType::ConnectivityDenseDynamic
                | DataFileType::MetricDynamic
                | DataFileType::VolumeDynamic
        )
    }

    /// Types owned by a brain structure
    pub fn is_structure_scoped(&self) -> bool {
        matches!(
            self,
            DataFileType::Surface | DataFileType::Label | DataFileType::Metric | DataFileType::Rgba
        )
    }

    /// Types that may be listed in a spec file
    pub fn is_allowed_in_spec_file(&self) -> bool {
        !self.is_dynamic() && !matches!(self, DataFileType::Specification | DataFileType::Unknown)
    }

    /// Image types shown by the media model
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            DataFileType::Image | DataFileType::CziImage | DataFileType::OmeZarrImage
        )
    }
}

impl fmt::Display for DataFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gui_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name_prefers_longest_extension() {
        assert_eq!(
            DataFileType::from_file_name("/d/a.dconn.nii"),
            DataFileType::ConnectivityDense
        );
        assert_eq!(DataFileType::from_file_name("/d/brain.nii"), DataFileType::Volume);
        assert_eq!(DataFileType::from_file_name("/d/brain.nii.gz"), DataFileType::Volume);
        assert_eq!(
            DataFileType::from_file_name("lh.midthickness.surf.gii"),
            DataFileType::Surface
        );
        assert_eq!(DataFileType::from_file_name("x.shape.gii"), DataFileType::Metric);
        assert_eq!(DataFileType::from_file_name("readme.txt"), DataFileType::Unknown);
        assert_eq!(DataFileType::from_file_name("nii"), DataFileType::Unknown);
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(
            DataFileType::Metric.split_extension("/d/thickness.func.gii"),
            ("/d/thickness", Some("func.gii"))
        );
        assert_eq!(
            DataFileType::Metric.split_extension("thickness.dat"),
            ("thickness.dat", None)
        );
    }

    #[test]
    fn test_names_round_trip() {
        for t in DataFileType::ALL {
            assert_eq!(DataFileType::from_name(t.name()), Some(t));
        }
    }

    #[test]
    fn test_category_predicates() {
        assert!(DataFileType::ConnectivityDenseScalar.is_cifti_brainordinate_mapped());
        assert!(!DataFileType::Volume.is_cifti_brainordinate_mapped());
        assert!(DataFileType::MetricDynamic.is_dynamic());
        assert!(!DataFileType::MetricDynamic.is_allowed_in_spec_file());
        assert!(DataFileType::Scene.is_allowed_in_spec_file());
        assert!(DataFileType::Label.is_structure_scoped());
    }

    #[test]
    fn test_loading_order_starts_with_surfaces() {
        assert_eq!(DataFileType::LOADING_ORDER[0], DataFileType::Surface);
        for t in DataFileType::LOADING_ORDER {
            assert!(t.is_allowed_in_spec_file());
        }
    }
}

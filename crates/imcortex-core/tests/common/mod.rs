//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use tempfile::TempDir;

use imcortex_core::{Brain, CortexPreferences, SpecFile};
use imcortex_io::codec::write_document;
use imcortex_io::files::cifti::CiftiContent;
use imcortex_io::files::class_names::{ClassNameContent, ClassNameItem};
use imcortex_io::files::node_data::NodeDataContent;
use imcortex_io::files::surface::SurfaceContent;
use imcortex_io::files::volume::VolumeContent;
use imcortex_io::files::SceneFile;
use imcortex_io::{DataFile, DataFileType, ReadContext, Structure};

/// A study directory with data files written on demand
pub struct Study {
    dir: TempDir,
}

impl Study {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn dir(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Absolute path of a file in the study
    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    /// Create a subdirectory so files with the same name can live side by side
    pub fn make_dir(&self, name: &str) {
        std::fs::create_dir_all(self.path(name)).expect("Failed to create directory");
    }

    pub fn surface(&self, name: &str, structure: Structure, nodes: usize) -> String {
        let path = self.path(name);
        let content = SurfaceContent {
            structure,
            number_of_nodes: nodes,
            ..Default::default()
        };
        write_document(&path, DataFileType::Surface, &content).expect("Failed to write surface");
        path
    }

    pub fn node_data(
        &self,
        file_type: DataFileType,
        name: &str,
        structure: Structure,
        nodes: usize,
        maps: usize,
    ) -> String {
        let path = self.path(name);
        let content = NodeDataContent {
            structure,
            number_of_nodes: nodes,
            map_names: (1..=maps).map(|i| format!("map {i}")).collect(),
        };
        write_document(&path, file_type, &content).expect("Failed to write node data");
        path
    }

    pub fn metric(&self, name: &str, structure: Structure, nodes: usize, maps: usize) -> String {
        self.node_data(DataFileType::Metric, name, structure, nodes, maps)
    }

    pub fn dscalar(&self, name: &str, brainordinates: &[(Structure, usize)]) -> String {
        self.cifti(DataFileType::ConnectivityDenseScalar, name, brainordinates)
    }

    pub fn cifti(
        &self,
        file_type: DataFileType,
        name: &str,
        brainordinates: &[(Structure, usize)],
    ) -> String {
        let path = self.path(name);
        let content = CiftiContent {
            surface_brainordinates: brainordinates.iter().copied().collect::<BTreeMap<_, _>>(),
            volume_brainordinates: 0,
            map_names: vec!["thickness".to_string()],
        };
        write_document(&path, file_type, &content).expect("Failed to write CIFTI file");
        path
    }

    pub fn volume(&self, name: &str, maps: usize) -> String {
        let path = self.path(name);
        let content = VolumeContent {
            dimensions: [91, 109, 91],
            map_names: (1..=maps).map(|i| format!("volume map {i}")).collect(),
            label_names: Vec::new(),
        };
        write_document(&path, DataFileType::Volume, &content).expect("Failed to write volume");
        path
    }

    pub fn border(&self, name: &str, items: &[(&str, &str)]) -> String {
        let path = self.path(name);
        let content = ClassNameContent {
            structure: Structure::CortexLeft,
            items: items
                .iter()
                .map(|(class_name, name)| ClassNameItem {
                    class_name: class_name.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        };
        write_document(&path, DataFileType::Border, &content).expect("Failed to write border");
        path
    }

    /// An empty scene file
    pub fn scene_file(&self, name: &str) -> String {
        let path = self.path(name);
        SceneFile::with_file_name(&path)
            .write_file(&path)
            .expect("Failed to write scene file");
        path
    }

    /// A spec file listing `entries` by absolute path; it is written with
    /// names relative to the study directory
    pub fn spec(&self, name: &str, entries: &[(DataFileType, Structure, &str)]) -> String {
        let path = self.path(name);
        let mut spec = SpecFile::with_file_name(&path);
        for (file_type, structure, file_name) in entries {
            spec.add_data_file(*file_type, *structure, file_name, true, true, true);
        }
        spec.write_file(&path).expect("Failed to write spec file");
        path
    }

    /// Overwrite a file with bytes no reader accepts
    pub fn corrupt(&self, path: &str) {
        std::fs::write(path, b"not a document").expect("Failed to corrupt file");
    }

    pub fn exists(&self, name: &str) -> bool {
        Path::new(&self.path(name)).exists()
    }
}

pub fn brain() -> Brain {
    Brain::new(CortexPreferences::default())
}

pub fn ctx() -> ReadContext {
    ReadContext::default()
}

/// Left hemisphere surface plus two one-map metrics named `data.func.gii`
/// in the directories `a` and `b`. Returns the metric paths.
pub fn same_named_metrics(study: &Study, brain: &mut Brain) -> (String, String) {
    study.make_dir("a");
    study.make_dir("b");
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 100);
    let first = study.metric("a/data.func.gii", Structure::CortexLeft, 100, 1);
    let second = study.metric("b/data.func.gii", Structure::CortexLeft, 100, 1);
    for (file_type, path) in [
        (DataFileType::Surface, &surface),
        (DataFileType::Metric, &first),
        (DataFileType::Metric, &second),
    ] {
        brain
            .read_data_file(file_type, Structure::Invalid, path, false, &ctx())
            .expect("Failed to read study file");
    }
    (first, second)
}

/// Left hemisphere surface and a one-map metric on it
pub fn left_surface_and_metric(study: &Study, brain: &mut Brain, nodes: usize) -> (String, String) {
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, nodes);
    let metric = study.metric("lh.thickness.func.gii", Structure::CortexLeft, nodes, 1);
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &surface, false, &ctx())
        .expect("Failed to read surface");
    brain
        .read_data_file(DataFileType::Metric, Structure::Invalid, &metric, false, &ctx())
        .expect("Failed to read metric");
    (surface, metric)
}

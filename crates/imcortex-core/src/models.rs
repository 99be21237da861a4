//! Derived view models
//!
//! Models are built from the loaded files and rebuilt whenever the file set
//! changes. A single table decides, in a fixed order, which models apply.

use std::fmt;

use serde::{Deserialize, Serialize};

use imcortex_scene::{SceneAttributes, SceneClass};

use crate::events::{BrainEvent, EventBus};

/// Kind of derived model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelKind {
    SurfaceMontage,
    VolumeSlice,
    WholeBrain,
    Chart,
    ChartTwo,
    Histology,
    Media,
}

impl ModelKind {
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::SurfaceMontage => "MODEL_TYPE_SURFACE_MONTAGE",
            ModelKind::VolumeSlice => "MODEL_TYPE_VOLUME_SLICES",
            ModelKind::WholeBrain => "MODEL_TYPE_WHOLE_BRAIN",
            ModelKind::Chart => "MODEL_TYPE_CHART",
            ModelKind::ChartTwo => "MODEL_TYPE_CHART_TWO",
            ModelKind::Histology => "MODEL_TYPE_HISTOLOGY",
            ModelKind::Media => "MODEL_TYPE_MULTI_MEDIA",
        }
    }

    pub fn from_name(name: &str) -> Option<ModelKind> {
        MODEL_TABLE
            .iter()
            .map(|row| row.kind)
            .find(|k| k.name() == name)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the models need to know about the loaded files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInputs {
    pub number_of_structures: usize,
    pub surface_files: Vec<String>,
    pub volume_files: Vec<String>,
    /// Non-empty files that can be drawn in volume slices
    pub volume_mappable_files: Vec<String>,
    pub chart_one_files: Vec<String>,
    pub chart_two_files: Vec<String>,
    pub matrix_files: Vec<String>,
    pub histology_files: Vec<String>,
    pub media_files: Vec<String>,
}

struct ModelRow {
    kind: ModelKind,
    applicable: fn(&ModelInputs) -> bool,
    candidates: fn(&ModelInputs) -> &[String],
}

const MODEL_TABLE: [ModelRow; 7] = [
    ModelRow {
        kind: ModelKind::SurfaceMontage,
        applicable: |i| !i.surface_files.is_empty(),
        candidates: |i| &i.surface_files,
    },
    ModelRow {
        kind: ModelKind::VolumeSlice,
        applicable: |i| !i.volume_mappable_files.is_empty(),
        candidates: |i| &i.volume_mappable_files,
    },
    ModelRow {
        kind: ModelKind::WholeBrain,
        applicable: |i| i.number_of_structures > 0 || !i.volume_files.is_empty(),
        candidates: |i| &i.surface_files,
    },
    ModelRow {
        kind: ModelKind::Chart,
        applicable: |i| !i.chart_one_files.is_empty(),
        candidates: |i| &i.chart_one_files,
    },
    ModelRow {
        kind: ModelKind::ChartTwo,
        applicable: |i| !i.chart_two_files.is_empty(),
        candidates: |i| &i.chart_two_files,
    },
    ModelRow {
        kind: ModelKind::Histology,
        applicable: |i| !i.histology_files.is_empty(),
        candidates: |i| &i.histology_files,
    },
    ModelRow {
        kind: ModelKind::Media,
        applicable: |i| !i.media_files.is_empty(),
        candidates: |i| &i.media_files,
    },
];

/// A derived model and its view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedModel {
    kind: ModelKind,
    available_file_names: Vec<String>,
    selected_file_names: Vec<String>,
    refresh_count: u64,
}

impl DerivedModel {
    fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            available_file_names: Vec::new(),
            selected_file_names: Vec::new(),
            refresh_count: 0,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Files the model can show
    pub fn available_file_names(&self) -> &[String] {
        &self.available_file_names
    }

    /// Files the model shows
    pub fn selected_file_names(&self) -> &[String] {
        &self.selected_file_names
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Show a file; ignored unless the model can show it
    pub fn select_file(&mut self, file_name: &str) {
        if self.available_file_names.iter().any(|f| f == file_name)
            && !self.selected_file_names.iter().any(|f| f == file_name)
        {
            self.selected_file_names.push(file_name.to_string());
        }
    }

    /// Rebuild from the current candidates, keeping the selection that is
    /// still valid and defaulting to the first candidate
    fn refresh(&mut self, candidates: &[String]) {
        self.available_file_names = candidates.to_vec();
        let available = &self.available_file_names;
        self.selected_file_names.retain(|f| available.contains(f));
        if self.selected_file_names.is_empty() {
            if let Some(first) = self.available_file_names.first() {
                self.selected_file_names.push(first.clone());
            }
        }
        self.refresh_count += 1;
    }

    pub fn save_to_scene(&self, _attributes: &SceneAttributes, instance_name: &str) -> SceneClass {
        let mut class = SceneClass::new(instance_name, "Model", 1);
        class.add_enumerated_type("modelKind", self.kind.name());
        class.add_string_array("selectedFileNames", &self.selected_file_names);
        class
    }

    /// Apply a saved model; classes saved by other kinds are ignored
    pub fn restore_from_scene(&mut self, attributes: &mut SceneAttributes, class: &SceneClass) {
        if class.get_enumerated_type_name("modelKind") != Some(self.kind.name()) {
            return;
        }
        let saved = class.get_string_array_value("selectedFileNames");
        let mut restored = Vec::new();
        for name in saved {
            let found = self
                .available_file_names
                .iter()
                .find(|f| **f == name || imcortex_io::file_name_no_path(f) == name);
            match found {
                Some(f) => restored.push(f.clone()),
                None => attributes.add_to_error_message(format!(
                    "{} model: file {name} is not loaded",
                    self.kind
                )),
            }
        }
        if !restored.is_empty() {
            self.selected_file_names = restored;
        }
    }
}

/// Owns the derived models and keeps them in step with the files
#[derive(Debug, Default)]
pub struct DerivedModelManager {
    models: Vec<DerivedModel>,
}

impl DerivedModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create, refresh or destroy each model by evaluating the table
    pub fn update(&mut self, inputs: &ModelInputs, bus: &mut dyn EventBus) {
        let mut next = Vec::with_capacity(MODEL_TABLE.len());
        for row in &MODEL_TABLE {
            let existing = self
                .models
                .iter()
                .position(|m| m.kind == row.kind)
                .map(|pos| self.models.swap_remove(pos));
            let applicable = (row.applicable)(inputs);
            match (existing, applicable) {
                (Some(mut model), true) => {
                    model.refresh((row.candidates)(inputs));
                    next.push(model);
                }
                (None, true) => {
                    let mut model = DerivedModel::new(row.kind);
                    model.refresh((row.candidates)(inputs));
                    tracing::debug!("Created {} model", row.kind);
                    bus.publish(BrainEvent::ModelCreated(row.kind));
                    next.push(model);
                }
                (Some(_), false) => {
                    tracing::debug!("Destroyed {} model", row.kind);
                    bus.publish(BrainEvent::ModelDestroyed(row.kind));
                }
                (None, false) => {}
            }
        }
        self.models = next;
    }

    /// Make sure the chart-two model shows a connectivity matrix when one
    /// is loaded
    pub fn apply_matrix_chart_defaults(&mut self, inputs: &ModelInputs) {
        let Some(chart) = self.model_mut(ModelKind::ChartTwo) else {
            return;
        };
        let shows_matrix = chart
            .selected_file_names
            .iter()
            .any(|f| inputs.matrix_files.contains(f));
        if !shows_matrix {
            if let Some(first) = inputs.matrix_files.first() {
                chart.select_file(first);
            }
        }
    }

    pub fn model(&self, kind: ModelKind) -> Option<&DerivedModel> {
        self.models.iter().find(|m| m.kind == kind)
    }

    pub fn model_mut(&mut self, kind: ModelKind) -> Option<&mut DerivedModel> {
        self.models.iter_mut().find(|m| m.kind == kind)
    }

    /// Live models in table order
    pub fn models(&self) -> &[DerivedModel] {
        &self.models
    }

    pub fn kinds(&self) -> Vec<ModelKind> {
        self.models.iter().map(|m| m.kind).collect()
    }

    pub fn save_to_scene(&self, attributes: &SceneAttributes) -> Vec<SceneClass> {
        self.models
            .iter()
            .map(|m| m.save_to_scene(attributes, m.kind.name()))
            .collect()
    }

    /// Offer every saved model class to every live model
    pub fn restore_from_scene(&mut self, attributes: &mut SceneAttributes, classes: &[SceneClass]) {
        for class in classes {
            for model in &mut self.models {
                model.restore_from_scene(attributes, class);
            }
        }
    }
}

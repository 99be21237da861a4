//! Saving brains into scenes and restoring them

mod common;

use common::{brain, ctx, left_surface_and_metric, same_named_metrics, Study};
use imcortex_core::{Brain, BrainError, BrainEvent, FileId, ModelKind};
use imcortex_io::{DataFileType, Structure};
use imcortex_scene::{SceneAttributes, SceneClass, SceneType};

/// Brain with a surface, a one-map metric and a loaded scene file
fn brain_with_scene_file(study: &Study) -> (Brain, FileId, String, String) {
    let scene_path = study.scene_file("study.scene");
    let mut brain = brain();
    let (surface, metric) = left_surface_and_metric(study, &mut brain, 100);
    let scene = brain
        .read_data_file(DataFileType::Scene, Structure::Invalid, &scene_path, false, &ctx())
        .unwrap();
    (brain, scene, surface, metric)
}

/// Brain whose only multi-map metric has a dynamic companion
fn brain_with_companion(study: &Study) -> (Brain, FileId) {
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 100);
    let metric = study.metric("lh.task.func.gii", Structure::CortexLeft, 100, 4);
    let mut brain = brain();
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &surface, false, &ctx())
        .unwrap();
    brain
        .read_data_file(DataFileType::Metric, Structure::Invalid, &metric, false, &ctx())
        .unwrap();
    let companion = brain.files_of_type(DataFileType::MetricDynamic)[0];
    (brain, companion)
}

fn companion_entry(instance_name: &str, key: &str, saved_name: &str, enabled: bool) -> SceneClass {
    let mut class = SceneClass::new(instance_name, "METRIC_DYNAMIC", 1);
    class.add_path_name(key, saved_name);
    class.add_boolean("enabledAsLayer", enabled);
    class
}

fn generic() -> SceneAttributes {
    SceneAttributes::new(SceneType::Generic)
}

// === Full scenes ===

#[test]
fn test_full_scene_round_trip_after_reset() {
    let study = Study::new();
    let (mut brain, scene, surface, metric) = brain_with_scene_file(&study);
    brain.display_properties_mut().borders.line_width = 3.0;

    brain.save_scene(scene, "overview", SceneType::Full).unwrap();
    brain.reset_brain(true, false);
    assert_eq!(brain.number_of_files(), 1);

    let attributes = brain.restore_scene(scene, "overview", &ctx()).unwrap();

    assert!(!attributes.has_errors(), "{}", attributes.error_message());
    assert_eq!(attributes.scene_type(), SceneType::Full);
    assert_eq!(brain.file_names_of_type(DataFileType::Surface), vec![surface]);
    assert_eq!(brain.file_names_of_type(DataFileType::Metric), vec![metric.clone()]);
    assert_eq!(brain.files_of_type(DataFileType::Scene), vec![scene]);
    let chart = brain.models().model(ModelKind::Chart).unwrap();
    assert_eq!(chart.selected_file_names(), &[metric]);
    assert_eq!(brain.display_properties().borders.line_width, 3.0);
}

#[test]
fn test_same_named_files_survive_full_scene() {
    let study = Study::new();
    let mut brain = brain();
    let (_, second) = same_named_metrics(&study, &mut brain);
    let scene_path = study.scene_file("study.scene");
    let scene = brain
        .read_data_file(DataFileType::Scene, Structure::Invalid, &scene_path, false, &ctx())
        .unwrap();
    let names = brain.file_names_of_type(DataFileType::Metric);
    assert_eq!(names[1], study.path("b/data_1.func.gii"));
    brain.save_scene(scene, "duplicates", SceneType::Full).unwrap();

    // Restored once reusing the loaded files, once read again from disk
    for reset_first in [false, true] {
        if reset_first {
            brain.reset_brain(true, false);
        }
        let attributes = brain.restore_scene(scene, "duplicates", &ctx()).unwrap();

        assert!(!attributes.has_errors(), "{}", attributes.error_message());
        assert_eq!(brain.file_names_of_type(DataFileType::Metric), names);
        let renamed = brain.files_of_type(DataFileType::Metric)[1];
        assert_eq!(brain.source_path(renamed), Some(second.as_str()));
        assert!(brain.reload_data_file(renamed, &ctx()).is_ok());
    }
}

#[test]
fn test_scene_file_on_disk_restores_into_new_brain() {
    let study = Study::new();
    let (mut brain, scene, surface, _) = brain_with_scene_file(&study);
    brain.save_scene(scene, "overview", SceneType::Full).unwrap();
    brain.write_data_file(scene).unwrap();

    let mut restored = common::brain();
    let scene_path = study.path("study.scene");
    let scene = restored
        .read_data_file(DataFileType::Scene, Structure::Invalid, &scene_path, false, &ctx())
        .unwrap();
    let attributes = restored.restore_scene(scene, "overview", &ctx()).unwrap();

    assert!(!attributes.has_errors(), "{}", attributes.error_message());
    assert_eq!(restored.number_of_files(), 3);
    assert_eq!(restored.file_names_of_type(DataFileType::Surface), vec![surface]);
    assert_eq!(
        restored.brain_structure(Structure::CortexLeft).unwrap().number_of_nodes(),
        100
    );
}

#[test]
fn test_unchanged_files_survive_scene_restore() {
    let study = Study::new();
    let (mut brain, scene, _, metric) = brain_with_scene_file(&study);
    brain.save_scene(scene, "overview", SceneType::Full).unwrap();

    // A reused file keeps its content even though the disk copy changed
    study.metric("lh.thickness.func.gii", Structure::CortexLeft, 100, 3);
    brain.restore_scene(scene, "overview", &ctx()).unwrap();

    let id = brain.find_file(DataFileType::Metric, &metric).unwrap();
    assert_eq!(brain.file(id).unwrap().number_of_maps(), 1);
}

#[test]
fn test_missing_files_are_reported() {
    let study = Study::new();
    let (mut brain, scene, _, metric) = brain_with_scene_file(&study);
    brain.save_scene(scene, "overview", SceneType::Full).unwrap();
    brain.reset_brain(true, false);
    std::fs::remove_file(&metric).unwrap();

    let attributes = brain.restore_scene(scene, "overview", &ctx()).unwrap();

    assert!(attributes.has_errors());
    assert!(attributes.error_message().contains("lh.thickness.func.gii"));
    assert_eq!(brain.files_of_type(DataFileType::Surface).len(), 1);
    assert!(brain.files_of_type(DataFileType::Metric).is_empty());
}

#[test]
fn test_full_scene_without_spec_file_keeps_files() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let mut class = SceneClass::new("brain", "Brain", 1);
    class.add_enumerated_type("sceneType", SceneType::Full.name());
    let mut attributes = SceneAttributes::new(SceneType::Full);

    brain.restore_from_scene(&mut attributes, &class, &ctx());

    assert!(attributes.has_errors());
    assert_eq!(brain.number_of_files(), 2);
}

#[test]
fn test_unknown_scene_name() {
    let study = Study::new();
    let (mut brain, scene, _, _) = brain_with_scene_file(&study);

    let result = brain.restore_scene(scene, "nothing", &ctx());

    assert!(matches!(result, Err(BrainError::SceneNotFound { .. })));
    assert_eq!(brain.number_of_files(), 3);
}

#[test]
fn test_saving_into_a_data_file_fails() {
    let study = Study::new();
    let (mut brain, _, _, _) = brain_with_scene_file(&study);
    let metric = brain.files_of_type(DataFileType::Metric)[0];

    let result = brain.save_scene(metric, "overview", SceneType::Full);

    assert!(matches!(result, Err(BrainError::ProgramError(_))));
}

#[test]
fn test_restore_invalidates_volume_coloring() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let class = brain.save_to_scene(&generic(), "brain");
    let sequence = brain.events().current_sequence();

    brain.restore_from_scene(&mut generic(), &class, &ctx());

    assert!(brain
        .events()
        .events_after(sequence)
        .iter()
        .any(|e| e.event == BrainEvent::VolumeColoringInvalid));
}

// === File state matching ===

#[test]
fn test_generic_scene_restores_state_of_loaded_files() {
    let study = Study::new();
    let (mut brain, companion) = brain_with_companion(&study);
    brain.file_mut(companion).unwrap().set_enabled_as_layer(true);
    let class = brain.save_to_scene(&generic(), "brain");

    brain.file_mut(companion).unwrap().set_enabled_as_layer(false);
    let mut attributes = generic();
    brain.restore_from_scene(&mut attributes, &class, &ctx());

    assert!(brain.file(companion).unwrap().is_enabled_as_layer());
    assert_eq!(brain.number_of_files(), 3);
}

#[test]
fn test_current_entries_need_the_exact_file_name() {
    let study = Study::new();
    let (mut brain, companion) = brain_with_companion(&study);
    let no_path = brain.file(companion).unwrap().file_name_no_path();
    let full_name = brain.file(companion).unwrap().file_name().to_string();

    let mut class = SceneClass::new("brain", "Brain", 1);
    class.add_enumerated_type("sceneType", SceneType::Generic.name());
    class.add_class_array(
        "allCaretDataFiles_V2",
        vec![companion_entry(&no_path, "dataFileName_V2", &format!("/other/{no_path}"), true)],
    );
    class.add_class_array(
        "allCaretDataFiles",
        vec![companion_entry(&no_path, "dataFileName", &full_name, true)],
    );
    brain.restore_from_scene(&mut generic(), &class, &ctx());

    assert!(!brain.file(companion).unwrap().is_enabled_as_layer());
}

#[test]
fn test_legacy_entries_match_longest_suffix() {
    let study = Study::new();
    let (mut brain, companion) = brain_with_companion(&study);
    let no_path = brain.file(companion).unwrap().file_name_no_path();
    let full_name = brain.file(companion).unwrap().file_name().to_string();

    let mut class = SceneClass::new("brain", "Brain", 1);
    class.add_enumerated_type("sceneType", SceneType::Generic.name());
    class.add_class_array(
        "allCaretDataFiles",
        vec![
            companion_entry(&no_path, "dataFileName", &format!("/unrelated/{no_path}"), false),
            companion_entry(&no_path, "dataFileName", &format!("/moved{full_name}"), true),
            companion_entry(&no_path, "dataFileName", &format!("/copied{full_name}"), false),
            companion_entry("other.func.gii.dynconn", "dataFileName", &full_name, false),
        ],
    );
    brain.restore_from_scene(&mut generic(), &class, &ctx());

    assert!(brain.file(companion).unwrap().is_enabled_as_layer());
}

// === Selection hierarchies ===

#[test]
fn test_borders_added_after_scene_are_hidden() {
    let study = Study::new();
    let first = study.border("areas.border", &[("Visual", "V1"), ("Visual", "V2")]);
    let second = study.border("later.border", &[("Motor", "M1")]);
    let mut brain = brain();
    let first = brain
        .read_data_file(DataFileType::Border, Structure::Invalid, &first, false, &ctx())
        .unwrap();
    brain
        .file_mut(first)
        .unwrap()
        .name_hierarchy_mut()
        .unwrap()
        .set_selected("Visual", "V2", false);
    let class = brain.save_to_scene(&generic(), "brain");

    let second = brain
        .read_data_file(DataFileType::Border, Structure::Invalid, &second, false, &ctx())
        .unwrap();
    brain.restore_from_scene(&mut generic(), &class, &ctx());

    let restored = brain.file(first).unwrap().name_hierarchy().unwrap();
    assert!(restored.is_selected("Visual", "V1"));
    assert!(!restored.is_selected("Visual", "V2"));
    let added = brain.file(second).unwrap().name_hierarchy().unwrap();
    assert!(!added.is_selected("Motor", "M1"));
}

#[test]
fn test_scene_without_hierarchies_leaves_borders_alone() {
    let study = Study::new();
    let path = study.border("areas.border", &[("Visual", "V1")]);
    let mut brain = brain();
    let border = brain
        .read_data_file(DataFileType::Border, Structure::Invalid, &path, false, &ctx())
        .unwrap();
    let mut class = SceneClass::new("brain", "Brain", 1);
    class.add_enumerated_type("sceneType", SceneType::Generic.name());

    brain.restore_from_scene(&mut generic(), &class, &ctx());

    let hierarchy = brain.file(border).unwrap().name_hierarchy().unwrap();
    assert!(hierarchy.is_selected("Visual", "V1"));
}

//! Reading, adding, reloading, removing and writing data files

mod common;

use common::{brain, ctx, left_surface_and_metric, same_named_metrics, Study};
use imcortex_core::{Brain, BrainError, CortexPreferences, LoadMode, ReloadAllMode};
use imcortex_io::files::class_names::ClassNameContent;
use imcortex_io::files::surface::SurfaceContent;
use imcortex_io::files::{ClassNameFile, SurfaceFile};
use imcortex_io::{DataFile, DataFileType, Structure};
use proptest::prelude::*;

fn in_memory_surface(name: &str, nodes: usize) -> Box<dyn DataFile> {
    Box::new(SurfaceFile::with_content(
        name,
        SurfaceContent {
            structure: Structure::CortexLeft,
            number_of_nodes: nodes,
            ..Default::default()
        },
    ))
}

fn in_memory_border(name: &str) -> Box<dyn DataFile> {
    Box::new(ClassNameFile::with_content(
        DataFileType::Border,
        name,
        ClassNameContent::default(),
    ))
}

// === Reading ===

#[test]
fn test_read_surface_creates_structure_and_spec_entry() {
    let study = Study::new();
    let path = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 32492);
    let mut brain = brain();

    let id = brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &path, false, &ctx())
        .unwrap();

    assert_eq!(brain.number_of_files(), 1);
    let bs = brain.brain_structure(Structure::CortexLeft).unwrap();
    assert_eq!(bs.number_of_nodes(), 32492);
    assert_eq!(bs.surfaces(), &[id]);
    assert!(brain.spec_file().contains_file(id));
    assert!(!brain.file(id).unwrap().is_modified());
}

#[test]
fn test_read_relative_path_uses_current_directory() {
    let study = Study::new();
    study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 100);
    let mut brain = brain();
    brain.set_current_directory(study.dir());

    let id = brain
        .read_data_file(
            DataFileType::Surface,
            Structure::Invalid,
            "lh.midthickness.surf.gii",
            false,
            &ctx(),
        )
        .unwrap();

    assert_eq!(
        brain.file(id).unwrap().file_name(),
        study.path("lh.midthickness.surf.gii")
    );
}

#[test]
fn test_read_missing_file() {
    let study = Study::new();
    let mut brain = brain();

    let result = brain.read_data_file(
        DataFileType::Surface,
        Structure::Invalid,
        &study.path("missing.surf.gii"),
        false,
        &ctx(),
    );

    assert!(matches!(result, Err(BrainError::FileNotFound(_))));
    assert_eq!(brain.number_of_files(), 0);
}

#[test]
fn test_spec_files_are_not_data_files() {
    let study = Study::new();
    let path = study.spec("study.spec", &[]);
    let mut brain = brain();

    let result = brain.read_data_file(DataFileType::Specification, Structure::Invalid, &path, false, &ctx());

    assert!(matches!(result, Err(BrainError::ProgramError(_))));
}

#[test]
fn test_palette_files_are_not_read() {
    let study = Study::new();
    let path = study.path("colors.palette");
    std::fs::write(&path, "{}").unwrap();
    let mut brain = brain();

    let result = brain.add_read_or_reload_data_file(
        LoadMode::Read,
        DataFileType::Palette,
        Structure::Invalid,
        &path,
        false,
        &ctx(),
    );

    assert!(matches!(result, Err(BrainError::Unsupported { .. })));
    assert_eq!(brain.number_of_files(), 0);
}

#[test]
fn test_unreadable_file_leaves_brain_unchanged() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let bad = study.path("rh.midthickness.surf.gii");
    study.corrupt(&bad);

    let result = brain.read_data_file(DataFileType::Surface, Structure::Invalid, &bad, false, &ctx());

    assert!(matches!(result, Err(BrainError::Load { .. })));
    assert_eq!(brain.number_of_files(), 2);
    assert!(brain.brain_structure(Structure::CortexRight).is_none());
}

// === Structure rules ===

#[test]
fn test_surface_required_before_metric() {
    let study = Study::new();
    let metric = study.metric("lh.thickness.func.gii", Structure::CortexLeft, 100, 1);
    let mut brain = brain();

    let err = brain
        .read_data_file(DataFileType::Metric, Structure::Invalid, &metric, false, &ctx())
        .unwrap_err();

    assert!(matches!(err, BrainError::SurfaceRequired { .. }));
    assert!(err.to_string().contains("Must read a surface"));
    assert_eq!(brain.number_of_files(), 0);
    assert!(brain.brain_structures().is_empty());
    assert_eq!(brain.spec_file().number_of_entries(), 0);
}

#[test]
fn test_invalid_structure_is_rejected() {
    let study = Study::new();
    let label = study.node_data(DataFileType::Label, "unknown.label.gii", Structure::Invalid, 100, 1);
    let mut brain = brain();

    let result = brain.read_data_file(DataFileType::Label, Structure::Invalid, &label, false, &ctx());

    assert!(matches!(result, Err(BrainError::InvalidStructure { .. })));
}

#[test]
fn test_structure_override_marks_modified() {
    let study = Study::new();
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 100);
    let metric = study.metric("sulc.func.gii", Structure::CortexRight, 100, 1);
    let mut brain = brain();
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &surface, false, &ctx())
        .unwrap();

    let id = brain
        .read_data_file(DataFileType::Metric, Structure::CortexLeft, &metric, true, &ctx())
        .unwrap();

    let file = brain.file(id).unwrap();
    assert_eq!(file.structure(), Structure::CortexLeft);
    assert!(file.is_modified());
    assert_eq!(brain.brain_structure(Structure::CortexLeft).unwrap().metric_files(), &[id]);
}

#[test]
fn test_metric_node_count_must_match_surface() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let other = study.metric("lh.curvature.func.gii", Structure::CortexLeft, 90, 1);

    let err = brain
        .read_data_file(DataFileType::Metric, Structure::Invalid, &other, false, &ctx())
        .unwrap_err();

    assert!(matches!(
        err,
        BrainError::NodeCountMismatch {
            file_nodes: 90,
            structure_nodes: 100,
            ..
        }
    ));
    assert_eq!(brain.number_of_files(), 2);
}

#[test]
fn test_node_count_holds_after_last_surface_is_removed() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let surface = brain.files_of_type(DataFileType::Surface)[0];
    assert!(brain.remove_and_delete_data_file(surface));
    assert_eq!(brain.brain_structure(Structure::CortexLeft).unwrap().number_of_nodes(), 100);

    let smaller = study.surface("lh.white.surf.gii", Structure::CortexLeft, 50);
    let err = brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &smaller, false, &ctx())
        .unwrap_err();

    assert!(matches!(
        err,
        BrainError::NodeCountMismatch {
            file_nodes: 50,
            structure_nodes: 100,
            ..
        }
    ));
    assert!(brain.files_of_type(DataFileType::Surface).is_empty());

    let matching = study.surface("lh.pial.surf.gii", Structure::CortexLeft, 100);
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &matching, false, &ctx())
        .unwrap();
    assert_eq!(brain.brain_structure(Structure::CortexLeft).unwrap().number_of_files(), 2);
}

// === CIFTI consistency ===

#[test]
fn test_cifti_counts_must_match_loaded_structures() {
    let study = Study::new();
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 32492);
    let mut brain = brain();
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &surface, false, &ctx())
        .unwrap();

    for wrong in [32491, 32493] {
        let path = study.dscalar(
            &format!("wrong_{wrong}.dscalar.nii"),
            &[(Structure::CortexLeft, wrong)],
        );
        let err = brain
            .read_data_file(DataFileType::ConnectivityDenseScalar, Structure::Invalid, &path, false, &ctx())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&wrong.to_string()), "{message}");
        assert!(message.contains("32492"), "{message}");
        assert!(brain.files_of_type(DataFileType::ConnectivityDenseScalar).is_empty());
    }

    let good = study.dscalar(
        "thickness.dscalar.nii",
        &[(Structure::CortexLeft, 32492), (Structure::CortexRight, 32000)],
    );
    brain
        .read_data_file(DataFileType::ConnectivityDenseScalar, Structure::Invalid, &good, false, &ctx())
        .unwrap();
    assert_eq!(brain.files_of_type(DataFileType::ConnectivityDenseScalar).len(), 1);
}

// === Reload ===

#[test]
fn test_failed_reload_keeps_registered_file() {
    let study = Study::new();
    let mut brain = brain();
    let (_, metric) = left_surface_and_metric(&study, &mut brain, 100);
    let id = brain.files_of_type(DataFileType::Metric)[0];
    let entries_before = brain.spec_file().number_of_entries();

    study.corrupt(&metric);
    let result = brain.reload_data_file(id, &ctx());

    assert!(matches!(result, Err(BrainError::Load { .. })));
    assert_eq!(brain.number_of_files(), 2);
    assert_eq!(brain.file(id).unwrap().number_of_maps(), 1);
    assert_eq!(brain.brain_structure(Structure::CortexLeft).unwrap().metric_files(), &[id]);
    assert!(brain.spec_file().contains_file(id));
    assert_eq!(brain.spec_file().number_of_entries(), entries_before);
}

#[test]
fn test_reload_with_wrong_node_count_keeps_registered_file() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let id = brain.files_of_type(DataFileType::Metric)[0];

    study.metric("lh.thickness.func.gii", Structure::CortexLeft, 90, 1);
    let result = brain.reload_data_file(id, &ctx());

    assert!(matches!(result, Err(BrainError::NodeCountMismatch { .. })));
    assert_eq!(brain.file(id).unwrap().number_of_nodes(), 100);
}

#[test]
fn test_reload_replaces_content_in_place() {
    let study = Study::new();
    let mut brain = brain();
    let (_, metric) = left_surface_and_metric(&study, &mut brain, 100);
    let id = brain.files_of_type(DataFileType::Metric)[0];

    study.metric("lh.thickness.func.gii", Structure::CortexLeft, 100, 3);
    let reloaded = brain.reload_data_file(id, &ctx()).unwrap();

    assert_eq!(reloaded, id);
    let file = brain.file(id).unwrap();
    assert_eq!(file.number_of_maps(), 3);
    assert_eq!(file.file_name(), metric);
    assert_eq!(brain.files_of_type(DataFileType::Metric), vec![id]);
    assert_eq!(brain.files_of_type(DataFileType::MetricDynamic).len(), 1);
}

#[test]
fn test_reload_all_continues_past_failures() {
    let study = Study::new();
    let mut brain = brain();
    let (surface, metric) = left_surface_and_metric(&study, &mut brain, 100);

    let names = brain.reload_all_files(ReloadAllMode::Enumerate, &ctx()).unwrap();
    assert_eq!(names, vec![surface.clone(), metric.clone()]);

    study.corrupt(&metric);
    let errors = brain.reload_all_files(ReloadAllMode::Reload, &ctx()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.lines()[0].contains("lh.thickness.func.gii"));
    assert_eq!(brain.number_of_files(), 2);
}

#[test]
fn test_scene_annotations_cannot_be_reloaded() {
    let mut brain = brain();
    let annotations = brain.scene_annotation_file();

    let result = brain.reload_data_file(annotations, &ctx());

    assert!(matches!(result, Err(BrainError::Unsupported { .. })));
}

// === Duplicate names ===

#[test]
fn test_duplicate_names_get_counter_suffix() {
    let mut brain = brain();

    let first = brain.add_data_file(in_memory_surface("/a/lh.surf.gii", 10)).unwrap();
    let second = brain.add_data_file(in_memory_surface("/b/lh.surf.gii", 10)).unwrap();
    let third = brain.add_data_file(in_memory_surface("/c/lh.surf.gii", 10)).unwrap();

    assert_eq!(brain.file(first).unwrap().file_name(), "/a/lh.surf.gii");
    assert_eq!(brain.file(second).unwrap().file_name(), "/b/lh_1.surf.gii");
    assert_eq!(brain.file(third).unwrap().file_name(), "/c/lh_2.surf.gii");
}

#[test]
fn test_duplicate_names_are_scoped_to_type() {
    let mut brain = brain();

    brain.add_data_file(in_memory_surface("/a/lh.surf.gii", 10)).unwrap();
    let border = brain.add_data_file(in_memory_border("/a/lh.surf.gii")).unwrap();

    assert_eq!(brain.file(border).unwrap().file_name(), "/a/lh.surf.gii");
}

#[test]
fn test_renamed_duplicate_keeps_its_path_on_disk() {
    let study = Study::new();
    let mut brain = brain();
    let (first, second) = same_named_metrics(&study, &mut brain);
    let metrics = brain.files_of_type(DataFileType::Metric);
    let renamed = metrics[1];

    let file = brain.file(renamed).unwrap();
    assert_eq!(file.file_name(), study.path("b/data_1.func.gii"));
    assert!(!file.is_modified());
    assert_eq!(brain.source_path(renamed), Some(second.as_str()));
    assert_eq!(brain.source_path(metrics[0]), Some(first.as_str()));
    let (_, entry) = brain.spec_file().entry_for_file(renamed).unwrap();
    assert_eq!(entry.file_name, second);
    assert_eq!(brain.find_file(DataFileType::Metric, &second), Some(renamed));

    let names = brain.reload_all_files(ReloadAllMode::Enumerate, &ctx()).unwrap();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&study.path("b/data_1.func.gii")));
}

#[test]
fn test_renamed_duplicate_reloads_and_writes_to_its_path() {
    let study = Study::new();
    let mut brain = brain();
    let (_, second) = same_named_metrics(&study, &mut brain);
    let renamed = brain.files_of_type(DataFileType::Metric)[1];

    study.metric("b/data.func.gii", Structure::CortexLeft, 100, 3);
    assert_eq!(brain.reload_data_file(renamed, &ctx()).unwrap(), renamed);

    let file = brain.file(renamed).unwrap();
    assert_eq!(file.number_of_maps(), 3);
    assert_eq!(file.file_name(), study.path("b/data_1.func.gii"));
    assert_eq!(brain.source_path(renamed), Some(second.as_str()));

    brain.reload_all_files(ReloadAllMode::Reload, &ctx()).unwrap();
    brain.write_data_file(renamed).unwrap();
    assert!(!study.exists("b/data_1.func.gii"));
    assert_eq!(brain.files_of_type(DataFileType::Metric).len(), 2);
}

fn names_after_adding(surfaces: usize, borders: usize) -> Vec<String> {
    let mut brain = brain();
    for i in 0..surfaces.max(borders) {
        if i < surfaces {
            brain
                .add_data_file(in_memory_surface(&format!("/d{i}/lh.surf.gii"), 10))
                .unwrap();
        }
        if i < borders {
            brain.add_data_file(in_memory_border(&format!("/d{i}/lh.border"))).unwrap();
        }
    }
    brain.file_names_of_type(DataFileType::Surface)
}

proptest! {
    #[test]
    fn duplicate_names_are_unique_and_deterministic(surfaces in 1usize..6, borders in 0usize..4) {
        let names = names_after_adding(surfaces, borders);

        prop_assert_eq!(names.len(), surfaces);
        let mut base_names: Vec<String> = names.iter().map(|n| imcortex_io::file_name_no_path(n)).collect();
        base_names.sort();
        base_names.dedup();
        prop_assert_eq!(base_names.len(), surfaces);

        for (i, name) in names.iter().enumerate() {
            let expected = if i == 0 {
                "/d0/lh.surf.gii".to_string()
            } else {
                format!("/d{i}/lh_{i}.surf.gii")
            };
            prop_assert_eq!(name, &expected);
        }
        prop_assert_eq!(names, names_after_adding(surfaces, 0));
    }
}

// === Dynamic companions ===

#[test]
fn test_multi_map_metric_gets_companion() {
    let study = Study::new();
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 100);
    let metric = study.metric("lh.task.func.gii", Structure::CortexLeft, 100, 4);
    let mut brain = brain();
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &surface, false, &ctx())
        .unwrap();
    let parent = brain
        .read_data_file(DataFileType::Metric, Structure::Invalid, &metric, false, &ctx())
        .unwrap();

    let companions = brain.files_of_type(DataFileType::MetricDynamic);
    assert_eq!(companions.len(), 1);
    let companion = companions[0];
    assert!(!brain.file(companion).unwrap().is_enabled_as_layer());
    assert!(brain.spec_file().entries().all(|(t, _)| t != DataFileType::MetricDynamic));

    assert!(brain.remove_without_delete_data_file(companion).is_none());
    assert_eq!(brain.files_of_type(DataFileType::MetricDynamic), vec![companion]);

    assert!(brain.remove_and_delete_data_file(parent));
    assert!(brain.files_of_type(DataFileType::MetricDynamic).is_empty());
    assert!(brain.file(companion).is_none());
}

#[test]
fn test_companion_default_follows_preference() {
    let study = Study::new();
    let surface = study.surface("lh.midthickness.surf.gii", Structure::CortexLeft, 100);
    let metric = study.metric("lh.task.func.gii", Structure::CortexLeft, 100, 4);
    let preferences = CortexPreferences {
        dynamic_connectivity_default_on: true,
        ..Default::default()
    };
    let mut brain = Brain::new(preferences);
    brain
        .read_data_file(DataFileType::Surface, Structure::Invalid, &surface, false, &ctx())
        .unwrap();
    brain
        .read_data_file(DataFileType::Metric, Structure::Invalid, &metric, false, &ctx())
        .unwrap();

    let companion = brain.files_of_type(DataFileType::MetricDynamic)[0];
    assert!(brain.file(companion).unwrap().is_enabled_as_layer());
}

// === Removal and writing ===

#[test]
fn test_remove_last_surface_prunes_structure() {
    let study = Study::new();
    let mut brain = brain();
    left_surface_and_metric(&study, &mut brain, 100);
    let metric = brain.files_of_type(DataFileType::Metric)[0];
    let surface = brain.files_of_type(DataFileType::Surface)[0];

    let removed = brain.remove_without_delete_data_file(metric).unwrap();
    assert_eq!(removed.data_file_type(), DataFileType::Metric);
    assert!(!brain.spec_file().contains_file(metric));

    assert!(brain.remove_and_delete_data_file(surface));
    assert!(brain.brain_structures().is_empty());
    assert_eq!(brain.number_of_files(), 0);
}

#[test]
fn test_scene_annotations_are_cleared_not_removed() {
    let mut brain = brain();
    let annotations = brain.scene_annotation_file();

    assert!(brain.remove_without_delete_data_file(annotations).is_none());
    assert!(brain.remove_and_delete_data_file(annotations));
    assert!(brain.file(annotations).is_some());
    assert!(brain.write_data_file(annotations).is_err());
}

#[test]
fn test_write_in_memory_file_registers_it() {
    let study = Study::new();
    let name = study.path("new.surf.gii");
    let mut brain = brain();
    let id = brain.add_data_file(in_memory_surface(&name, 10)).unwrap();
    brain.file_mut(id).unwrap().set_modified();

    brain.write_data_file(id).unwrap();

    assert!(study.exists("new.surf.gii"));
    assert!(!brain.file(id).unwrap().is_modified());
    assert!(brain.spec_file().contains_file(id));
}

#[test]
fn test_write_to_remote_name_fails() {
    let mut brain = brain();
    let id = brain
        .add_data_file(in_memory_surface("https://example.org/lh.surf.gii", 10))
        .unwrap();

    let result = brain.write_data_file(id);

    assert!(matches!(result, Err(BrainError::Write { .. })));
}

mod common;

use common::{scratch_dir, SimulationBuilder};
use hexcell_io::{read_json_file, Frame, IoError, RuleFile};

#[test]
fn test_save_and_load_round_trip() {
    let dir = scratch_dir("round_trip");
    let sim = SimulationBuilder::new().with_states(5).with_radius(2).build();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rule.dat");
    sim.save_rule_to(&path).unwrap();

    let mut other = SimulationBuilder::new().with_seed(7).build();
    other.load_rule(&path).unwrap();

    assert_eq!(other.rules(), sim.rules());
    assert_eq!(other.palette(), sim.palette());
    assert_eq!(other.settings().state_count, 5);
    assert_eq!(other.settings().radius, 2);
    assert_eq!(other.rule_age(), 0);
    assert_states_valid!(other.grid(), 5);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_truncated_file_keeps_current_rule() {
    let dir = scratch_dir("truncated");
    std::fs::create_dir_all(&dir).unwrap();

    let source = SimulationBuilder::new().with_states(4).with_radius(1).build();
    let valid = dir.join("valid.dat");
    source.save_rule_to(&valid).unwrap();

    let mut sim = SimulationBuilder::new().with_seed(9).build();
    sim.load_rule(&valid).unwrap();
    let rules = sim.rules().clone();
    let palette = sim.palette().clone();
    let settings = sim.settings().clone();

    // Header is 24 bytes; cut inside the second palette color.
    let bytes = std::fs::read(&valid).unwrap();
    let truncated = dir.join("truncated.dat");
    std::fs::write(&truncated, &bytes[..24 + 4]).unwrap();

    let err = sim.load_rule(&truncated).unwrap_err();
    let io_err = err.downcast_ref::<IoError>().expect("io error");
    assert!(io_err.is_invalid_rule_file());

    assert_eq!(sim.rules(), &rules);
    assert_eq!(sim.palette(), &palette);
    assert_eq!(sim.settings(), &settings);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_file_is_filesystem_error() {
    let mut sim = SimulationBuilder::new().build();
    let err = sim
        .load_rule(scratch_dir("missing").join("nope.dat"))
        .unwrap_err();
    let io_err = err.downcast_ref::<IoError>().expect("io error");
    assert!(!io_err.is_invalid_rule_file());
}

#[test]
fn test_library_save_then_load_random() {
    let dir = scratch_dir("library");
    let sim = SimulationBuilder::new().with_library(&dir).build();
    let saved = sim.save_rule().unwrap();
    assert!(saved.starts_with(&dir));
    assert!(saved.to_string_lossy().ends_with("_rule.dat"));

    let mut other = SimulationBuilder::new()
        .with_seed(3)
        .with_states(6)
        .with_library(&dir)
        .build();
    let loaded = other.load_random_rule().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(other.rules(), sim.rules());
    assert_eq!(other.settings().state_count, 3);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_empty_library_reports_empty_file_set() {
    let dir = scratch_dir("empty_library");
    let mut sim = SimulationBuilder::new().with_library(&dir).build();
    let rules = sim.rules().clone();

    let err = sim.load_random_rule().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IoError>(),
        Some(IoError::EmptyFileSet { .. })
    ));
    assert_eq!(sim.rules(), &rules);
}

#[test]
fn test_rule_file_matches_simulation() {
    let sim = SimulationBuilder::new().build();
    let file = sim.rule_file();
    assert_eq!(file.state_count(), 3);
    assert_eq!(file.radius(), 1);

    let decoded = RuleFile::decode(&file.encode().unwrap()).unwrap();
    assert_eq!(decoded, file);
}

#[test]
fn test_export_frame() {
    let dir = scratch_dir("frame");
    std::fs::create_dir_all(&dir).unwrap();
    let mut sim = SimulationBuilder::new().with_dimension(8, 4).build();
    sim.run(2);

    let path = dir.join("frame.json");
    sim.export_frame(&path).unwrap();
    let frame: Frame = read_json_file(&path).unwrap();

    assert_eq!(frame.generation, 2);
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(frame.cells, sim.grid().cells());
    assert_eq!(frame.palette.len(), 3);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["cells"].as_array().map(Vec::len), Some(32));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_save_after_state_count_change() {
    let dir = scratch_dir("state_count_change");
    std::fs::create_dir_all(&dir).unwrap();
    let mut sim = SimulationBuilder::new().with_states(3).build();
    sim.set_state_count(6).unwrap();

    let path = dir.join("six.dat");
    sim.save_rule_to(&path).unwrap();

    let loaded = RuleFile::load(&path).unwrap();
    assert_eq!(loaded.state_count(), 6);
    assert_eq!(loaded.palette.len(), 6);
    assert_eq!(&loaded.palette, sim.palette());
    let _ = std::fs::remove_dir_all(&dir);
}

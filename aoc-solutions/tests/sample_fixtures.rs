//! Every registered solution must pass its own sample fixtures

use aoc_solver::{DynSolution, SolutionRegistryBuilder, TestGate};
use std::path::PathBuf;

// Pull the plugin submissions into the test binary
use aoc_solutions as _;

fn data_dir(day: u8) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("data")
        .join(format!("Day {day:02}"))
}

#[test]
fn test_all_registered_days_pass_their_samples() {
    let registry = SolutionRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();
    assert_eq!(registry.days().collect::<Vec<_>>(), vec![1, 4, 5, 10, 11, 12]);

    for entry in registry.iter() {
        let dir = data_dir(entry.day);
        let report = TestGate::new(&dir)
            .mute(true)
            .run(entry.solution)
            .unwrap_or_else(|e| panic!("day {}: {e}", entry.day));
        assert!(report.passed >= 2, "day {} ran {} fixtures", entry.day, report.passed);
    }
}

#[test]
fn test_extended_fixture_shapes_are_used() {
    let registry = SolutionRegistryBuilder::new()
        .register_solution_plugins(|plugin| plugin.day == 1 || plugin.day == 4)
        .unwrap()
        .build();

    let day_one = registry.get(1).unwrap();
    let report = TestGate::new(&data_dir(1)).run(day_one.solution).unwrap();
    assert_eq!(report.passed, 3);

    let day_four = registry.get(4).unwrap();
    let report = TestGate::new(&data_dir(4)).run(day_four.solution).unwrap();
    assert_eq!(report.passed, 3);
}

#[test]
fn test_slow_days_declare_slowness() {
    let registry = SolutionRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();
    let slow: Vec<u8> = registry
        .iter()
        .filter(|entry| entry.solution.options().slowness.is_some())
        .map(|entry| entry.day)
        .collect();
    assert_eq!(slow, vec![11, 12]);
}

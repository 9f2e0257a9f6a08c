mod common;

use common::{assert_body_matches, assert_close, assert_swimbot_matches};
use rand::rngs::mock::StepRng;
use std::path::Path;
use swimbots_core::body::reposition_body;
use swimbots_core::config::SimConfig;
use swimbots_core::motion::{advance, steer};
use swimbots_core::reproduction::mate;
use swimbots_io::codec::{
    decode_pond, decode_segment_tree, decode_swimbot, encode_segment_tree,
};
use swimbots_io::fixtures::{paired_fixtures, read_fixture};

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_dir(set: &str, dir: &str) -> String {
    format!("{}/{}/{}", FIXTURES, set, dir)
}

fn read(path: &Path) -> String {
    read_fixture(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn test_copy_segment_tree_fixtures() {
    let pairs = paired_fixtures(
        fixture_dir("copy_segment_tree", "input"),
        fixture_dir("copy_segment_tree", "output"),
    )
    .unwrap();
    assert!(!pairs.is_empty());

    for (input, output) in pairs {
        let original = decode_segment_tree(&read(&input))
            .unwrap_or_else(|e| panic!("{}: {}", input.display(), e));
        let copy = original.clone();
        assert_eq!(copy, original);

        let expected = read(&output);
        assert_eq!(
            encode_segment_tree(&copy),
            expected,
            "{} does not reproduce {}",
            input.display(),
            output.display()
        );
    }
}

#[test]
fn test_branching_fixture_shape() {
    let path = format!("{}/input/02_branching.txt", fixture_dir("copy_segment_tree", ""));
    let body = decode_segment_tree(&read(Path::new(&path))).unwrap();

    assert_eq!(body.len(), 4);
    assert_eq!(body.children_of(0), &[1, 2]);
    assert_eq!(body.children_of(1), &[3]);
    assert_eq!(body.preorder(), vec![0, 1, 3, 2]);
    assert_eq!(body.get(3).unwrap().angle, -0.5);
}

#[test]
fn test_missing_output_dir_is_rejected() {
    let result = paired_fixtures(
        fixture_dir("copy_segment_tree", "input"),
        fixture_dir("copy_segment_tree", "missing"),
    );
    assert!(result.is_err());
}

/// Prior pond plus swimbot in, the swimbot after one steer and advance out.
#[test]
fn test_steer_fixtures() {
    let config = SimConfig::default();
    let inputs = paired_fixtures(
        fixture_dir("steer", "input_pond"),
        fixture_dir("steer", "input_swimbot"),
    )
    .unwrap();
    let outputs = paired_fixtures(
        fixture_dir("steer", "input_swimbot"),
        fixture_dir("steer", "output"),
    )
    .unwrap();

    for ((pond_path, bot_path), (_, output)) in inputs.into_iter().zip(outputs) {
        let context = bot_path.display().to_string();
        let prior = decode_pond(&read(&pond_path)).unwrap();
        let mut bot = decode_swimbot(&read(&bot_path)).unwrap();
        let expected = decode_swimbot(&read(&output)).unwrap();

        steer(&mut bot, &prior, config.metabolism.energy_loss_factor).unwrap();
        advance(&mut bot, config.run.time_step).unwrap();

        assert_swimbot_matches(&bot, &expected, &context);
    }
}

/// Swimbot with stale segment poses in, the repositioned segment tree out.
#[test]
fn test_reposition_body_fixtures() {
    let pairs = paired_fixtures(
        fixture_dir("reposition_body", "input"),
        fixture_dir("reposition_body", "output"),
    )
    .unwrap();

    for (input, output) in pairs {
        let context = input.display().to_string();
        let mut bot = decode_swimbot(&read(&input)).unwrap();
        let expected = decode_segment_tree(&read(&output)).unwrap();

        reposition_body(&mut bot.body, &bot.segment_genes).unwrap();
        assert_body_matches(&bot.body, &expected, &context);
    }
}

#[test]
fn test_quarter_turn_poses_follow_the_pi_minus_angle_rule() {
    // Root at the origin, heading 0, length 8. The x offset of every half
    // segment is 0.5 * length * cos(PI - angle), the y offset 0.5 * length * sin(angle).
    let path = format!("{}/02_quarter_turns.txt", fixture_dir("reposition_body", "output"));
    let body = decode_segment_tree(&read(Path::new(&path))).unwrap();

    let expected = [(1, -4.0, 2.0), (2, -4.0, -3.0), (3, -3.0, 4.0)];
    for (index, x, y) in expected {
        let segment = body.get(index).unwrap();
        assert_close(segment.position.x, x, &format!("segment {} x", index));
        assert_close(segment.position.y, y, &format!("segment {} y", index));
    }
}

/// Pond plus parent indices and RNG state in, the appended child out.
///
/// The indices file holds the two parent slots, the expected child slot,
/// then the start value and increment of a [`StepRng`].
#[test]
fn test_mate_fixtures() {
    let config = SimConfig::default();
    let inputs = paired_fixtures(
        fixture_dir("mate", "input_pond"),
        fixture_dir("mate", "input_indices"),
    )
    .unwrap();
    let outputs = paired_fixtures(
        fixture_dir("mate", "input_indices"),
        fixture_dir("mate", "output"),
    )
    .unwrap();

    for ((pond_path, indices_path), (_, output)) in inputs.into_iter().zip(outputs) {
        let context = indices_path.display().to_string();
        let mut pond = decode_pond(&read(&pond_path)).unwrap();
        let values: Vec<u64> = read(&indices_path)
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.trim().parse().unwrap())
            .collect();
        let [first, second, child, start, step] = values[..] else {
            panic!("{}: expected five values", context);
        };
        let (first, second, child) = (first as usize, second as usize, child as usize);
        let expected = decode_swimbot(&read(&output)).unwrap();

        let energies = (
            pond.swimbot(first).unwrap().energy,
            pond.swimbot(second).unwrap().energy,
        );
        let mut rng = StepRng::new(start, step);
        let index = mate(&mut pond, first, second, &config, &mut rng).unwrap();

        assert_eq!(index, Some(child), "{}: child slot", context);
        assert_swimbot_matches(pond.swimbot(child).unwrap(), &expected, &context);
        assert_eq!(pond.swimbot(first).unwrap().energy, energies.0 * 0.5);
        assert_eq!(pond.swimbot(second).unwrap().energy, energies.1 * 0.5);
        assert!(pond.swimbot(first).unwrap().is_related_to(child));
        assert!(pond.swimbot(second).unwrap().is_related_to(child));
    }
}

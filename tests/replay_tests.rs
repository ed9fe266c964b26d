use gcode_machine::replay::{replay, ReplayOptions};
use gcode_machine::{Axis, Error, ErrorPolicy, StateMachine};
use std::io::Cursor;

const PROGRAM: &str = "G1 X1\nG1 X2 X3\nG1 Y4\nM999\nG1 Z5\n";

#[test]
fn test_abort_stops_at_first_failure() {
    let mut machine = StateMachine::new();
    let err = replay(Cursor::new(PROGRAM), &mut machine, ReplayOptions::default())
        .expect_err("second line repeats X");

    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::RepeatCode('X')));
    assert!(err.to_string().contains("line 2"));
    assert_eq!(machine.position().get(Axis::X), Some(1.0));
    assert_eq!(machine.position().get(Axis::Y), None);
}

#[test]
fn test_continue_collects_failures() {
    let mut machine = StateMachine::new();
    let options = ReplayOptions {
        on_error: ErrorPolicy::Continue,
        parse_only: false,
    };

    let summary = replay(Cursor::new(PROGRAM), &mut machine, options).expect("replay");

    assert_eq!(summary.lines, 5);
    let failed: Vec<_> = summary.failures.iter().map(|f| f.line).collect();
    assert_eq!(failed, vec![2, 4]);
    assert_eq!(summary.failures[1].text, "M999");
    assert_eq!(machine.position().get(Axis::X), Some(1.0));
    assert_eq!(machine.position().get(Axis::Y), Some(4.0));
    assert_eq!(machine.position().get(Axis::Z), Some(5.0));
}

#[test]
fn test_parse_only_accepts_unknown_codes() {
    let mut machine = StateMachine::new();
    let options = ReplayOptions {
        on_error: ErrorPolicy::Abort,
        parse_only: true,
    };

    let summary = replay(Cursor::new("M999\nG28 X Y\n"), &mut machine, options).expect("replay");
    assert!(summary.is_clean());
}

#[test]
fn test_latin1_comment_does_not_stop_replay() {
    let program: &[u8] = b"G1 X1\nG1 X2 ; 200\xb0C\nG1 Y3\n";
    let mut machine = StateMachine::new();
    let options = ReplayOptions {
        on_error: ErrorPolicy::Continue,
        parse_only: false,
    };

    let summary = replay(Cursor::new(program), &mut machine, options).expect("replay");

    assert_eq!(summary.lines, 3);
    assert!(summary.is_clean());
    assert_eq!(machine.position().get(Axis::X), Some(2.0));
    assert_eq!(machine.position().get(Axis::Y), Some(3.0));
}

#[test]
fn test_invalid_bytes_in_command_follow_policy() {
    let program: &[u8] = b"G1 X1\n\xb0G1 X2\nG1 Y3\n";
    let mut machine = StateMachine::new();
    let options = ReplayOptions {
        on_error: ErrorPolicy::Continue,
        parse_only: false,
    };

    let summary = replay(Cursor::new(program), &mut machine, options).expect("replay");

    let failed: Vec<_> = summary.failures.iter().map(|f| f.line).collect();
    assert_eq!(failed, vec![2]);
    assert_eq!(machine.position().get(Axis::X), Some(1.0));
    assert_eq!(machine.position().get(Axis::Y), Some(3.0));

    let mut machine = StateMachine::new();
    let err = replay(Cursor::new(program), &mut machine, ReplayOptions::default())
        .expect_err("second line starts with an undecodable byte");
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidCode { .. })
    ));
}

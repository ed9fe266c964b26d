use gcode_machine::{parse_command, Error, RegisterMap, RegisterValue};

fn registers(entries: &[(char, RegisterValue)]) -> RegisterMap {
    entries.iter().copied().collect()
}

#[test]
fn test_empty_string() {
    assert_eq!(parse_command(""), Ok(RegisterMap::new()));
}

#[test]
fn test_garbage_code() {
    for command in ["1", "~"] {
        assert!(
            matches!(parse_command(command), Err(Error::InvalidCode { .. })),
            "{command} should be an invalid code"
        );
    }
}

#[test]
fn test_single_code_garbage_value() {
    for command in ["Ga", "G1a", "G12345a", "G1..0", "G1,0"] {
        assert!(
            matches!(parse_command(command), Err(Error::InvalidNumber { code: 'G', .. })),
            "{command} should be a malformed number"
        );
    }
}

#[test]
fn test_single_code_accepts_lowercase() {
    assert_eq!(parse_command("g"), Ok(registers(&[('G', RegisterValue::Flag)])));
}

#[test]
fn test_single_code_no_value() {
    assert_eq!(parse_command("G"), Ok(registers(&[('G', RegisterValue::Flag)])));
}

#[test]
fn test_single_code_with_value() {
    assert_eq!(parse_command("G0"), Ok(registers(&[('G', RegisterValue::Number(0.0))])));
}

#[test]
fn test_single_code_leading_whitespace() {
    assert_eq!(parse_command("\t\t\t G0"), Ok(registers(&[('G', RegisterValue::Number(0.0))])));
}

#[test]
fn test_repeated_code() {
    assert_eq!(parse_command("G0 G0"), Err(Error::RepeatCode('G')));
}

#[test]
fn test_repeated_code_is_case_insensitive() {
    assert_eq!(parse_command("G1 x1 X2"), Err(Error::RepeatCode('X')));
}

#[test]
fn test_reject_g_then_m_code() {
    assert_eq!(parse_command("G0 M0"), Err(Error::MultipleCommandCode));
}

#[test]
fn test_reject_m_then_g_code() {
    assert_eq!(parse_command("M0 G0"), Err(Error::MultipleCommandCode));
}

#[test]
fn test_many_codes() {
    let expected = registers(&[
        ('M', RegisterValue::Number(0.0)),
        ('X', RegisterValue::Number(1.0)),
        ('Y', RegisterValue::Number(2.0)),
        ('Z', RegisterValue::Number(3.0)),
        ('F', RegisterValue::Number(4.0)),
    ]);
    assert_eq!(parse_command("M0 X1 Y2 Z3 F4"), Ok(expected));
}

#[test]
fn test_signed_and_fractional_values() {
    let parsed = parse_command("G1 X-14.08 Y+2.5 Z.27 E3.").unwrap();
    assert_eq!(parsed.number('X'), Some(-14.08));
    assert_eq!(parsed.number('Y'), Some(2.5));
    assert_eq!(parsed.number('Z'), Some(0.27));
    assert_eq!(parsed.number('E'), Some(3.0));
}

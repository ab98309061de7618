use crate::{ControlError, SyncCounts, UpdateState};

#[test]
fn given_tab_separated_counts_when_parsed_then_ahead_first_behind_second() {
    let counts = SyncCounts::parse("0\t3\n").unwrap();

    assert_eq!(counts, SyncCounts { ahead: 0, behind: 3 });
    assert_eq!(counts.state(), UpdateState::Available(3));
}

#[test]
fn given_space_separated_counts_when_parsed_then_accepted() {
    let counts = SyncCounts::parse("  2 0  ").unwrap();

    assert_eq!(counts.state(), UpdateState::Ahead(2));
}

#[test]
fn given_single_number_when_parsed_then_parse_error() {
    let result = SyncCounts::parse("3");

    assert!(matches!(result, Err(ControlError::SyncParseFailed { .. })));
}

#[test]
fn given_three_numbers_when_parsed_then_parse_error() {
    let result = SyncCounts::parse("1\t2\t3");

    assert!(matches!(result, Err(ControlError::SyncParseFailed { .. })));
}

#[test]
fn given_negative_count_when_parsed_then_parse_error() {
    assert!(SyncCounts::parse("-1\t0").is_err());
}

#[test]
fn given_empty_output_when_parsed_then_parse_error() {
    assert!(SyncCounts::parse("").is_err());
}

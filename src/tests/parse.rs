use proptest::prelude::*;

use crate::{
	contract,
	dice::{DiceTerm, SimpleDice},
	parse,
	term::Term,
};

fn dice(entries: &[(i32, i32)]) -> Term {
	Term::Dice(entries.iter().map(|&(times, max)| SimpleDice::new(times, max)).collect())
}

#[test]
fn single_segments() {
	assert_eq!(parse("d20").unwrap(), dice(&[(1, 20)]));
	assert_eq!(parse("D20").unwrap(), dice(&[(1, 20)]));
	assert_eq!(parse("3d8").unwrap(), dice(&[(3, 8)]));
	assert_eq!(parse("-2d6").unwrap(), dice(&[(-2, 6)]));
	assert_eq!(parse("+d4").unwrap(), dice(&[(1, 4)]));
	assert_eq!(parse("42").unwrap(), dice(&[(42, 1)]));
	assert_eq!(parse("-7").unwrap(), dice(&[(-7, 1)]));
}

#[test]
fn sums_keep_written_order() {
	let term = parse("3d8 + d12 - D21 + 3 + 3 - 3").unwrap();
	assert_eq!(term, dice(&[(3, 8), (1, 12), (-1, 21), (3, 1), (3, 1), (-3, 1)]));
	assert_eq!(term.to_string(), "+3D8 +1D12 -1D21 +3 +3 -3");
}

#[test]
fn sign_runs_are_combined() {
	assert_eq!(parse("d20+-2").unwrap(), dice(&[(1, 20), (-2, 1)]));
	assert_eq!(parse("d20--2").unwrap(), dice(&[(1, 20), (2, 1)]));
	assert_eq!(parse("--d20").unwrap(), dice(&[(1, 20)]));
	assert_eq!(parse("-+-+-d6").unwrap(), dice(&[(-1, 6)]));
}

#[test]
fn whitespace_is_insignificant() {
	assert_eq!(parse("  3 d 8 +\t2 ").unwrap(), dice(&[(3, 8), (2, 1)]));
	assert_eq!(parse("d 2 0 - 1").unwrap(), dice(&[(1, 20), (-1, 1)]));
}

#[test]
fn zero_terms() {
	assert_eq!(parse("+0").unwrap(), Term::Dice(DiceTerm::EMPTY));
	assert_eq!(parse("0d6").unwrap(), Term::Dice(DiceTerm::EMPTY));
	assert_eq!(parse("d0").unwrap(), dice(&[(1, 1)]));
}

#[test]
fn containment_after_parsing() {
	let term = parse("D20+-2").unwrap();
	assert!(term.contains(&Term::die(20)));
	assert!(term.contains(&Term::Num(-2)));
	assert!(!term.contains(&Term::Num(2)));
	assert!(!term.contains(&Term::die(6)));
}

#[test]
fn invalid_input() {
	assert!(parse("").is_err());
	assert!(parse("   ").is_err());
	assert!(parse("x20 + -1").is_err());
	assert!(parse("d20 +").is_err());
	assert!(parse("d20 + + ").is_err());
	assert!(parse("2d6 * 3").is_err());
	assert!(parse("5d-6").is_err());
	assert!(parse("d20 + d").is_err());
}

#[test]
fn unspecified_faces() {
	for input in ["d", "3d", "-D", "3d8 - 2D", "d20 + d", "d20 + 4d + 2"] {
		let err = parse(input).unwrap_err();
		assert!(
			err.details.contains("unspecified number of faces"),
			"unexpected error for {input}: {err}"
		);
	}
}

#[test]
fn number_overflow() {
	for input in ["99999999999", "99999999999d6", "d6 + 99999999999", "2147483648", "+2147483648d6"] {
		let err = parse(input).unwrap_err();
		assert!(err.details.contains("dice count"), "unexpected error for {input}: {err}");
	}

	let err = parse("d99999999999").unwrap_err();
	assert!(err.details.contains("dice faces"), "unexpected error: {err}");
}

#[test]
fn extreme_counts() {
	assert_eq!(parse("-2147483648").unwrap(), Term::Dice(SimpleDice::constant(i32::MIN).into()));
	assert_eq!(parse("-2147483648d6").unwrap(), dice(&[(i32::MIN, 6)]));
	assert_eq!(parse("2147483647D20").unwrap(), dice(&[(i32::MAX, 20)]));
	assert_eq!(
		parse("d4294967295").unwrap(),
		Term::Dice(SimpleDice::die(u32::MAX).into())
	);

	// Saturated counts render in a form that parses back to the same term
	let contracted = contract(&dice(&[(-2_147_483_647, 1), (-1, 1), (-5, 1)]));
	assert_eq!(contracted.to_string(), "-2147483648");
	assert_eq!(parse(&contracted.to_string()).unwrap(), contracted);

	let contracted = contract(&Term::sum(Term::Die(u32::MAX), Term::Die(u32::MAX)));
	assert_eq!(parse(&contracted.to_string()).unwrap(), contracted);
}

#[test]
fn from_str() {
	let single: SimpleDice = "-4d6".parse().unwrap();
	assert_eq!(single, SimpleDice::new(-4, 6));
	assert!("d6 + 1".parse::<SimpleDice>().is_err());

	let flat: DiceTerm = "2d6 + 1".parse().unwrap();
	assert_eq!(flat.len(), 2);

	let term: Term = "2d6 + 1".parse().unwrap();
	assert_eq!(term, Term::Dice(flat));
}

#[test]
fn contracted_output_reparses() {
	let term = parse("3d8 + d12 - D21 + 3 + 3 - 3 + 2d12 - d8").unwrap();
	let contracted = contract(&term);
	assert_eq!(contracted.to_string(), "-1D21 +3D12 +2D8 +3");
	assert_eq!(parse(&contracted.to_string()).unwrap(), contracted);
}

/// Generates a single segment of notation, with a random sign, count, and number of faces
fn segment_strategy() -> impl Strategy<Value = String> {
	(
		prop_oneof![Just(""), Just("+"), Just("-"), Just("+-"), Just("--")],
		prop::option::of(0_u16..=500),
		prop::option::of(prop_oneof![Just('d'), Just('D')]),
		0_u16..=100,
	)
		.prop_map(|(sign, count, die, faces)| match (count, die) {
			(Some(count), Some(die)) => format!("{sign}{count}{die}{faces}"),
			(None, Some(die)) => format!("{sign}{die}{faces}"),
			(Some(count), None) => format!("{sign}{count}"),
			(None, None) => format!("{sign}{faces}"),
		})
}

/// Generates a full flat sum of segments, separated by random whitespace
fn notation_strategy() -> impl Strategy<Value = String> {
	(segment_strategy(), prop::collection::vec((prop_oneof![Just("+"), Just("-")], segment_strategy()), 0..12))
		.prop_map(|(first, rest)| {
			rest.into_iter().fold(first, |acc, (op, segment)| format!("{acc} {op} {segment}"))
		})
}

/// Generates flat sums directly from entries with small counts
fn dice_term_strategy() -> impl Strategy<Value = DiceTerm> {
	prop::collection::vec((-1000_i32..=1000, 0_i32..=120), 0..16)
		.prop_map(|entries| entries.into_iter().map(|(times, max)| SimpleDice::new(times, max)).collect())
}

/// Generates flat sums whose counts and faces reach the bounds of their types, so contraction saturates
fn extreme_dice_term_strategy() -> impl Strategy<Value = DiceTerm> {
	let times = prop_oneof![
		-1000_i32..=1000,
		Just(i32::MIN),
		Just(i32::MIN + 1),
		Just(i32::MAX),
		any::<i32>(),
	];
	let faces = prop_oneof![0_u32..=120, Just(u32::MAX), any::<u32>()];
	prop::collection::vec((times, faces), 0..16).prop_map(|entries| {
		entries
			.into_iter()
			.map(|(times, faces)| SimpleDice::from_parts(times, faces))
			.collect()
	})
}

proptest! {
	#[test]
	fn notation_always_parses(input in notation_strategy()) {
		prop_assert!(parse(&input).is_ok(), "failed to parse {}", input);
	}

	#[test]
	fn contraction_is_idempotent(input in notation_strategy()) {
		let contracted = contract(&parse(&input).unwrap());
		prop_assert_eq!(contract(&contracted), contracted);
	}

	#[test]
	fn contracted_terms_round_trip(flat in extreme_dice_term_strategy()) {
		let contracted = Term::Dice(flat.contract());
		let reparsed = parse(&contracted.to_string()).unwrap();
		prop_assert_eq!(reparsed, contracted);
	}

	#[test]
	fn contraction_keeps_average(flat in dice_term_strategy()) {
		let contracted = flat.contract();
		prop_assert!((contracted.average() - flat.average()).abs() < 1e-6);
		prop_assert!(contracted.is_contracted());
	}
}

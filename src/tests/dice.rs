use crate::dice::{
	roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
	Error, RolledDice, SimpleDice, MAX_ROLLS,
};

#[test]
fn single_d20() {
	let dice = construct(1, 20);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 1);
	assert_eq!(rolled.dice, dice);
}

#[test]
fn double_d8() {
	let dice = construct(2, 8);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 2);
}

#[test]
fn hundred_d42s() {
	let dice = construct(100, 42);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 100);
}

#[test]
fn sign_placement_is_irrelevant() {
	assert_eq!(SimpleDice::new(-1, 20), SimpleDice::new(1, -20));
	assert_eq!(SimpleDice::new(-1, -20), SimpleDice::new(1, 20));
	assert_eq!(SimpleDice::new(-3, 6).faces(), 6);
	assert_eq!(SimpleDice::new(3, -6).times(), -3);
}

#[test]
fn faceless_dice_are_constants() {
	for faces in [-1, 0, 1] {
		let dice = SimpleDice::new(4, faces);
		assert!(dice.is_constant());
		assert_eq!(dice.faces(), 1);
	}

	let rolled = SimpleDice::new(-4, 1).roll(&mut MaxRoller).unwrap();
	assert!(rolled.rolls.is_empty());
	assert_eq!(rolled.total().unwrap(), -4);
}

#[test]
fn extreme_counts_saturate() {
	assert_eq!(SimpleDice::new(i32::MIN, 6).times(), i32::MIN);
	assert_eq!(SimpleDice::new(i32::MIN, -6).times(), i32::MAX);
	assert_eq!(SimpleDice::new(i32::MAX, -6).times(), -i32::MAX);
}

#[test]
fn averages() {
	assert!((SimpleDice::new(1, 20).average() - 10.5).abs() < f64::EPSILON);
	assert!((SimpleDice::new(2, 6).average() - 7.0).abs() < f64::EPSILON);
	assert!((SimpleDice::new(-2, 6).average() + 7.0).abs() < f64::EPSILON);
	assert!((SimpleDice::new(3, -8).average() + 13.5).abs() < f64::EPSILON);
	assert!((SimpleDice::constant(-5).average() + 5.0).abs() < f64::EPSILON);
}

#[test]
fn totals_bounds() {
	let dice = SimpleDice::new(3, 6);
	assert_eq!(dice.min_total(), 3);
	assert_eq!(dice.max_total(), 18);

	let dice = SimpleDice::new(-3, 6);
	assert_eq!(dice.min_total(), -18);
	assert_eq!(dice.max_total(), -3);
}

#[test]
fn ordering_puts_constants_last() {
	let mut dice = vec![
		SimpleDice::constant(3),
		SimpleDice::new(1, 8),
		SimpleDice::new(2, 20),
		SimpleDice::new(1, 12),
	];
	dice.sort();
	assert_eq!(
		dice,
		vec![
			SimpleDice::new(2, 20),
			SimpleDice::new(1, 12),
			SimpleDice::new(1, 8),
			SimpleDice::constant(3),
		]
	);
}

#[test]
fn roll_range_and_mean() {
	let mut roller = FastRandRoller::with_seed(0x5eed);
	for faces in [2, 6, 20, 100] {
		let dice = SimpleDice::die(faces);
		let mut sum = 0_i64;
		for _ in 0..10_000 {
			let total = dice.roll(&mut roller).unwrap().total().unwrap();
			assert!((1..=i32::try_from(faces).unwrap()).contains(&total));
			sum += i64::from(total);
		}

		let mean = sum as f64 / 10_000.0;
		let expected = (1.0 + f64::from(faces)) / 2.0;
		assert!((mean - expected).abs() < 0.5, "mean {mean} of d{faces} too far from {expected}");
	}
}

#[test]
fn negated_roll_range() {
	let mut roller = FastRandRoller::with_seed(0xd1ce);
	let dice = SimpleDice::new(-1, 12);
	let mut sum = 0_i64;
	for _ in 0..10_000 {
		let total = dice.roll(&mut roller).unwrap().total().unwrap();
		assert!((-12..=-1).contains(&total));
		sum += i64::from(total);
	}

	let mean = sum as f64 / 10_000.0;
	assert!((mean + 6.5).abs() < 0.5);
}

#[test]
fn all_faces_occur() {
	let mut roller = FastRandRoller::with_seed(42);
	let rolled = roller.roll(&SimpleDice::new(1000, 20)).unwrap();
	rolls_in_range(&rolled.rolls, 20);

	for face in 1..=20 {
		assert!(rolled.rolls.contains(&face));
	}
}

#[test]
fn seeded_rollers_repeat() {
	let dice = SimpleDice::new(10, 100);
	let a = FastRandRoller::with_seed(7).roll(&dice).unwrap();
	let b = FastRandRoller::with_seed(7).roll(&dice).unwrap();
	assert_eq!(a, b);
}

#[test]
fn fixed_rollers() {
	let dice = SimpleDice::new(3, 8);
	assert_eq!(ValRoller(2).roll(&dice).unwrap().total().unwrap(), 6);
	assert_eq!(MaxRoller.roll(&dice).unwrap().total().unwrap(), 24);

	let mut roller = IterRoller::new([1, 5, 8, 2]);
	assert_eq!(roller.roll(&dice).unwrap().rolls, vec![1, 5, 8]);
	assert!(roller.can_roll());
}

#[test]
fn too_many_rolls() {
	let dice = SimpleDice::new(i32::try_from(MAX_ROLLS).unwrap() + 1, 6);
	assert!(matches!(dice.roll(&mut ValRoller(1)), Err(Error::TooManyRolls(..))));

	// Constants never roll anything, no matter how big they are
	let dice = SimpleDice::constant(i32::MAX);
	assert_eq!(dice.roll(&mut ValRoller(1)).unwrap().total().unwrap(), i32::MAX);
}

#[test]
fn total_overflow() {
	let rolled = RolledDice::from_dice_and_rolls(SimpleDice::new(2, 6), [u32::MAX, 1]);
	assert!(matches!(rolled.total(), Err(Error::Overflow(..))));

	let rolled = RolledDice::from_dice_and_rolls(SimpleDice::new(2, i32::MAX), [i32::MAX.unsigned_abs(), 1]);
	assert!(matches!(rolled.total(), Err(Error::Overflow(..))));
}

#[test]
fn display() {
	assert_eq!(SimpleDice::new(3, 8).to_string(), "+3D8");
	assert_eq!(SimpleDice::new(-1, 20).to_string(), "-1D20");
	assert_eq!(SimpleDice::constant(4).to_string(), "+4");
	assert_eq!(SimpleDice::constant(-4).to_string(), "-4");
	assert_eq!(SimpleDice::new(0, 6).to_string(), "+0D6");
}

fn construct(count: i32, faces: i32) -> SimpleDice {
	let dice = SimpleDice::new(count, faces);
	assert_eq!(dice.times(), count);
	assert_eq!(dice.faces(), faces.unsigned_abs());
	dice
}

fn rolls_successfully_and_in_range(dice: &SimpleDice) -> RolledDice {
	let result = dice.roll(&mut FastRandRoller::default());
	assert!(result.is_ok());

	let rolled = result.unwrap();
	rolls_in_range(&rolled.rolls, rolled.dice.faces());
	rolled
}

fn rolls_in_range(rolls: &[u32], faces: u32) {
	assert!(!rolls.iter().any(|roll| *roll < 1 || *roll > faces));
}

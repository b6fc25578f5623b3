//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". [`SimpleDice`] is a single die type paired with a signed repeat count,
//! and [`DiceTerm`] is a flat sum of them. For using dice as part of a larger expression, see [`Term`].
//!
//! [`Term`]: crate::term::Term

pub mod flat;
pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{cmp, fmt};

pub use self::{flat::DiceTerm, roller::Roller};
use crate::term::Describe;

/// Maximum number of individual dice that a single [`SimpleDice`] is allowed to roll at once
pub const MAX_ROLLS: u32 = 100_000;

/// A single type of die along with a signed number of times to roll it.
///
/// The number of faces is always stored as a positive value and the sign of the contribution is carried by
/// [`Self::times()`]. Dice with fewer than two faces can only ever roll a `1`, so they are stored with one face and act
/// as a plain constant (bonus) equal to their repeat count.
///
/// # Examples
/// ```
/// use dice_terms::dice::SimpleDice;
///
/// // The sign can be given on either side and ends up in the same place
/// assert_eq!(SimpleDice::new(-1, 20), SimpleDice::new(1, -20));
/// assert_eq!(SimpleDice::new(-1, 20).to_string(), "-1D20");
///
/// // Dice without any real faces are constants
/// assert!(SimpleDice::new(3, 0).is_constant());
/// assert_eq!(SimpleDice::new(3, 0), SimpleDice::constant(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleDice {
	/// Number of faces on the die (1 for constants)
	faces: u32,

	/// Signed number of times the die is rolled
	times: i32,
}

impl SimpleDice {
	/// Creates a new dice type from a signed repeat count and a signed number of faces.
	/// The result is negative when exactly one of the two values is negative.
	#[must_use]
	pub const fn new(times: i32, max: i32) -> Self {
		let abs_times = times.unsigned_abs();
		let negative = (times < 0) ^ (max < 0);
		Self {
			faces: normalize_faces(max.unsigned_abs()),
			times: signed_count(abs_times, negative),
		}
	}

	/// Creates dice from an already-signed repeat count and an unsigned number of faces.
	#[must_use]
	pub const fn from_parts(times: i32, faces: u32) -> Self {
		Self {
			faces: normalize_faces(faces),
			times,
		}
	}

	/// Creates a single die with the given number of faces.
	#[must_use]
	pub const fn die(faces: u32) -> Self {
		Self {
			faces: normalize_faces(faces),
			times: 1,
		}
	}

	/// Creates a constant (a bonus or penalty) with the given value.
	#[must_use]
	pub const fn constant(value: i32) -> Self {
		Self { faces: 1, times: value }
	}

	/// Number of faces on the die. Always at least 1.
	#[must_use]
	#[inline]
	pub const fn faces(&self) -> u32 {
		self.faces
	}

	/// Signed number of times the die is rolled. For constants, this is the value of the constant.
	#[must_use]
	#[inline]
	pub const fn times(&self) -> i32 {
		self.times
	}

	/// Checks whether this is a constant rather than a random die.
	#[must_use]
	#[inline]
	pub const fn is_constant(&self) -> bool {
		self.faces == 1
	}

	/// Checks whether rolls of this dice count negatively.
	#[must_use]
	#[inline]
	pub const fn is_negative(&self) -> bool {
		self.times < 0
	}

	/// Creates a copy of this dice with the sign of its repeat count flipped.
	/// A count of [`i32::MIN`] saturates to [`i32::MAX`].
	#[must_use]
	pub const fn negated(&self) -> Self {
		Self {
			faces: self.faces,
			times: self.times.saturating_neg(),
		}
	}

	/// Calculates the expected value of rolling the dice: `|times| * (1 + faces) / 2`, with the sign of the count.
	///
	/// # Examples
	/// ```
	/// use dice_terms::dice::SimpleDice;
	///
	/// assert_eq!(SimpleDice::new(2, 6).average(), 7.0);
	/// assert_eq!(SimpleDice::new(-1, 20).average(), -10.5);
	/// assert_eq!(SimpleDice::constant(4).average(), 4.0);
	/// ```
	#[must_use]
	pub fn average(&self) -> f64 {
		let sign = if self.is_negative() { -1.0 } else { 1.0 };
		f64::from(self.times.unsigned_abs()) * (1.0 + f64::from(self.faces)) / 2.0 * sign
	}

	/// Lowest total that rolling the dice can produce.
	#[must_use]
	pub fn min_total(&self) -> i64 {
		if self.is_negative() {
			i64::from(self.times) * i64::from(self.faces)
		} else {
			i64::from(self.times)
		}
	}

	/// Highest total that rolling the dice can produce.
	#[must_use]
	pub fn max_total(&self) -> i64 {
		if self.is_negative() {
			i64::from(self.times)
		} else {
			i64::from(self.times) * i64::from(self.faces)
		}
	}

	/// Rolls the dice using the given roller.
	///
	/// # Errors
	/// If the dice would need more than [`MAX_ROLLS`] individual rolls, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dice_terms::dice::{roller::Iter as IterRoller, SimpleDice};
	///
	/// let dice = SimpleDice::new(-3, 6);
	/// let rolled = dice.roll(&mut IterRoller::new([2, 6, 1]))?;
	/// assert_eq!(rolled.rolls, vec![2, 6, 1]);
	/// assert_eq!(rolled.total()?, -9);
	/// # Ok::<(), dice_terms::dice::Error>(())
	/// ```
	#[inline]
	pub fn roll(&self, roller: &mut impl Roller) -> Result<RolledDice, Error> {
		roller.roll(self)
	}
}

/// Dice with zero faces behave exactly like dice with one face.
const fn normalize_faces(faces: u32) -> u32 {
	if faces < 2 {
		1
	} else {
		faces
	}
}

/// Applies a sign to an unsigned count, saturating at the bounds of [`i32`].
#[expect(clippy::cast_possible_wrap, reason = "Value is bounds-checked beforehand")]
const fn signed_count(count: u32, negative: bool) -> i32 {
	if negative {
		if count > i32::MAX.unsigned_abs() {
			i32::MIN
		} else {
			-(count as i32)
		}
	} else if count > i32::MAX.unsigned_abs() {
		i32::MAX
	} else {
		count as i32
	}
}

impl Default for SimpleDice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::die(20)
	}
}

impl PartialOrd for SimpleDice {
	fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for SimpleDice {
	/// Orders dice by descending number of faces (so constants always come last), then by descending count.
	fn cmp(&self, other: &Self) -> cmp::Ordering {
		other.faces.cmp(&self.faces).then_with(|| other.times.cmp(&self.times))
	}
}

impl fmt::Display for SimpleDice {
	/// Formats the dice as a signed count followed by `D` and the number of faces. Constants are formatted as just the
	/// signed value.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_constant() {
			write!(f, "{:+}", self.times)
		} else {
			write!(f, "{:+}D{}", self.times, self.faces)
		}
	}
}

/// Representation of the result from rolling [`SimpleDice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct RolledDice {
	/// Each individual die roll that was made. Always empty for constants.
	pub rolls: Vec<u32>,

	/// Dice that were rolled to produce this
	pub dice: SimpleDice,
}

impl RolledDice {
	/// Calculates the signed total of all roll values. Constants total to their value.
	///
	/// # Errors
	/// If there is an integer overflow while summing the die rolls, an error variant is returned.
	pub fn total(&self) -> Result<i32, Error> {
		if self.dice.is_constant() {
			return Ok(self.dice.times);
		}

		let mut sum: i32 = 0;
		for roll in &self.rolls {
			sum = i32::try_from(*roll)
				.ok()
				.and_then(|roll| sum.checked_add(roll))
				.ok_or_else(|| Error::Overflow(self.clone()))?;
		}

		if self.dice.is_negative() {
			sum.checked_neg().ok_or_else(|| Error::Overflow(self.clone()))
		} else {
			Ok(sum)
		}
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	#[must_use]
	pub fn from_dice_and_rolls(dice: SimpleDice, rolls: impl IntoIterator<Item = u32>) -> Self {
		Self {
			rolls: rolls.into_iter().collect(),
			dice,
		}
	}

	/// Builds the bracketed list of individual rolls, truncated to `list_limit` entries.
	pub(crate) fn describe_rolls(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);

		format!(
			"[{}{}]",
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl Describe for RolledDice {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice.
	/// Constants are described as just their signed value.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use dice_terms::{dice::{RolledDice, SimpleDice}, term::Describe};
	///
	/// let rolled = RolledDice::from_dice_and_rolls(SimpleDice::new(4, 6), [6, 2, 5, 3]);
	/// assert_eq!(rolled.describe(None), "+4D6[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "+4D6[6, 2, 2 more...]");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		if self.dice.is_constant() {
			self.dice.to_string()
		} else {
			format!("{}{}", self.dice, self.describe_rolls(list_limit))
		}
	}
}

impl fmt::Display for RolledDice {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// There was an integer overflow when totalling roll values.
	#[error("integer overflow while totalling {0}")]
	Overflow(RolledDice),

	/// Rolling the dice specified would take more than [`MAX_ROLLS`] individual rolls.
	///
	/// # Examples
	/// ```
	/// use dice_terms::dice::{roller::Max as MaxRoller, Error, SimpleDice};
	///
	/// let dice = SimpleDice::new(1_000_000, 6);
	/// assert!(matches!(dice.roll(&mut MaxRoller), Err(Error::TooManyRolls(..))));
	/// ```
	#[error("{0} would need too many rolls")]
	TooManyRolls(SimpleDice),
}

//! Abstractions for rolling [`SimpleDice`] using various means.

use alloc::vec::Vec;
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Error, RolledDice, SimpleDice, MAX_ROLLS};

/// Rolls dice - what else is there to say?
pub trait Roller {
	/// Rolls a single die with the given number of faces (always at least 2).
	/// The result should be within `1..=faces`.
	#[must_use]
	fn roll_die(&mut self, faces: u32) -> u32;

	/// Rolls every die of a set of dice. Constants are never passed on to [`Self::roll_die()`] since they can only ever
	/// roll a 1.
	///
	/// # Errors
	/// If the dice would need more than [`MAX_ROLLS`] individual rolls, an error variant is returned.
	fn roll(&mut self, dice: &SimpleDice) -> Result<RolledDice, Error>
	where
		Self: Sized,
	{
		if dice.is_constant() {
			return Ok(RolledDice {
				rolls: Vec::new(),
				dice: *dice,
			});
		}

		let count = dice.times().unsigned_abs();
		if count > MAX_ROLLS {
			return Err(Error::TooManyRolls(*dice));
		}

		// Roll the dice!
		let mut rolls = Vec::with_capacity(count as usize);
		for _ in 0..count {
			rolls.push(self.roll_die(dice.faces()));
		}

		Ok(RolledDice { rolls, dice: *dice })
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use dice_terms::dice::{roller::{FastRand as FastRandRoller, Roller}, SimpleDice};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = SimpleDice::new(4, 6);
/// let _ = roller.roll(&dice)?;
/// let _ = roller.roll(&dice)?;
/// # Ok::<(), dice_terms::dice::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use dice_terms::dice::{roller::{FastRand as FastRandRoller, Roller}, SimpleDice};
///
/// let dice = SimpleDice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice)?;
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice)?;
/// assert_eq!(first, second);
/// # Ok::<(), dice_terms::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, faces: u32) -> u32 {
		if faces > 1 {
			self.0.u32(1..=faces)
		} else {
			1
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// # Examples
/// ```
/// use dice_terms::dice::{roller::{Roller, Val as ValRoller}, SimpleDice};
///
/// let mut roller = ValRoller(3);
/// let rolled = roller.roll(&SimpleDice::new(4, 6))?;
/// assert_eq!(rolled.total()?, 12);
/// # Ok::<(), dice_terms::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _faces: u32) -> u32 {
		self.0
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dice_terms::dice::{roller::{Max as MaxRoller, Roller}, SimpleDice};
///
/// let rolled = MaxRoller.roll(&SimpleDice::new(2, 20))?;
/// assert!(rolled.rolls.iter().all(|roll| *roll == 20));
/// # Ok::<(), dice_terms::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of faces).
	#[inline]
	fn roll_die(&mut self, faces: u32) -> u32 {
		faces
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use dice_terms::dice::{roller::{Iter as IterRoller, Roller}, SimpleDice};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// let rolled = roller.roll(&SimpleDice::new(5, 6))?;
/// assert_eq!(rolled.rolls, vec![1, 2, 3, 4, 10]);
/// assert!(!roller.can_roll());
/// # Ok::<(), dice_terms::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn roll_die(&mut self, _faces: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}

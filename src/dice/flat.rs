//! Flat sums of dice and constants, along with their contraction into canonical form.

use alloc::{
	string::{String, ToString},
	vec::Vec,
};
use core::{fmt, slice};

use super::{Error, RolledDice, Roller, SimpleDice};

/// A flat sum of [`SimpleDice`], each entry being a die type paired with a signed repeat count.
///
/// Entries with a repeat count of zero are never stored, since a die type that isn't rolled at all is simply absent.
/// Entries are otherwise kept in the order they were added until the term is [contracted](Self::contract()).
///
/// # Examples
/// ```
/// use dice_terms::dice::{DiceTerm, SimpleDice};
///
/// let term: DiceTerm = [SimpleDice::new(3, 8), SimpleDice::new(-1, 8), SimpleDice::constant(2)]
/// 	.into_iter()
/// 	.collect();
/// assert_eq!(term.to_string(), "+3D8 -1D8 +2");
/// assert_eq!(term.contract().to_string(), "+2D8 +2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DiceTerm {
	/// Non-zero entries of the sum
	entries: Vec<SimpleDice>,
}

impl DiceTerm {
	/// The term without any entries. It always totals to 0.
	pub const EMPTY: Self = Self::new();

	/// Creates a new empty term.
	#[must_use]
	#[inline]
	pub const fn new() -> Self {
		Self { entries: Vec::new() }
	}

	/// Adds an entry to the end of the term. Entries with a repeat count of zero are ignored.
	pub fn push(&mut self, dice: SimpleDice) {
		if dice.times() != 0 {
			self.entries.push(dice);
		}
	}

	/// Gets all entries of the term.
	#[must_use]
	#[inline]
	pub fn entries(&self) -> &[SimpleDice] {
		&self.entries
	}

	/// Iterates over all entries of the term.
	#[inline]
	pub fn iter(&self) -> slice::Iter<'_, SimpleDice> {
		self.entries.iter()
	}

	/// Number of entries in the term.
	#[must_use]
	#[inline]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Checks whether the term has no entries (and will therefore always total 0).
	#[must_use]
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Merges all entries of the same die type into a single entry by summing their repeat counts. Die types whose
	/// counts cancel out entirely are removed. The remaining entries are ordered by descending number of faces, so
	/// constants always come last.
	///
	/// Contraction is idempotent and doesn't change the expected total of rolling the term.
	/// Counts that would overflow saturate at the bounds of [`i32`].
	///
	/// # Examples
	/// ```
	/// use dice_terms::dice::{DiceTerm, SimpleDice};
	///
	/// let term: DiceTerm = [SimpleDice::new(2, 6), SimpleDice::constant(3), SimpleDice::new(-2, 6), SimpleDice::constant(-3)]
	/// 	.into_iter()
	/// 	.collect();
	/// assert_eq!(term.contract(), DiceTerm::EMPTY);
	/// assert_eq!(term.contract().to_string(), "+0");
	/// ```
	#[must_use]
	pub fn contract(&self) -> Self {
		let mut groups: Vec<SimpleDice> = Vec::with_capacity(self.entries.len());
		for dice in &self.entries {
			match groups.iter_mut().find(|group| group.faces() == dice.faces()) {
				Some(group) => group.times = group.times.saturating_add(dice.times()),
				None => groups.push(*dice),
			}
		}

		groups.retain(|group| group.times() != 0);
		groups.sort();

		let contracted = Self { entries: groups };
		#[cfg(feature = "logging")]
		{
			log::trace!("contracted \"{self}\" into \"{contracted}\"");
		}
		contracted
	}

	/// Checks whether the term is already in contracted form.
	#[must_use]
	pub fn is_contracted(&self) -> bool {
		self.entries.windows(2).all(|pair| pair[0].faces() > pair[1].faces())
	}

	/// Checks whether two terms are the same after contraction, regardless of how their entries are laid out.
	///
	/// # Examples
	/// ```
	/// use dice_terms::dice::{DiceTerm, SimpleDice};
	///
	/// let a: DiceTerm = [SimpleDice::constant(2), SimpleDice::new(1, 6), SimpleDice::new(1, 6)].into_iter().collect();
	/// let b: DiceTerm = [SimpleDice::new(2, 6), SimpleDice::constant(2)].into_iter().collect();
	/// assert_ne!(a, b);
	/// assert!(a.same(&b));
	/// ```
	#[must_use]
	pub fn same(&self, other: &Self) -> bool {
		self.contract() == other.contract()
	}

	/// Checks whether the term has exactly the given entry.
	#[must_use]
	pub fn contains(&self, dice: &SimpleDice) -> bool {
		self.entries.contains(dice)
	}

	/// Checks whether the term has an entry for dice with the given number of faces, with any repeat count.
	/// Fewer than two faces checks for a constant entry.
	#[must_use]
	pub fn contains_faces(&self, faces: u32) -> bool {
		let faces = SimpleDice::die(faces).faces();
		self.entries.iter().any(|dice| dice.faces() == faces)
	}

	/// Checks whether every entry of another term is also an entry of this one.
	#[must_use]
	pub fn contains_all(&self, other: &Self) -> bool {
		other.entries.iter().all(|dice| self.contains(dice))
	}

	/// Creates a copy of the term with every repeat count negated.
	#[must_use]
	pub fn negated(&self) -> Self {
		Self {
			entries: self.entries.iter().map(SimpleDice::negated).collect(),
		}
	}

	/// Calculates the expected total of rolling the term.
	#[must_use]
	pub fn average(&self) -> f64 {
		self.entries.iter().map(SimpleDice::average).sum()
	}

	/// Lowest total that rolling the term can produce.
	#[must_use]
	pub fn min_total(&self) -> i64 {
		self.entries.iter().map(SimpleDice::min_total).sum()
	}

	/// Highest total that rolling the term can produce.
	#[must_use]
	pub fn max_total(&self) -> i64 {
		self.entries.iter().map(SimpleDice::max_total).sum()
	}

	/// Checks whether the term only consists of constants.
	#[must_use]
	pub fn is_deterministic(&self) -> bool {
		self.entries.iter().all(SimpleDice::is_constant)
	}

	/// Rolls every entry of the term using the given roller.
	///
	/// # Errors
	/// If rolling any of the entries fails, an error variant is returned.
	pub fn roll(&self, roller: &mut impl Roller) -> Result<Vec<RolledDice>, Error> {
		self.entries.iter().map(|dice| dice.roll(roller)).collect()
	}
}

impl From<SimpleDice> for DiceTerm {
	fn from(dice: SimpleDice) -> Self {
		let mut term = Self::new();
		term.push(dice);
		term
	}
}

impl FromIterator<SimpleDice> for DiceTerm {
	fn from_iter<T: IntoIterator<Item = SimpleDice>>(iter: T) -> Self {
		let mut term = Self::new();
		term.extend(iter);
		term
	}
}

impl Extend<SimpleDice> for DiceTerm {
	fn extend<T: IntoIterator<Item = SimpleDice>>(&mut self, iter: T) {
		for dice in iter {
			self.push(dice);
		}
	}
}

impl<'a> IntoIterator for &'a DiceTerm {
	type IntoIter = slice::Iter<'a, SimpleDice>;
	type Item = &'a SimpleDice;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl fmt::Display for DiceTerm {
	/// Formats the term as each of its entries separated by a single space. The empty term is formatted as `+0`.
	///
	/// For contracted terms, parsing the output produces the exact same term.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return write!(f, "+0");
		}

		write!(
			f,
			"{}",
			self.entries.iter().map(ToString::to_string).collect::<Vec<String>>().join(" ")
		)
	}
}

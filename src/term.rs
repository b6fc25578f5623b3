//! AST-like data structures for dice terms, evaluating them, contracting them, and working with their results.

use alloc::{
	boxed::Box,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{fmt, mem};

use crate::{
	dice::{DiceTerm, Error as DiceError, RolledDice, Roller, SimpleDice},
	Error,
};

/// Generates an implementation of [`HasOpType`] for an enum type.
/// This is very tightly coupled with the expected variants:
/// `Die`, `Num`, `Ref`, `Dice`, `Abs`, `Rolled`, `Sum`, `Difference`, `Product`, `Fraction`, `Power`, `Min`, and `Max`.
macro_rules! op_type_impl {
	($name:ty) => {
		impl HasOpType for $name {
			fn op_type(&self) -> OpType {
				match self {
					Self::Dice(dice) if dice.len() > 1 => OpType::Additive,
					Self::Die(..) | Self::Num(..) | Self::Ref(..) | Self::Dice(..) => OpType::Value,
					Self::Abs(..) | Self::Rolled(..) | Self::Min(..) | Self::Max(..) => OpType::Call,
					Self::Sum(..) | Self::Difference(..) => OpType::Additive,
					Self::Product(..) | Self::Fraction(..) => OpType::Multiplicative,
					Self::Power(..) => OpType::Exponential,
				}
			}

			fn is_commutative(&self) -> bool {
				matches!(self, Self::Sum(..) | Self::Product(..) | Self::Min(..) | Self::Max(..))
			}
		}
	};
}

/// Individual elements of a dice term
///
/// The purely additive subset of terms ([`Self::Die`], [`Self::Num`], [`Self::Dice`], [`Self::Sum`], and
/// [`Self::Difference`]) can always be [contracted](Self::contract()) into a single flat [`Self::Dice`], which is the
/// canonical form for evaluating, comparing, and rendering sums of dice. All other operations are kept as a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Term {
	/// Single die with a number of faces
	Die(u32),

	/// Standalone integer
	Num(i32),

	/// Named value that is looked up when evaluating the term
	Ref(String),

	/// Flat sum of dice and constants
	Dice(DiceTerm),

	/// Absolute value of a term
	Abs(Box<Self>),

	/// Term that is rolled ahead of the rest of the term (see [`Self::fix_rolled()`])
	Rolled(Box<Self>),

	/// Sum of two terms
	Sum(Box<Self>, Box<Self>),

	/// Difference of two terms
	Difference(Box<Self>, Box<Self>),

	/// Product of two terms
	Product(Box<Self>, Box<Self>),

	/// Integer quotient of two terms (rounded toward zero)
	Fraction(Box<Self>, Box<Self>),

	/// A term raised to the power of another
	Power(Box<Self>, Box<Self>),

	/// Lesser of two terms
	Min(Box<Self>, Box<Self>),

	/// Greater of two terms
	Max(Box<Self>, Box<Self>),
}

op_type_impl!(Term);

impl Term {
	/// Creates a single die term. The sign of `faces` is discarded.
	#[must_use]
	pub const fn die(faces: i32) -> Self {
		Self::Die(faces.unsigned_abs())
	}

	/// Creates a reference term.
	#[must_use]
	pub fn reference(name: impl Into<String>) -> Self {
		Self::Ref(name.into())
	}

	/// Creates an absolute value term.
	#[must_use]
	pub fn abs(value: Self) -> Self {
		Self::Abs(Box::new(value))
	}

	/// Creates a term that is rolled ahead of the rest.
	#[must_use]
	pub fn rolled(value: Self) -> Self {
		Self::Rolled(Box::new(value))
	}

	/// Creates a sum of two terms.
	#[must_use]
	pub fn sum(a: Self, b: Self) -> Self {
		Self::Sum(Box::new(a), Box::new(b))
	}

	/// Creates a difference of two terms.
	#[must_use]
	pub fn difference(a: Self, b: Self) -> Self {
		Self::Difference(Box::new(a), Box::new(b))
	}

	/// Creates a product of two terms.
	#[must_use]
	pub fn product(a: Self, b: Self) -> Self {
		Self::Product(Box::new(a), Box::new(b))
	}

	/// Creates an integer quotient of two terms.
	#[must_use]
	pub fn fraction(a: Self, b: Self) -> Self {
		Self::Fraction(Box::new(a), Box::new(b))
	}

	/// Creates a power of two terms.
	#[must_use]
	pub fn power(base: Self, exponent: Self) -> Self {
		Self::Power(Box::new(base), Box::new(exponent))
	}

	/// Creates the lesser of two terms.
	#[must_use]
	pub fn min(a: Self, b: Self) -> Self {
		Self::Min(Box::new(a), Box::new(b))
	}

	/// Creates the greater of two terms.
	#[must_use]
	pub fn max(a: Self, b: Self) -> Self {
		Self::Max(Box::new(a), Box::new(b))
	}

	/// Evaluates the term. Every die is rolled using `roller` and every reference is resolved with `refs`, resulting in
	/// an [`Evaled`] tree that has a 1:1 layout with the term and records all individual rolls.
	///
	/// The base of a [`Self::Power`] is rolled exactly once, and that single value is what gets raised to the exponent.
	///
	/// # Errors
	/// If a reference can't be resolved or an error occurs during dice rolling, an error variant will be returned.
	///
	/// # Examples
	/// ```
	/// use dice_terms::{dice::roller::Val as ValRoller, term::Term};
	///
	/// let term = Term::sum(Term::die(6), Term::reference("STR"));
	/// let refs = |name: &str| (name == "STR").then_some(3);
	/// let evaled = term.eval(&mut ValRoller(4), &refs)?;
	/// assert_eq!(evaled.to_string(), "d6[4] + STR[3]");
	/// assert_eq!(evaled.calc()?, 7);
	/// # Ok::<(), Box<dyn std::error::Error>>(())
	/// ```
	pub fn eval<R, F>(&self, roller: &mut R, refs: &F) -> Result<Evaled, EvalError>
	where
		R: Roller,
		F: Fn(&str) -> Option<i32> + ?Sized,
	{
		let binary = |a: &Self, b: &Self, roller: &mut R| -> Result<(Box<Evaled>, Box<Evaled>), EvalError> {
			let a = a.eval(roller, refs)?;
			let b = b.eval(roller, refs)?;
			Ok((Box::new(a), Box::new(b)))
		};

		Ok(match self {
			Self::Die(faces) => Evaled::Die(
				SimpleDice::die(*faces)
					.roll(roller)
					.map_err(|err| EvalError::Dice(self.clone(), err))?,
			),
			Self::Num(x) => Evaled::Num(*x),
			Self::Ref(name) => Evaled::Ref(
				name.clone(),
				refs(name.as_str()).ok_or_else(|| EvalError::UnresolvedReference(name.clone()))?,
			),
			Self::Dice(dice) => Evaled::Dice(dice.roll(roller).map_err(|err| EvalError::Dice(self.clone(), err))?),

			Self::Abs(x) => Evaled::Abs(Box::new(x.eval(roller, refs)?)),
			Self::Rolled(x) => Evaled::Rolled(Box::new(x.eval(roller, refs)?)),

			Self::Sum(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Sum(a, b)
			}
			Self::Difference(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Difference(a, b)
			}
			Self::Product(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Product(a, b)
			}
			Self::Fraction(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Fraction(a, b)
			}
			Self::Power(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Power(a, b)
			}
			Self::Min(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Min(a, b)
			}
			Self::Max(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Evaled::Max(a, b)
			}
		})
	}

	/// Rolls every [`Self::Rolled`] term ahead of time and replaces it with a [`Self::Num`] of its result. The returned
	/// term can then be evaluated repeatedly without those parts being rolled again.
	///
	/// # Errors
	/// If evaluating or calculating any of the rolled terms fails, an error variant will be returned.
	///
	/// # Examples
	/// ```
	/// use dice_terms::{dice::roller::Iter as IterRoller, term::Term};
	///
	/// let term = Term::sum(Term::rolled(Term::die(20)), Term::die(4));
	/// let fixed = term.fix_rolled(&mut IterRoller::new([17]), &|_: &str| None)?;
	/// assert_eq!(fixed, Term::sum(Term::Num(17), Term::die(4)));
	/// # Ok::<(), dice_terms::Error>(())
	/// ```
	pub fn fix_rolled<R, F>(&self, roller: &mut R, refs: &F) -> Result<Self, Error>
	where
		R: Roller,
		F: Fn(&str) -> Option<i32> + ?Sized,
	{
		let binary = |a: &Self, b: &Self, roller: &mut R| -> Result<(Box<Self>, Box<Self>), Error> {
			let a = a.fix_rolled(roller, refs)?;
			let b = b.fix_rolled(roller, refs)?;
			Ok((Box::new(a), Box::new(b)))
		};

		Ok(match self {
			Self::Rolled(x) => Self::Num(x.eval(roller, refs)?.calc()?),
			Self::Die(..) | Self::Num(..) | Self::Ref(..) | Self::Dice(..) => self.clone(),
			Self::Abs(x) => Self::Abs(Box::new(x.fix_rolled(roller, refs)?)),

			Self::Sum(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Sum(a, b)
			}
			Self::Difference(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Difference(a, b)
			}
			Self::Product(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Product(a, b)
			}
			Self::Fraction(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Fraction(a, b)
			}
			Self::Power(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Power(a, b)
			}
			Self::Min(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Min(a, b)
			}
			Self::Max(a, b) => {
				let (a, b) = binary(a, b, roller)?;
				Self::Max(a, b)
			}
		})
	}

	/// Contracts the term. A term that only consists of dice, numbers, sums, and differences is flattened and
	/// [contracted](DiceTerm::contract()) into a single [`Self::Dice`] with one entry per die type. For any other
	/// term, all of its children are contracted while the operation itself is kept as-is.
	///
	/// Products are never flattened since multiplying a single roll is not the same as rolling more dice.
	///
	/// # Examples
	/// ```
	/// use dice_terms::term::Term;
	///
	/// let term = Term::difference(Term::sum(Term::die(6), Term::Num(3)), Term::die(6));
	/// assert_eq!(term.contract().to_string(), "+3");
	///
	/// let term = Term::product(Term::sum(Term::die(6), Term::die(6)), Term::Num(2));
	/// assert_eq!(term.contract().to_string(), "+2D6 * 2");
	/// ```
	#[must_use]
	pub fn contract(&self) -> Self {
		if let Some(flat) = self.flatten() {
			return Self::Dice(flat.contract());
		}

		let operand = |x: &Self| Box::new(x.contract_operand());
		match self {
			Self::Abs(x) => Self::Abs(operand(x)),
			Self::Rolled(x) => Self::Rolled(operand(x)),

			Self::Sum(a, b) => Self::Sum(operand(a), operand(b)),
			Self::Difference(a, b) => Self::Difference(operand(a), operand(b)),
			Self::Product(a, b) => Self::Product(operand(a), operand(b)),
			Self::Fraction(a, b) => Self::Fraction(operand(a), operand(b)),
			Self::Power(a, b) => Self::Power(operand(a), operand(b)),
			Self::Min(a, b) => Self::Min(operand(a), operand(b)),
			Self::Max(a, b) => Self::Max(operand(a), operand(b)),

			Self::Die(..) | Self::Num(..) | Self::Ref(..) | Self::Dice(..) => self.clone(),
		}
	}

	/// Contracts an operand of a non-additive operation. Plain dice, numbers, and references stay as they are.
	fn contract_operand(&self) -> Self {
		match self {
			Self::Die(..) | Self::Num(..) | Self::Ref(..) => self.clone(),
			_ => self.contract(),
		}
	}

	/// Flattens the term into a single flat sum, if it only consists of additive parts.
	#[must_use]
	pub fn flatten(&self) -> Option<DiceTerm> {
		match self {
			Self::Die(faces) => Some(DiceTerm::from(SimpleDice::die(*faces))),
			Self::Num(x) => Some(DiceTerm::from(SimpleDice::constant(*x))),
			Self::Dice(dice) => Some(dice.clone()),
			Self::Sum(a, b) => {
				let mut flat = a.flatten()?;
				flat.extend(b.flatten()?.iter().copied());
				Some(flat)
			}
			Self::Difference(a, b) => {
				let mut flat = a.flatten()?;
				flat.extend(b.flatten()?.negated().iter().copied());
				Some(flat)
			}
			_ => None,
		}
	}

	/// Checks whether the term contains another term. Every term contains itself and anything within its operands.
	///
	/// A [`Self::Dice`] also contains a [`Self::Die`] when it has an entry with the same number of faces, a
	/// [`Self::Num`] when it has a constant entry with the exact same value, and another [`Self::Dice`] when every one
	/// of its entries is present.
	///
	/// # Examples
	/// ```
	/// use dice_terms::term::Term;
	///
	/// let term = Term::sum(Term::sum(Term::die(6), Term::die(6)), Term::Num(3));
	/// assert!(term.contains(&Term::die(6)));
	/// assert!(term.contains(&Term::Num(3)));
	/// assert!(!term.contains(&Term::Num(5)));
	/// ```
	#[must_use]
	pub fn contains(&self, other: &Self) -> bool {
		if self == other {
			return true;
		}

		match self {
			Self::Dice(dice) => match other {
				Self::Die(faces) => dice.contains_faces(*faces),
				Self::Num(x) => dice.contains(&SimpleDice::constant(*x)),
				Self::Dice(other) => dice.contains_all(other),
				_ => false,
			},
			Self::Die(..) | Self::Num(..) | Self::Ref(..) => false,
			Self::Abs(x) | Self::Rolled(x) => x.contains(other),
			Self::Sum(a, b)
			| Self::Difference(a, b)
			| Self::Product(a, b)
			| Self::Fraction(a, b)
			| Self::Power(a, b)
			| Self::Min(a, b)
			| Self::Max(a, b) => a.contains(other) || b.contains(other),
		}
	}

	/// Checks whether the term is deterministic (will always yield the same value with every evaluation, given the
	/// same references). Dice only count as deterministic when they have a single face.
	#[must_use]
	pub fn is_deterministic(&self) -> bool {
		match self {
			Self::Num(..) | Self::Ref(..) => true,
			Self::Die(faces) => *faces < 2,
			Self::Dice(dice) => dice.is_deterministic(),
			Self::Abs(x) | Self::Rolled(x) => x.is_deterministic(),
			Self::Sum(a, b)
			| Self::Difference(a, b)
			| Self::Product(a, b)
			| Self::Fraction(a, b)
			| Self::Power(a, b)
			| Self::Min(a, b)
			| Self::Max(a, b) => a.is_deterministic() && b.is_deterministic(),
		}
	}

	/// Calculates the expected value of the term, if it can be determined without rolling. References have no
	/// intrinsic average, and non-linear operations (fractions, powers, minimums, maximums, and absolute values) are
	/// only averaged when they are deterministic.
	///
	/// # Examples
	/// ```
	/// use dice_terms::term::Term;
	///
	/// assert_eq!(Term::sum(Term::die(20), Term::Num(5)).average(), Some(15.5));
	/// assert_eq!(Term::reference("STR").average(), None);
	/// ```
	#[must_use]
	pub fn average(&self) -> Option<f64> {
		match self {
			Self::Die(faces) => Some(SimpleDice::die(*faces).average()),
			Self::Num(x) => Some(f64::from(*x)),
			Self::Dice(dice) => Some(dice.average()),
			Self::Ref(..) => None,
			Self::Rolled(x) => x.average(),
			Self::Sum(a, b) => Some(a.average()? + b.average()?),
			Self::Difference(a, b) => Some(a.average()? - b.average()?),
			// Both sides are rolled independently, so the expectation of the product is the product of expectations
			Self::Product(a, b) => Some(a.average()? * b.average()?),
			Self::Abs(..) | Self::Fraction(..) | Self::Power(..) | Self::Min(..) | Self::Max(..) => {
				if self.is_deterministic() && !self.has_refs() {
					let evaled = self.eval(&mut ConstRoller, &|_: &str| None).ok()?;
					evaled.calc().ok().map(f64::from)
				} else {
					None
				}
			}
		}
	}

	/// Checks whether the term contains any references.
	#[must_use]
	pub fn has_refs(&self) -> bool {
		match self {
			Self::Ref(..) => true,
			Self::Die(..) | Self::Num(..) | Self::Dice(..) => false,
			Self::Abs(x) | Self::Rolled(x) => x.has_refs(),
			Self::Sum(a, b)
			| Self::Difference(a, b)
			| Self::Product(a, b)
			| Self::Fraction(a, b)
			| Self::Power(a, b)
			| Self::Min(a, b)
			| Self::Max(a, b) => a.has_refs() || b.has_refs(),
		}
	}
}

/// Roller for deterministic terms, which never actually need to roll anything
struct ConstRoller;

impl Roller for ConstRoller {
	fn roll_die(&mut self, _faces: u32) -> u32 {
		1
	}
}

impl Describe for Term {
	/// Builds a full expression string from the term. Binary operations are grouped with parentheses whenever the order
	/// of operations could otherwise be considered ambiguous. A contracted [`Term::Dice`] on its own is formatted
	/// exactly as [`DiceTerm`] formats it, which can be parsed back into the same term.
	///
	/// `list_limit` does not affect the output of this implementation in any way since there are no possible lists of
	/// elements included, so it is always safe to pass `None`.
	fn describe(&self, _list_limit: Option<usize>) -> String {
		match self {
			Self::Die(faces) => format!("d{faces}"),
			Self::Num(x) => x.to_string(),
			Self::Ref(name) => name.clone(),
			Self::Dice(dice) => dice.to_string(),

			Self::Abs(x) => format!("abs({})", x.describe(None)),
			Self::Rolled(x) => format!("rolled({})", x.describe(None)),
			Self::Min(a, b) => format!("min({}, {})", a.describe(None), b.describe(None)),
			Self::Max(a, b) => format!("max({}, {})", a.describe(None), b.describe(None)),

			Self::Sum(a, b) => self.describe_binary_expr('+', a, b, None),
			Self::Difference(a, b) => self.describe_binary_expr('-', a, b, None),
			Self::Product(a, b) => self.describe_binary_expr('*', a, b, None),
			Self::Fraction(a, b) => self.describe_binary_expr('/', a, b, None),
			Self::Power(a, b) => self.describe_binary_expr('^', a, b, None),
		}
	}
}

impl fmt::Display for Term {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

impl From<DiceTerm> for Term {
	fn from(dice: DiceTerm) -> Self {
		Self::Dice(dice)
	}
}

impl From<SimpleDice> for Term {
	fn from(dice: SimpleDice) -> Self {
		Self::Dice(DiceTerm::from(dice))
	}
}

impl From<i32> for Term {
	fn from(x: i32) -> Self {
		Self::Num(x)
	}
}

/// Individual elements of an evaluated dice term
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Evaled {
	/// Rolled single die
	Die(RolledDice),

	/// Standalone integer
	Num(i32),

	/// Resolved reference along with its value
	Ref(String, i32),

	/// Rolled entries of a flat sum
	Dice(Vec<RolledDice>),

	/// Absolute value of an evaluated term
	Abs(Box<Self>),

	/// Evaluated term that was rolled ahead of the rest
	Rolled(Box<Self>),

	/// Sum of two evaluated terms
	Sum(Box<Self>, Box<Self>),

	/// Difference of two evaluated terms
	Difference(Box<Self>, Box<Self>),

	/// Product of two evaluated terms
	Product(Box<Self>, Box<Self>),

	/// Integer quotient of two evaluated terms (rounded toward zero)
	Fraction(Box<Self>, Box<Self>),

	/// An evaluated term raised to the power of another
	Power(Box<Self>, Box<Self>),

	/// Lesser of two evaluated terms
	Min(Box<Self>, Box<Self>),

	/// Greater of two evaluated terms
	Max(Box<Self>, Box<Self>),
}

op_type_impl!(Evaled);

impl Evaled {
	/// Calculates the final result of the evaluated term and all of its children (if any).
	///
	/// # Errors
	/// If there is an integer overflow, a division by zero, or an error calculating the total of a set of dice rolls,
	/// an error variant will be returned.
	pub fn calc(&self) -> Result<i32, CalcError> {
		match self {
			Self::Die(rolled) => rolled.total().map_err(|err| CalcError::Dice(self.clone(), err)),
			Self::Num(x) | Self::Ref(_, x) => Ok(*x),
			Self::Dice(rolled) => {
				let mut sum: i32 = 0;
				for dice in rolled {
					let total = dice.total().map_err(|err| CalcError::Dice(self.clone(), err))?;
					sum = sum.checked_add(total).ok_or_else(|| CalcError::Overflow(self.clone()))?;
				}
				Ok(sum)
			}

			Self::Abs(x) => x.calc()?.checked_abs().ok_or_else(|| CalcError::Overflow(self.clone())),
			Self::Rolled(x) => x.calc(),

			Self::Sum(a, b) => a
				.calc()?
				.checked_add(b.calc()?)
				.ok_or_else(|| CalcError::Overflow(self.clone())),
			Self::Difference(a, b) => a
				.calc()?
				.checked_sub(b.calc()?)
				.ok_or_else(|| CalcError::Overflow(self.clone())),
			Self::Product(a, b) => a
				.calc()?
				.checked_mul(b.calc()?)
				.ok_or_else(|| CalcError::Overflow(self.clone())),
			Self::Fraction(a, b) => {
				let a_val = a.calc()?;
				let b_val = b.calc()?;
				if b_val == 0 {
					return Err(CalcError::DivisionByZero(self.clone()));
				}
				a_val.checked_div(b_val).ok_or_else(|| CalcError::Overflow(self.clone()))
			}
			Self::Power(a, b) => {
				// The base was only rolled once, so every multiplication uses the same value
				let base = a.calc()?;
				let exponent = b.calc()?;
				match u32::try_from(exponent) {
					Ok(exponent) => base
						.checked_pow(exponent)
						.ok_or_else(|| CalcError::Overflow(self.clone())),
					Err(..) => match base {
						0 => Err(CalcError::DivisionByZero(self.clone())),
						1 => Ok(1),
						-1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
						_ => Ok(0),
					},
				}
			}
			Self::Min(a, b) => Ok(a.calc()?.min(b.calc()?)),
			Self::Max(a, b) => Ok(a.calc()?.max(b.calc()?)),
		}
	}
}

impl Describe for Evaled {
	fn describe(&self, list_limit: Option<usize>) -> String {
		match self {
			Self::Die(rolled) if rolled.dice.is_constant() => rolled.dice.to_string(),
			Self::Die(rolled) => format!("d{}{}", rolled.dice.faces(), rolled.describe_rolls(list_limit)),
			Self::Num(x) => x.to_string(),
			Self::Ref(name, x) => format!("{name}[{x}]"),
			Self::Dice(rolled) if rolled.is_empty() => String::from("+0"),
			Self::Dice(rolled) => rolled
				.iter()
				.map(|dice| dice.describe(list_limit))
				.collect::<Vec<_>>()
				.join(" "),

			Self::Abs(x) => format!("abs({})", x.describe(list_limit)),
			Self::Rolled(x) => format!("rolled({})", x.describe(list_limit)),
			Self::Min(a, b) => format!("min({}, {})", a.describe(list_limit), b.describe(list_limit)),
			Self::Max(a, b) => format!("max({}, {})", a.describe(list_limit), b.describe(list_limit)),

			Self::Sum(a, b) => self.describe_binary_expr('+', a, b, list_limit),
			Self::Difference(a, b) => self.describe_binary_expr('-', a, b, list_limit),
			Self::Product(a, b) => self.describe_binary_expr('*', a, b, list_limit),
			Self::Fraction(a, b) => self.describe_binary_expr('/', a, b, list_limit),
			Self::Power(a, b) => self.describe_binary_expr('^', a, b, list_limit),
		}
	}
}

impl fmt::Display for Evaled {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Error that can occur during [`Term::eval()`]
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
	/// A reference had no value in the lookup used for evaluation
	#[error("unresolved reference \"{0}\"")]
	UnresolvedReference(String),

	/// Dice-related error (likely during rolling)
	#[error("dice error while evaluating \"{0}\": {1}")]
	Dice(Term, #[source] DiceError),
}

/// Error that can occur during [`Evaled::calc()`]
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CalcError {
	/// Dice-related error (likely during totalling)
	#[error("dice error while calculating ({0}): {1}")]
	Dice(Evaled, #[source] DiceError),

	/// Integer overflow (likely during calculation of a sum or product)
	#[error("integer overflow while calculating {0}")]
	Overflow(Evaled),

	/// Division by a value of zero
	#[error("division by zero while calculating {0}")]
	DivisionByZero(Evaled),
}

/// Operation type for an individual term, in order of increasing precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[allow(clippy::exhaustive_enums)]
pub enum OpType {
	/// Additive operation (sum or difference)
	Additive,

	/// Multiplicative operation (product or quotient)
	Multiplicative,

	/// Exponentiation
	Exponential,

	/// Function-like operation with its operands enclosed (absolute value, rolled, minimum, or maximum)
	Call,

	/// Single value, no operation
	Value,
}

/// Trait that offers [`OpType`]-related information
pub trait HasOpType {
	/// Gets the type of this term.
	fn op_type(&self) -> OpType;

	/// Checks whether the operation of this term is commutative.
	fn is_commutative(&self) -> bool;

	/// Checks whether this term is a single value.
	fn is_value(&self) -> bool {
		self.op_type() == OpType::Value
	}

	/// Checks whether this term is an additive operation.
	fn is_additive(&self) -> bool {
		self.op_type() == OpType::Additive
	}

	/// Checks whether this term is a multiplicative operation.
	fn is_multiplicative(&self) -> bool {
		self.op_type() == OpType::Multiplicative
	}
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed expression string with additional information about non-deterministic elements.
	/// Any elements of the expression that can have a different result between multiple evaluations or multiple results
	/// should list all of the specific individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Trait for describing binary expressions with influence from own type.
/// Used for wrapping parentheses around operands whose grouping would otherwise be lost.
trait DescribeBinaryExpr: HasOpType + Describe + Sized {
	/// Builds a detailed description for a binary expression with parentheses added around lower-precedence operands.
	/// A right operand of equal precedence is only left unwrapped when it is the same associative operation.
	fn describe_binary_expr(&self, op: char, a: &Self, b: &Self, list_limit: Option<usize>) -> String {
		let own = self.op_type();
		let wrap_a = a.op_type() < own || (own == OpType::Exponential && a.op_type() == own);
		let wrap_b = b.op_type() < own
			|| (b.op_type() == own && !(self.is_commutative() && mem::discriminant(self) == mem::discriminant(b)));

		format!(
			"{} {} {}",
			if wrap_a {
				paren_wrap(a.describe(list_limit))
			} else {
				a.describe(list_limit)
			},
			op,
			if wrap_b {
				paren_wrap(b.describe(list_limit))
			} else {
				b.describe(list_limit)
			}
		)
	}
}

impl<T: HasOpType + Describe> DescribeBinaryExpr for T {}

/// Wraps a string in parentheses.
#[must_use]
fn paren_wrap(mut text: String) -> String {
	text.insert(0, '(');
	text.push(')');
	text
}

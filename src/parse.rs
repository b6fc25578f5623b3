//! Parser generators for notation that describes flat sums of dice, like `3d8 + d12 - D21 + 3`.
//!
//! The notation is a sequence of signed segments, each being either dice (`<count>d<faces>`, with the count defaulting
//! to 1) or a plain number. Whitespace is insignificant, and is stripped from the input entirely before parsing.
//! A run of signs between segments is combined into a single sign, so `d20+-2` is the same as `d20 - 2`.
//!
//! The parser generators in this module work on input that has already been stripped of whitespace (see
//! [`strip_whitespace()`]). The [`FromStr`] implementations and [`parse()`] take care of that automatically.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{iter, str::FromStr};

use chumsky::prelude::*;

use crate::{
	dice::{DiceTerm, SimpleDice},
	term::Term,
};

/// Parser extras used by all parsers in this module
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Generates a parser for a run of one or more decimal digits.
fn digits<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
	one_of("0123456789").repeated().at_least(1).collect::<String>()
}

/// Generates a parser for a run of one or more `+`/`-` signs. Outputs whether the combined sign is negative.
pub fn sign<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> + Clone {
	one_of("+-")
		.repeated()
		.at_least(1)
		.collect::<Vec<char>>()
		.map(|signs| signs.iter().filter(|sign| **sign == '-').count() % 2 == 1)
		.labelled("sign")
}

/// Raw pieces of a segment: the count digits, and the die operator along with its face digits
type Segment = (Option<String>, Option<Option<String>>);

/// Generates a parser for the raw pieces of an unsigned segment. Nothing is validated at this point.
fn segment<'src>() -> impl Parser<'src, &'src str, Segment, Extra<'src>> + Clone {
	digits()
		.or_not()
		.then(one_of("dD").ignore_then(digits().or_not()).or_not())
}

/// Generates a parser that specifically handles unsigned segments like "d20", "3d8", "2D6", or "5".
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, SimpleDice, Extra<'src>> + Clone {
	segment()
		.validate(|segment, extra, emitter| {
			segment_dice(false, segment).unwrap_or_else(|msg| {
				emitter.emit(Rich::custom(extra.span(), msg));
				SimpleDice::constant(0)
			})
		})
		.labelled("dice or number")
}

/// Generates a parser for a segment preceded by at least one sign, like "+d12", "-3", or "+-2".
pub fn signed_dice_part<'src>() -> impl Parser<'src, &'src str, SimpleDice, Extra<'src>> + Clone {
	sign()
		.then(segment())
		.validate(|(negative, segment), extra, emitter| {
			segment_dice(negative, segment).unwrap_or_else(|msg| {
				emitter.emit(Rich::custom(extra.span(), msg));
				SimpleDice::constant(0)
			})
		})
		.labelled("signed dice or number")
}

/// Generates a parser for a segment with an optional leading sign, like "d20" or "-2d6".
fn leading_dice_part<'src>() -> impl Parser<'src, &'src str, SimpleDice, Extra<'src>> + Clone {
	signed_dice_part().or(dice_part())
}

/// Generates a parser that handles full flat sums of dice and numbers like "3d8+d12-D21+3".
pub fn dice_term_part<'src>() -> impl Parser<'src, &'src str, DiceTerm, Extra<'src>> + Clone {
	leading_dice_part()
		.then(signed_dice_part().repeated().collect::<Vec<_>>())
		.map(|(first, rest)| iter::once(first).chain(rest).collect())
}

/// Generates a parser that handles a single optionally-signed segment like "-d20" and expects end of input.
pub fn dice<'src>() -> impl Parser<'src, &'src str, SimpleDice, Extra<'src>> + Clone {
	leading_dice_part().then_ignore(end())
}

/// Generates a parser that handles full flat sums of dice and numbers and expects end of input.
pub fn dice_term<'src>() -> impl Parser<'src, &'src str, DiceTerm, Extra<'src>> + Clone {
	dice_term_part().then_ignore(end())
}

/// Builds the dice for a segment. The sign is applied before the count is narrowed to [`i32`], so the full range of
/// counts (including [`i32::MIN`]) can be read back.
fn segment_dice(negative: bool, (count, faces): Segment) -> Result<SimpleDice, String> {
	let count = match count {
		Some(count) => count.parse::<u32>().map_err(|err| format!("dice count: {err}"))?,
		None if faces.is_some() => 1,
		None => return Err(String::from("expected a number or dice")),
	};

	let times = if negative {
		-i64::from(count)
	} else {
		i64::from(count)
	};
	let times = i32::try_from(times).map_err(|err| format!("dice count {times}: {err}"))?;

	match faces {
		Some(Some(faces)) => {
			let faces = faces.parse::<u32>().map_err(|err| format!("dice faces: {err}"))?;
			Ok(SimpleDice::from_parts(times, faces))
		}
		Some(None) => Err(String::from("cannot specify a die with an unspecified number of faces")),
		None => Ok(SimpleDice::constant(times)),
	}
}

/// Removes all whitespace from the input.
#[must_use]
pub fn strip_whitespace(input: &str) -> String {
	input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses notation into a [`Term::Dice`], keeping all entries in the order they were written.
///
/// # Errors
/// If the input doesn't match the notation, an error is returned with the details of everything that went wrong.
///
/// # Examples
/// ```
/// use dice_terms::{parse, term::Term};
///
/// let term = parse("3d8 + d12 - D21 + 3 + 3 - 3")?;
/// assert_eq!(term.to_string(), "+3D8 +1D12 -1D21 +3 +3 -3");
/// assert_eq!(term.contract().to_string(), "-1D21 +1D12 +3D8 +3");
///
/// let term = parse("D20+-2")?;
/// assert!(term.contains(&Term::die(20)));
/// assert!(term.contains(&Term::Num(-2)));
///
/// assert!(parse("x20 + -1").is_err());
/// # Ok::<(), dice_terms::parse::Error>(())
/// ```
pub fn parse(input: &str) -> Result<Term, Error> {
	input.parse::<DiceTerm>().map(Term::Dice)
}

/// Error that can occur while parsing a string into a term or dice
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{details}")]
#[non_exhaustive]
pub struct Error {
	/// Details of all the problems encountered, separated by semicolons
	pub details: String,
}

impl From<Vec<Rich<'_, char>>> for Error {
	fn from(errs: Vec<Rich<'_, char>>) -> Self {
		Self {
			details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
		}
	}
}

impl FromStr for SimpleDice {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let input = strip_whitespace(s);
		let result = dice().parse(input.as_str()).into_result().map_err(Error::from);
		result
	}
}

impl FromStr for DiceTerm {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let input = strip_whitespace(s);
		let result = dice_term().parse(input.as_str()).into_result().map_err(Error::from);

		#[cfg(feature = "logging")]
		{
			match &result {
				Ok(term) => log::debug!("parsed \"{s}\" into \"{term}\""),
				Err(err) => log::debug!("failed to parse \"{s}\": {err}"),
			}
		}

		result
	}
}

impl FromStr for Term {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}

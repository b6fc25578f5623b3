#![doc = pretty_readme::docify!("README.md", "https://docs.rs/dice-terms/latest/dice_terms/", "./")]
#![cfg_attr(not(any(doc, test)), no_std)]
#![expect(
	clippy::tabs_in_doc_comments,
	reason = "Consistency with source, user-configurability & accessibility"
)]
#![deny(macro_use_extern_crate, meta_variable_misuse, unit_bindings)]
#![warn(
	explicit_outlives_requirements,
	missing_docs,
	missing_debug_implementations,
	unreachable_pub,
	unused_crate_dependencies,
	unused_qualifications,
	clippy::pedantic,
	clippy::absolute_paths,
	clippy::alloc_instead_of_core,
	clippy::allow_attributes_without_reason,
	clippy::cfg_not_test,
	clippy::clone_on_ref_ptr,
	clippy::cognitive_complexity,
	clippy::dbg_macro,
	clippy::empty_enum_variants_with_brackets,
	clippy::empty_structs_with_brackets,
	clippy::exhaustive_enums,
	clippy::exhaustive_structs,
	clippy::exit,
	clippy::expect_used,
	clippy::get_unwrap,
	clippy::if_then_some_else_none,
	clippy::infinite_loop,
	clippy::lossy_float_literal,
	clippy::map_err_ignore,
	clippy::missing_const_for_fn,
	clippy::missing_docs_in_private_items,
	clippy::multiple_inherent_impl,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::print_stderr,
	clippy::print_stdout,
	clippy::pub_without_shorthand,
	clippy::redundant_type_annotations,
	clippy::ref_patterns,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::same_name_method,
	clippy::self_named_module_files,
	clippy::semicolon_inside_block,
	clippy::std_instead_of_alloc,
	clippy::std_instead_of_core,
	clippy::str_to_string,
	clippy::tests_outside_test_module,
	clippy::try_err,
	clippy::undocumented_unsafe_blocks,
	clippy::unnecessary_self_imports,
	clippy::unneeded_field_pattern,
	clippy::unused_result_ok,
	clippy::unwrap_in_result,
	clippy::unwrap_used,
	clippy::verbose_file_reads
)]

extern crate alloc;
extern crate core;

pub mod dice;
#[cfg(feature = "parse")]
pub mod parse;
pub mod term;

pub use dice::{DiceTerm, Roller, SimpleDice};
#[cfg(feature = "parse")]
pub use parse::parse;
pub use term::Term;

use term::{CalcError, EvalError};

#[cfg(test)]
mod tests;

#[cfg(feature = "build-binary")]
use ariadne as _;
#[cfg(feature = "build-binary")]
use pretty_env_logger as _;

/// Evaluates a term all the way down to a single integer, rolling every die with `roller` and resolving every
/// reference with `refs`. Every call rolls all dice anew, including those in [`Term::Rolled`] terms (see
/// [`Term::fix_rolled()`] for rolling those only once).
///
/// # Errors
/// If a reference can't be resolved, a division by zero occurs, or any calculation overflows, an error variant is
/// returned.
///
/// # Examples
/// ```
/// use dice_terms::{dice::roller::Max as MaxRoller, evaluate, parse};
///
/// let term = parse("2d6 + 3")?;
/// assert_eq!(evaluate(&term, &mut MaxRoller, dice_terms::no_refs)?, 15);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn evaluate<R, F>(term: &Term, roller: &mut R, refs: F) -> Result<i32, Error>
where
	R: Roller,
	F: Fn(&str) -> Option<i32>,
{
	let total = term.eval(roller, &refs)?.calc()?;

	#[cfg(feature = "logging")]
	{
		log::debug!("evaluated \"{term}\" to {total}");
	}

	Ok(total)
}

/// Contracts a term into its canonical form. See [`Term::contract()`].
#[must_use]
#[inline]
pub fn contract(term: &Term) -> Term {
	term.contract()
}

/// Reference lookup that never resolves anything, for evaluating terms that don't contain references.
#[must_use]
#[inline]
pub const fn no_refs(_name: &str) -> Option<i32> {
	None
}

/// Error that can occur while evaluating a term to an integer
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// Error while rolling dice or resolving references
	#[error(transparent)]
	Eval(#[from] EvalError),

	/// Error while calculating the total
	#[error(transparent)]
	Calc(#[from] CalcError),
}

#[cfg(feature = "parse")]
use std::{
	env,
	io::{self, Write},
	process::ExitCode,
};

#[cfg(feature = "parse")]
use ariadne::{Color, Label, Report, ReportKind, Source};
#[cfg(feature = "parse")]
use chumsky::Parser;
#[cfg(feature = "parse")]
use dice_terms::{
	dice::roller::FastRand as FastRandRoller,
	parse::{dice_term, strip_whitespace},
	no_refs,
	term::{Describe, Term},
};

/// Max number of individual rolls to list for each set of dice
#[cfg(feature = "parse")]
const LIST_LIMIT: usize = 20;

#[cfg(feature = "parse")]
fn main() -> ExitCode {
	pretty_env_logger::init();

	let args = env::args();
	let input = if args.len() > 1 {
		// Obtain the expression by combining all args passed to the executable, so that it can be left unquoted
		// even with spaces. The first argument is ignored since it is typically the name of the executable itself.
		args.skip(1).collect::<Vec<String>>().join(" ")
	} else {
		let mut lines = io::stdin().lines();

		// If there isn't already input available in stdin, display a prompt for it
		if lines.size_hint().1.is_none() {
			print!("Enter dice term: ");
			let _ = io::stdout().flush();
		}

		// Grab the first line available from stdin
		match lines.next() {
			Some(Ok(line)) => line,
			Some(Err(err)) => {
				eprintln!("Unable to read input: {err}");
				return ExitCode::FAILURE;
			}
			None => {
				eprintln!("No input given");
				return ExitCode::FAILURE;
			}
		}
	};

	println!("Input: {input}");

	// Parse the stripped input directly so that diagnostics can point at the problem
	let stripped = strip_whitespace(&input);
	let term = match dice_term().parse(&stripped).into_result() {
		Ok(flat) => Term::Dice(flat),
		Err(errs) => {
			for err in errs {
				let span = err.span().start..err.span().end;
				let _ = Report::build(ReportKind::Error, span.clone())
					.with_message("unable to parse dice term")
					.with_label(Label::new(span).with_message(err.to_string()).with_color(Color::Red))
					.finish()
					.eprint(Source::from(&stripped));
			}
			return ExitCode::FAILURE;
		}
	};

	let mut roller = roller(env::var("DICE_SEED").ok().as_deref());

	let contracted = term.contract();
	println!("Parsed: {term}");
	println!("Contracted: {contracted}");
	match contracted.average() {
		Some(average) => println!("Average: {average}"),
		None => println!("Average: unknown"),
	}

	let evaled = match term.eval(&mut roller, &no_refs) {
		Ok(evaled) => evaled,
		Err(err) => {
			eprintln!("Evaluation error: {err}");
			return ExitCode::FAILURE;
		}
	};

	println!();
	println!("Rolled: {}", evaled.describe(Some(LIST_LIMIT)));
	match evaled.calc() {
		Ok(total) => {
			println!("Total: {total}");
			ExitCode::SUCCESS
		}
		Err(err) => {
			eprintln!("Calculation error: {err}");
			ExitCode::FAILURE
		}
	}
}

/// Creates the roller, seeded with the value of `DICE_SEED` when it holds a valid seed.
#[cfg(feature = "parse")]
fn roller(seed: Option<&str>) -> FastRandRoller {
	let Some(seed) = seed else {
		return FastRandRoller::default();
	};

	match seed.trim().parse::<u64>() {
		Ok(seed) => FastRandRoller::with_seed(seed),
		Err(err) => {
			log::warn!("ignoring invalid seed \"{seed}\" in DICE_SEED: {err}");
			FastRandRoller::default()
		}
	}
}

#[cfg(not(feature = "parse"))]
fn main() {
	println!("Nothing to do since the parse feature is disabled.")
}

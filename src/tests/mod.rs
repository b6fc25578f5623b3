mod dice;
#[cfg(feature = "parse")]
mod parse;

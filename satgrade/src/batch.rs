pub use satgrade_core::expected_objective_from_path;
use satgrade_core::{Mode, Weight};
use std::{fmt, path::PathBuf};

/// The verdict an instance is known to have
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expectation {
	Satisfiable,
	Unsatisfiable,
	Optimal(Weight),
}

impl Expectation {
	pub fn mode(&self) -> Mode {
		match self {
			Expectation::Satisfiable | Expectation::Unsatisfiable => Mode::Sat,
			Expectation::Optimal(_) => Mode::Opt,
		}
	}
}

impl fmt::Display for Expectation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Expectation::Satisfiable => write!(f, "a satisfiable instance"),
			Expectation::Unsatisfiable => write!(f, "an unsatisfiable instance"),
			Expectation::Optimal(opt) => write!(f, "an instance with optimum {opt}"),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
	pub instance: PathBuf,
	pub expectation: Expectation,
}

impl Job {
	pub fn new<P: Into<PathBuf>>(instance: P, expectation: Expectation) -> Self {
		Self {
			instance: instance.into(),
			expectation,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn modes() {
		assert_eq!(Expectation::Satisfiable.mode(), Mode::Sat);
		assert_eq!(Expectation::Unsatisfiable.mode(), Mode::Sat);
		assert_eq!(Expectation::Optimal(4).mode(), Mode::Opt);
	}
}

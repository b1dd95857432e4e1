//! ANSI styling for the grader's console report

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
	Underline,
	Success,
	Failure,
}

impl Style {
	fn code(self) -> &'static str {
		match self {
			Style::Underline => "\x1b[4m",
			Style::Success => "\x1b[92m",
			Style::Failure => "\x1b[91m",
		}
	}
}

const RESET: &str = "\x1b[0m";

/// Whether to emit escape codes at all
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	enabled: bool,
}

impl Palette {
	pub fn new(enabled: bool) -> Self {
		Self { enabled }
	}

	pub fn paint<T: fmt::Display>(self, style: Style, value: T) -> Painted<T> {
		Painted {
			style: self.enabled.then_some(style),
			value,
		}
	}
}

pub struct Painted<T> {
	style: Option<Style>,
	value: T,
}

impl<T: fmt::Display> fmt::Display for Painted<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.style {
			Some(style) => write!(f, "{}{}{}", style.code(), self.value, RESET),
			None => write!(f, "{}", self.value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn painting() {
		let on = Palette::new(true);
		assert_eq!(
			on.paint(Style::Failure, "no").to_string(),
			"\x1b[91mno\x1b[0m"
		);
		assert_eq!(
			on.paint(Style::Underline, 12).to_string(),
			"\x1b[4m12\x1b[0m"
		);

		let off = Palette::new(false);
		assert_eq!(off.paint(Style::Success, "yes").to_string(), "yes");
	}
}

use crate::{
	error::ProtocolError,
	types::{Assignment, RawLit, Status, Weight},
};
use log::{debug, warn};

/// Which family of answers the solver was asked for. Selects the shape of the
/// value line: `v 0 <lits>` when searching for a model, `v <lits>` when
/// optimising.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	Sat,
	Opt,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
	Unsatisfiable,
	/// None when the solver printed no value line
	Satisfiable(Option<Assignment>),
	Optimal {
		objective: Weight,
		assignment: Assignment,
	},
	Malformed(ProtocolError),
	ErrorExit(i32),
}

impl Answer {
	pub fn status(&self) -> Option<Status> {
		match self {
			Answer::Unsatisfiable => Some(Status::Unsatisfiable),
			Answer::Satisfiable(_) => Some(Status::Satisfiable),
			Answer::Optimal { .. } => Some(Status::Optimal),
			Answer::Malformed(_) | Answer::ErrorExit(_) => None,
		}
	}
}

/// Decodes the captured stdout of a solver run. Output of a run that exited
/// with a non-zero code is not looked at.
pub fn decode(stdout: &str, exit_code: i32, mode: Mode) -> Answer {
	if exit_code != 0 {
		return Answer::ErrorExit(exit_code);
	}

	match decode_lines(stdout, mode) {
		Ok(answer) => answer,
		Err(err) => {
			debug!("rejected solver output: {err}");
			Answer::Malformed(err)
		}
	}
}

fn decode_lines(stdout: &str, mode: Mode) -> Result<Answer, ProtocolError> {
	let mut lines = stdout.lines();

	let status = loop {
		let line = lines.next().ok_or(ProtocolError::MissingStatus)?;
		if !is_skipped(line) {
			break parse_status(line)?;
		}
	};

	match status {
		Status::Unsatisfiable => Ok(Answer::Unsatisfiable),

		// Read to the end; the last value line wins
		Status::Satisfiable => {
			let mut assignment = None;
			for line in lines.filter(|line| !is_skipped(line)) {
				if line.starts_with('s') {
					return Err(ProtocolError::DuplicateStatus(line.to_string()));
				}
				let body = value_body(line, mode)
					.ok_or_else(|| ProtocolError::UnexpectedLine(line.to_string()))?;
				if assignment.is_some() {
					debug!("value line `{line}` replaces the previous assignment");
				}
				assignment = Some(parse_assignment(body, line)?);
			}

			Ok(Answer::Satisfiable(assignment))
		}

		Status::Optimal => {
			let line = lines.next().ok_or(ProtocolError::Truncated("objective"))?;
			let objective = line
				.strip_prefix("o ")
				.ok_or_else(|| ProtocolError::ExpectedObjective(line.to_string()))?
				.trim()
				.parse::<Weight>()
				.map_err(|_| ProtocolError::InvalidObjective(line.to_string()))?;

			let line = lines.next().ok_or(ProtocolError::Truncated("value"))?;
			let body = value_body(line, mode)
				.ok_or_else(|| ProtocolError::ExpectedValues(line.to_string()))?;

			Ok(Answer::Optimal {
				objective,
				assignment: parse_assignment(body, line)?,
			})
		}
	}
}

#[inline]
fn is_skipped(line: &str) -> bool {
	line.trim().is_empty() || line.starts_with('c')
}

fn parse_status(line: &str) -> Result<Status, ProtocolError> {
	match line.trim() {
		"s SATISFIABLE" => Ok(Status::Satisfiable),
		"s UNSATISFIABLE" => Ok(Status::Unsatisfiable),
		"s OPTIMAL" => Ok(Status::Optimal),
		_ => Err(ProtocolError::UnexpectedLine(line.to_string())),
	}
}

/// The literals part of a value line, or None if the line does not have the
/// shape expected in `mode`
fn value_body(line: &str, mode: Mode) -> Option<&str> {
	match mode {
		Mode::Sat => line
			.strip_prefix("v 0")
			.filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace)),
		Mode::Opt => line.strip_prefix("v "),
	}
}

fn parse_assignment(body: &str, line: &str) -> Result<Assignment, ProtocolError> {
	let assignment = body
		.split_whitespace()
		.map(|token| {
			token
				.parse::<RawLit>()
				.map_err(|_| ProtocolError::InvalidLiteral {
					token: token.to_string(),
					line: line.to_string(),
				})
		})
		.collect::<Result<Assignment, _>>()?;

	let conflicts = assignment.conflicting_vars();
	if !conflicts.is_empty() {
		warn!("solver assigned both polarities to variables {conflicts:?}");
	}

	Ok(assignment)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn asn(lits: &[RawLit]) -> Assignment {
		lits.iter().copied().collect()
	}

	#[test]
	fn non_zero_exit_skips_output() {
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1\n", 1, Mode::Sat),
			Answer::ErrorExit(1)
		);
		assert_eq!(decode("garbage", -1, Mode::Opt), Answer::ErrorExit(-1));
	}

	#[test]
	fn unsatisfiable_ignores_the_rest() {
		let out = "c solving\n\ns UNSATISFIABLE\nanything at all\n";
		assert_eq!(decode(out, 0, Mode::Sat), Answer::Unsatisfiable);
	}

	#[test]
	fn satisfiable_with_values() {
		let out = "c hello\ns SATISFIABLE\nc model follows\nv 0 1 -2 3\n";
		assert_eq!(
			decode(out, 0, Mode::Sat),
			Answer::Satisfiable(Some(asn(&[1, -2, 3])))
		);
	}

	#[test]
	fn satisfiable_without_values() {
		assert_eq!(
			decode("s SATISFIABLE\n\nc done\n", 0, Mode::Sat),
			Answer::Satisfiable(None)
		);
		assert_eq!(
			decode("s SATISFIABLE\nv 0\n", 0, Mode::Sat),
			Answer::Satisfiable(Some(Assignment::default()))
		);
	}

	#[test]
	fn sat_values_need_the_flag() {
		assert_eq!(
			decode("s SATISFIABLE\nv 1 -2\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("v 1 -2".to_string()))
		);
		assert_eq!(
			decode("s SATISFIABLE\nv 01 -2\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("v 01 -2".to_string()))
		);
	}

	#[test]
	fn unexpected_lines() {
		assert_eq!(
			decode("s UNKNOWN\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("s UNKNOWN".to_string()))
		);
		assert_eq!(
			decode("hello\ns SATISFIABLE\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("hello".to_string()))
		);
		assert_eq!(
			decode("s SATISFIABLE\nx\nv 0 1\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("x".to_string()))
		);
		assert_eq!(
			decode("v 0 1\ns SATISFIABLE\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("v 0 1".to_string()))
		);
		assert_eq!(
			decode("s SATISFIABLE\ns SATISFIABLE\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::DuplicateStatus(
				"s SATISFIABLE".to_string()
			))
		);
	}

	#[test]
	fn satisfiable_reads_to_the_end() {
		assert_eq!(
			decode(
				"s SATISFIABLE\nv 0 1 -2\ns UNSATISFIABLE\ngarbage\n",
				0,
				Mode::Sat
			),
			Answer::Malformed(ProtocolError::DuplicateStatus(
				"s UNSATISFIABLE".to_string()
			))
		);
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1 -2\ngarbage\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::UnexpectedLine("garbage".to_string()))
		);
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1 -2\nc done\n\n", 0, Mode::Sat),
			Answer::Satisfiable(Some(asn(&[1, -2])))
		);
	}

	#[test]
	fn last_value_line_wins() {
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1 -2\nc again\nv 0 1 2\n", 0, Mode::Sat),
			Answer::Satisfiable(Some(asn(&[1, 2])))
		);
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1\nv 0 x\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::InvalidLiteral {
				token: "x".to_string(),
				line: "v 0 x".to_string()
			})
		);
	}

	#[test]
	fn missing_status() {
		assert_eq!(
			decode("c nothing to say\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::MissingStatus)
		);
		assert_eq!(
			decode("", 0, Mode::Opt),
			Answer::Malformed(ProtocolError::MissingStatus)
		);
	}

	#[test]
	fn bad_literal() {
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1 two\n", 0, Mode::Sat),
			Answer::Malformed(ProtocolError::InvalidLiteral {
				token: "two".to_string(),
				line: "v 0 1 two".to_string()
			})
		);
	}

	#[test]
	fn optimal() {
		let out = "c searching\ns OPTIMAL\no 12\nv 0 1 -2 -3 \n";
		assert_eq!(
			decode(out, 0, Mode::Opt),
			Answer::Optimal {
				objective: 12,
				assignment: asn(&[1, -2, -3])
			}
		);
	}

	#[test]
	fn optimal_lines_must_follow_immediately() {
		assert_eq!(
			decode("s OPTIMAL\nc objective next\no 1\nv 1\n", 0, Mode::Opt),
			Answer::Malformed(ProtocolError::ExpectedObjective(
				"c objective next".to_string()
			))
		);
		assert_eq!(
			decode("s OPTIMAL\no 1\n\nv 1\n", 0, Mode::Opt),
			Answer::Malformed(ProtocolError::ExpectedValues(String::new()))
		);
		assert_eq!(
			decode("s OPTIMAL\no 1\n", 0, Mode::Opt),
			Answer::Malformed(ProtocolError::Truncated("value"))
		);
		assert_eq!(
			decode("s OPTIMAL\n", 0, Mode::Opt),
			Answer::Malformed(ProtocolError::Truncated("objective"))
		);
	}

	#[test]
	fn optimal_objective_must_be_a_cost() {
		assert_eq!(
			decode("s OPTIMAL\no -4\nv 1\n", 0, Mode::Opt),
			Answer::Malformed(ProtocolError::InvalidObjective("o -4".to_string()))
		);
	}

	#[test]
	fn statuses() {
		assert_eq!(Answer::Unsatisfiable.status(), Some(Status::Unsatisfiable));
		assert_eq!(
			Answer::Satisfiable(None).status(),
			Some(Status::Satisfiable)
		);
		assert_eq!(Answer::ErrorExit(1).status(), None);
	}

	#[test]
	fn unsatisfiable_in_opt_mode() {
		assert_eq!(
			decode("s UNSATISFIABLE\n", 0, Mode::Opt),
			Answer::Unsatisfiable
		);
	}

	#[test]
	fn conflicting_values_are_kept() {
		assert_eq!(
			decode("s SATISFIABLE\nv 0 1 -1\n", 0, Mode::Sat),
			Answer::Satisfiable(Some(asn(&[1, -1])))
		);
	}
}

use crate::{
	answer::Answer,
	error::{CheckError, ValidationError},
	types::{Formula, Status, Weight},
};
use log::debug;
use std::path::Path;

fn unexpected(expected: Status, answer: &Answer) -> CheckError {
	let found = match answer {
		Answer::Malformed(err) => return CheckError::Protocol(err.clone()),
		Answer::ErrorExit(code) => return CheckError::Process(*code),
		Answer::Unsatisfiable => Status::Unsatisfiable,
		Answer::Satisfiable(_) => Status::Satisfiable,
		Answer::Optimal { .. } => Status::Optimal,
	};

	ValidationError::StatusMismatch { expected, found }.into()
}

/// Accepts only an UNSATISFIABLE claim
pub fn verify_unsat(formula: &Formula, answer: &Answer) -> Result<(), CheckError> {
	debug!(
		"checking UNSATISFIABLE claim on {} clauses",
		formula.clauses().len()
	);

	match answer {
		Answer::Unsatisfiable => Ok(()),
		_ => Err(unexpected(Status::Unsatisfiable, answer)),
	}
}

/// Accepts a SATISFIABLE claim whose assignment makes a literal of every
/// clause true
pub fn verify_sat(formula: &Formula, answer: &Answer) -> Result<(), CheckError> {
	let assignment = match answer {
		Answer::Satisfiable(Some(assignment)) => assignment,
		Answer::Satisfiable(None) => {
			return Err(ValidationError::MissingAssignment.into())
		}
		_ => return Err(unexpected(Status::Satisfiable, answer)),
	};

	debug!(
		"checking {} assigned literals against {} clauses",
		assignment.len(),
		formula.clauses().len()
	);

	match formula.first_unsatisfied(assignment) {
		Some(clause) => {
			Err(ValidationError::UnsatisfiedClause(clause.text().to_string()).into())
		}
		None => Ok(()),
	}
}

/// Accepts an OPTIMAL claim if the reported objective is the known optimum
/// and is also the cost of the reported assignment
pub fn verify_opt(
	formula: &Formula,
	answer: &Answer,
	expected_objective: Weight,
) -> Result<(), CheckError> {
	let (reported, assignment) = match answer {
		Answer::Optimal {
			objective,
			assignment,
		} => (*objective, assignment),
		_ => return Err(unexpected(Status::Optimal, answer)),
	};

	if reported != expected_objective {
		return Err(ValidationError::NotOptimal {
			reported,
			expected: expected_objective,
		}
		.into());
	}

	let evaluated = formula.objective(assignment).map_err(|clause| {
		ValidationError::HardClauseFalsified(clause.text().to_string())
	})?;

	debug!("evaluated objective {evaluated}, reported {reported}");

	if evaluated != reported {
		return Err(ValidationError::ObjectiveMismatch {
			evaluated,
			reported,
		}
		.into());
	}

	Ok(())
}

/// Benchmark sets carry the known optimum in the file name, as in
/// `instance.<optimum>.wcnf`
pub fn expected_objective_from_path(path: &Path) -> Option<Weight> {
	let name = path.file_name()?.to_str()?;
	let mut parts = name.rsplit('.');
	parts.next()?;
	parts.next()?.parse().ok()
}

use crate::{
	batch::{Expectation, Job},
	solver::Solver,
};
use log::info;
use satgrade_core::{
	decode, parse_dimacs, verify_opt, verify_sat, verify_unsat, CheckError,
};
use std::fs;

/// What to do after an instance fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
	#[default]
	FailFast,
	KeepGoing,
}

#[derive(Debug)]
pub struct Failure {
	pub job: Job,
	pub error: CheckError,
}

#[derive(Debug, Default)]
pub struct Report {
	pub passed: Vec<Job>,
	pub failed: Vec<Failure>,
	/// Jobs never run because an earlier one failed
	pub skipped: Vec<Job>,
}

impl Report {
	pub fn success(&self) -> bool {
		self.failed.is_empty() && self.skipped.is_empty()
	}

	pub fn first_failure(&self) -> Option<&Failure> {
		self.failed.first()
	}
}

/// Parses the instance, runs the solver on it and checks the answer against
/// the job's expectation
pub fn check_instance<S>(solver: &mut S, job: &Job) -> Result<(), CheckError>
where
	S: Solver + ?Sized,
{
	let path = &job.instance;
	let dimacs = fs::read_to_string(path).map_err(|source| CheckError::Io {
		context: format!("could not read {}", path.display()),
		source,
	})?;
	let formula = parse_dimacs(&dimacs)?;

	let output = solver.run(path).map_err(|source| CheckError::Io {
		context: format!("could not run the solver on {}", path.display()),
		source,
	})?;
	let answer = decode(&output.stdout, output.exit_code, job.expectation.mode());

	match job.expectation {
		Expectation::Satisfiable => verify_sat(&formula, &answer),
		Expectation::Unsatisfiable => verify_unsat(&formula, &answer),
		Expectation::Optimal(expected) => verify_opt(&formula, &answer, expected),
	}
}

/// Checks jobs in order, reporting each result to `on_result` as soon as it
/// is known
pub fn run_batch<S, F>(
	solver: &mut S,
	jobs: Vec<Job>,
	policy: Policy,
	mut on_result: F,
) -> Report
where
	S: Solver + ?Sized,
	F: FnMut(&Job, &Result<(), CheckError>),
{
	let mut report = Report::default();
	let mut jobs = jobs.into_iter();

	while let Some(job) = jobs.next() {
		info!("checking {} as {}", job.instance.display(), job.expectation);

		let result = check_instance(solver, &job);
		on_result(&job, &result);

		match result {
			Ok(()) => report.passed.push(job),
			Err(error) => {
				info!("{} failed: {}", job.instance.display(), error);
				report.failed.push(Failure { job, error });

				if policy == Policy::FailFast {
					report.skipped.extend(jobs.by_ref());
					break;
				}
			}
		}
	}

	report
}

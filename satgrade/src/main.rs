use anyhow::{bail, Context, Result};
use clap::{arg, Parser, ValueHint::FilePath};
use satgrade::{
	expected_objective_from_path,
	term::{Palette, Style},
	run_batch, Expectation, Job, Policy, ProcessSolver,
};
use std::{
	io::{self, IsTerminal},
	path::PathBuf,
	process::ExitCode,
};

/// Grades a SAT/MaxSAT solver by checking its answers on DIMACS instances
#[derive(Parser, Debug)]
struct Args {
	/// Solver executable
	#[arg(long, value_hint = FilePath)]
	solver: PathBuf,
	/// Prepended to the instance path to form the solver's argument
	#[arg(long, default_value = ProcessSolver::DEFAULT_INSTANCE_ARG_PREFIX)]
	instance_arg_prefix: String,
	/// Extra argument passed to the solver before the instance
	#[arg(long = "solver-arg", allow_hyphen_values = true)]
	solver_args: Vec<String>,
	/// Instances the solver must report SATISFIABLE with a model
	#[arg(short = 's', long = "sat", num_args = 1.., value_hint = FilePath)]
	sat_instances: Vec<PathBuf>,
	/// Instances the solver must report UNSATISFIABLE
	#[arg(short = 'u', long = "unsat", num_args = 1.., value_hint = FilePath)]
	unsat_instances: Vec<PathBuf>,
	/// WCNF instances the solver must solve to optimality. The optimum is read
	/// from the file name (`name.<optimum>.wcnf`)
	#[arg(short = 'o', long = "opt", num_args = 1.., value_hint = FilePath)]
	opt_instances: Vec<PathBuf>,
	/// Optimum for all --opt instances, instead of the one in the file names
	#[arg(long)]
	expected_objective: Option<u64>,
	/// Check every instance instead of stopping at the first failure
	#[arg(long)]
	keep_going: bool,
	#[arg(long)]
	no_color: bool,
}

fn jobs(args: &Args) -> Result<Vec<Job>> {
	let mut jobs: Vec<Job> = args
		.sat_instances
		.iter()
		.map(|path| Job::new(path, Expectation::Satisfiable))
		.chain(
			args.unsat_instances
				.iter()
				.map(|path| Job::new(path, Expectation::Unsatisfiable)),
		)
		.collect();

	for path in args.opt_instances.iter() {
		let optimum = match args.expected_objective {
			Some(optimum) => optimum,
			None => expected_objective_from_path(path).with_context(|| {
				format!("no optimum in the file name of {}", path.display())
			})?,
		};
		jobs.push(Job::new(path, Expectation::Optimal(optimum)));
	}

	Ok(jobs)
}

fn main() -> Result<ExitCode> {
	env_logger::init();
	let args = Args::parse();

	let palette = Palette::new(!args.no_color && io::stdout().is_terminal());
	let jobs = jobs(&args)?;
	if jobs.is_empty() {
		bail!("no instances given, use --sat, --unsat or --opt");
	}

	let mut solver = ProcessSolver::new(&args.solver)
		.args(&args.solver_args)
		.instance_arg_prefix(&args.instance_arg_prefix);
	let policy = if args.keep_going {
		Policy::KeepGoing
	} else {
		Policy::FailFast
	};

	println!(
		"Using solver at {}, proceeding to testing on {} instances ...",
		solver.program().display(),
		jobs.len()
	);
	println!();

	let report = run_batch(&mut solver, jobs, policy, |job, result| {
		let title = format!("Testing {} {}", job.expectation, job.instance.display());
		print!("{} ... ", palette.paint(Style::Underline, title));

		match result {
			Ok(()) => println!("passed"),
			Err(err) => {
				println!();
				println!("{}", palette.paint(Style::Failure, err));
			}
		}
	});

	println!();
	if report.success() {
		println!(
			"{}",
			palette.paint(Style::Success, "All tests have been passed!")
		);
		return Ok(ExitCode::SUCCESS);
	}

	let checked = report.passed.len() + report.failed.len();
	println!(
		"{}",
		palette.paint(
			Style::Failure,
			format!(
				"{} of {} checked instances failed, {} not checked",
				report.failed.len(),
				checked,
				report.skipped.len()
			)
		)
	);

	Ok(ExitCode::FAILURE)
}

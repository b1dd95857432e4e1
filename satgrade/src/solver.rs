use log::{debug, warn};
use std::{
	ffi::OsString,
	io,
	path::{Path, PathBuf},
	process::Command,
};

/// What the grader observes of a finished solver run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverOutput {
	pub exit_code: i32,
	pub stdout: String,
}

pub trait Solver {
	fn run(&mut self, instance: &Path) -> io::Result<SolverOutput>;
}

/// Runs a solver executable once per instance, passing the instance as a
/// single `<prefix><path>` argument after any extra arguments
#[derive(Clone, Debug)]
pub struct ProcessSolver {
	program: PathBuf,
	args: Vec<OsString>,
	instance_arg_prefix: OsString,
}

impl ProcessSolver {
	pub const DEFAULT_INSTANCE_ARG_PREFIX: &'static str = "-file-location=";

	pub fn new<P: Into<PathBuf>>(program: P) -> Self {
		Self {
			program: program.into(),
			args: vec![],
			instance_arg_prefix: Self::DEFAULT_INSTANCE_ARG_PREFIX.into(),
		}
	}

	pub fn args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	pub fn instance_arg_prefix<S: Into<OsString>>(mut self, prefix: S) -> Self {
		self.instance_arg_prefix = prefix.into();
		self
	}

	pub fn program(&self) -> &Path {
		&self.program
	}

	fn instance_arg(&self, instance: &Path) -> OsString {
		let mut arg = self.instance_arg_prefix.clone();
		arg.push(instance);
		arg
	}
}

impl Solver for ProcessSolver {
	fn run(&mut self, instance: &Path) -> io::Result<SolverOutput> {
		let output = Command::new(&self.program)
			.args(&self.args)
			.arg(self.instance_arg(instance))
			.output()?;

		let exit_code = output.status.code().unwrap_or_else(|| {
			warn!("solver on {} was terminated by a signal", instance.display());
			-1
		});
		if !output.stderr.is_empty() {
			debug!(
				"solver stderr on {}:\n{}",
				instance.display(),
				String::from_utf8_lossy(&output.stderr)
			);
		}

		Ok(SolverOutput {
			exit_code,
			stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn instance_argument() {
		let solver = ProcessSolver::new("pumpkin");
		assert_eq!(
			solver.instance_arg(Path::new("a/b.cnf")),
			OsString::from("-file-location=a/b.cnf")
		);

		let solver = solver.instance_arg_prefix("");
		assert_eq!(solver.instance_arg(Path::new("b.cnf")), OsString::from("b.cnf"));
	}

	#[cfg(unix)]
	#[test]
	fn captures_stdout_and_exit_code() {
		// The instance argument becomes $0 of the script
		let mut solver = ProcessSolver::new("sh")
			.args(["-c", "echo \"c $0\"; echo 's UNSATISFIABLE'"]);
		let output = solver.run(Path::new("x.cnf")).unwrap();
		assert_eq!(output.exit_code, 0);
		assert_eq!(output.stdout, "c -file-location=x.cnf\ns UNSATISFIABLE\n");

		let mut solver = ProcessSolver::new("sh").args(["-c", "echo oops; exit 3"]);
		let output = solver.run(Path::new("x.cnf")).unwrap();
		assert_eq!(output.exit_code, 3);
	}

	#[test]
	fn missing_program_is_an_io_error() {
		let mut solver = ProcessSolver::new("/nonexistent/satgrade-solver");
		assert!(solver.run(Path::new("x.cnf")).is_err());
	}
}

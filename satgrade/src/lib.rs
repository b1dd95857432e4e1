pub mod batch;
pub mod run;
pub mod solver;
pub mod term;

pub use batch::{expected_objective_from_path, Expectation, Job};
pub use run::{check_instance, run_batch, Failure, Policy, Report};
pub use solver::{ProcessSolver, Solver, SolverOutput};

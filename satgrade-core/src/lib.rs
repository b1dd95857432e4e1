//! Independent checking of SAT and MaxSAT solver answers against DIMACS
//! CNF/WCNF instances.

pub mod answer;
pub mod dimacs;
pub mod error;
pub mod types;
pub mod verify;

pub use answer::{decode, Answer, Mode};
pub use dimacs::parse_dimacs;
pub use error::{CheckError, ParseError, ProtocolError, ValidationError};
pub use types::{Assignment, Clause, Formula, FormulaKind, Lit, Status, Weight};
pub use verify::{expected_objective_from_path, verify_opt, verify_sat, verify_unsat};

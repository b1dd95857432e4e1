use crate::types::{Status, Weight};
use thiserror::Error;

/// Malformed instance file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
	#[error("malformed line {line}: `{text}`")]
	Syntax { line: usize, text: String },
	#[error("clause on line {line} appears before the problem line: `{text}`")]
	ClauseBeforeHeader { line: usize, text: String },
	#[error("second problem line on line {line}: `{text}`")]
	DuplicateHeader { line: usize, text: String },
	#[error("no problem line (`p cnf` or `p wcnf`) found")]
	MissingHeader,
	#[error("clause on line {line} is not terminated by 0: `{text}`")]
	MissingTerminator { line: usize, text: String },
	#[error("clause on line {line} contains a 0 literal: `{text}`")]
	ZeroLiteral { line: usize, text: String },
	#[error("invalid number `{token}` on line {line}: `{text}`")]
	Number {
		line: usize,
		token: String,
		text: String,
	},
}

/// Malformed or unexpected solver output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
	#[error("malformed output at line `{0}`")]
	UnexpectedLine(String),
	#[error("second status line `{0}`")]
	DuplicateStatus(String),
	#[error("no status line in solver output")]
	MissingStatus,
	#[error("expected an objective line after `s OPTIMAL`, found `{0}`")]
	ExpectedObjective(String),
	#[error("expected a value line after the objective line, found `{0}`")]
	ExpectedValues(String),
	#[error("solver output ended before the {0} line")]
	Truncated(&'static str),
	#[error("invalid objective value in line `{0}`")]
	InvalidObjective(String),
	#[error("invalid literal `{token}` in line `{line}`")]
	InvalidLiteral { token: String, line: String },
}

/// A well-formed answer that is wrong
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
	#[error("unexpected result at line `s {found}`, expected `s {expected}`")]
	StatusMismatch { expected: Status, found: Status },
	#[error("solver reported SATISFIABLE without a value line")]
	MissingAssignment,
	#[error("assignment was falsified by clause `{0}`")]
	UnsatisfiedClause(String),
	#[error("assignment was falsified by hard clause `{0}`")]
	HardClauseFalsified(String),
	#[error("reported objective value {reported} is not the optimal value {expected}")]
	NotOptimal { reported: Weight, expected: Weight },
	#[error(
		"evaluated objective {evaluated} does not match reported objective {reported}"
	)]
	ObjectiveMismatch { evaluated: Weight, reported: Weight },
}

/// Why a single instance failed grading
#[derive(Error, Debug)]
pub enum CheckError {
	#[error("{context}: {source}")]
	Io {
		context: String,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid instance: {0}")]
	Instance(#[from] ParseError),
	#[error("{0}")]
	Protocol(#[from] ProtocolError),
	#[error("solver has terminated with error code {0}")]
	Process(i32),
	#[error("{0}")]
	Validation(#[from] ValidationError),
}

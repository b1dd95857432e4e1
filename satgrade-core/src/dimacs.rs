use crate::{
	error::ParseError,
	types::{Clause, Formula, FormulaKind, Lit, RawLit, Var, Weight},
};
use log::{debug, warn};
use pest::{error::LineColLocation, iterators::Pair, Parser};
use pest_derive::Parser;
use std::str::FromStr;

#[derive(Parser)]
#[grammar = "dimacs.pest"]
struct DIMACSParser;

/// Parses a DIMACS CNF (`p cnf`) or WCNF (`p wcnf`) instance
pub fn parse_dimacs(dimacs_str: &str) -> Result<Formula, ParseError> {
	let dimacs = DIMACSParser::parse(Rule::dimacs, dimacs_str)
		.map_err(|err| syntax_error(dimacs_str, &err))?
		.next()
		.ok_or(ParseError::MissingHeader)?;

	let mut formula: Option<Formula> = None;
	let mut vars_out_of_range = 0;

	for line in dimacs.into_inner() {
		match line.as_rule() {
			Rule::cnf_header | Rule::wcnf_header => {
				if formula.is_some() {
					let (line_no, text) = location(&line);
					return Err(ParseError::DuplicateHeader {
						line: line_no,
						text,
					});
				}
				formula = Some(parse_header(line)?);
			}
			Rule::clause => {
				let Some(formula) = formula.as_mut() else {
					let (line_no, text) = location(&line);
					return Err(ParseError::ClauseBeforeHeader {
						line: line_no,
						text,
					});
				};

				let clause = parse_clause(line, formula.kind())?;
				vars_out_of_range += clause
					.lits()
					.iter()
					.filter(|lit| lit.variable() > formula.num_vars())
					.count();
				formula.push(clause);
			}
			_ => (),
		}
	}

	let formula = formula.ok_or(ParseError::MissingHeader)?;

	if formula.clauses().len() != formula.num_clauses() {
		warn!(
			"problem line declares {} clauses but {} were read",
			formula.num_clauses(),
			formula.clauses().len()
		);
	}
	if vars_out_of_range > 0 {
		warn!(
			"{} literals refer to variables above the declared {}",
			vars_out_of_range,
			formula.num_vars()
		);
	}
	debug!(
		"parsed {} formula with {} variables and {} clauses",
		formula.kind(),
		formula.num_vars(),
		formula.clauses().len()
	);

	Ok(formula)
}

fn parse_header(header: Pair<Rule>) -> Result<Formula, ParseError> {
	let (line_no, text) = location(&header);
	let rule = header.as_rule();

	let mut num_vars: Var = 0;
	let mut num_clauses: usize = 0;
	let mut hard_weight: Weight = 0;

	for part in header.into_inner() {
		let token = part.as_str();
		match part.as_rule() {
			Rule::num_variables => num_vars = number(token, line_no, &text)?,
			Rule::num_clauses => num_clauses = number(token, line_no, &text)?,
			Rule::hard_weight => hard_weight = number(token, line_no, &text)?,
			_ => (),
		}
	}

	let kind = if rule == Rule::wcnf_header {
		FormulaKind::Wcnf { hard_weight }
	} else {
		FormulaKind::Cnf
	};

	Ok(Formula::with_kind(kind, num_vars, num_clauses))
}

fn parse_clause(clause: Pair<Rule>, kind: FormulaKind) -> Result<Clause, ParseError> {
	let (line_no, text) = location(&clause);
	let mut tokens = clause.into_inner().map(|token| token.as_str());

	let weight = match kind {
		FormulaKind::Cnf => None,
		// The grammar guarantees at least one token
		FormulaKind::Wcnf { .. } => match tokens.next() {
			Some(token) => Some(number::<Weight>(token, line_no, &text)?),
			None => None,
		},
	};

	let raw = tokens
		.map(|token| number::<RawLit>(token, line_no, &text))
		.collect::<Result<Vec<_>, _>>()?;

	let body = match raw.split_last() {
		Some((0, body)) => body,
		_ => {
			return Err(ParseError::MissingTerminator {
				line: line_no,
				text,
			})
		}
	};

	let lits = body
		.iter()
		.map(|&lit| Lit::from_dimacs(lit))
		.collect::<Option<Vec<_>>>()
		.ok_or_else(|| ParseError::ZeroLiteral {
			line: line_no,
			text: text.clone(),
		})?;

	Ok(Clause::parsed(lits, weight, line_no, &text))
}

fn number<T: FromStr>(token: &str, line: usize, text: &str) -> Result<T, ParseError> {
	token.parse().map_err(|_| ParseError::Number {
		line,
		token: token.to_string(),
		text: text.to_string(),
	})
}

fn location(pair: &Pair<Rule>) -> (usize, String) {
	let (line, _) = pair.as_span().start_pos().line_col();
	(line, pair.as_str().to_string())
}

fn syntax_error(dimacs_str: &str, err: &pest::error::Error<Rule>) -> ParseError {
	let line = match err.line_col {
		LineColLocation::Pos((line, _)) => line,
		LineColLocation::Span((line, _), _) => line,
	};
	let text = dimacs_str
		.lines()
		.nth(line.saturating_sub(1))
		.unwrap_or_default()
		.trim_end()
		.to_string();

	ParseError::Syntax { line, text }
}

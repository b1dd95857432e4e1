use std::{
	collections::{HashMap, HashSet},
	fmt,
	num::NonZeroI32,
};

pub type Var = u32;
pub type RawLit = i32;
pub type Weight = u64;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Status {
	Satisfiable,
	Unsatisfiable,
	Optimal,
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}",
			match self {
				Status::Satisfiable => "SATISFIABLE",
				Status::Unsatisfiable => "UNSATISFIABLE",
				Status::Optimal => "OPTIMAL",
			}
		)
	}
}

/// A DIMACS literal: the sign is the polarity, the magnitude the 1-based
/// variable index
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(NonZeroI32);

impl Lit {
	/// Returns None for the `0` terminator
	#[inline]
	pub fn from_dimacs(lit: RawLit) -> Option<Lit> {
		NonZeroI32::new(lit).map(Lit)
	}

	#[inline]
	pub fn variable(&self) -> Var {
		self.0.get().unsigned_abs()
	}

	#[inline]
	pub fn polarity(&self) -> bool {
		self.0.get() > 0
	}
}

impl From<Lit> for RawLit {
	#[inline]
	fn from(lit: Lit) -> Self {
		lit.0.get()
	}
}

impl fmt::Debug for Lit {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl fmt::Display for Lit {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
	lits: Vec<Lit>,
	weight: Option<Weight>,
	line: Option<usize>,
	text: String,
}

impl Clause {
	pub(crate) fn parsed(
		lits: Vec<Lit>,
		weight: Option<Weight>,
		line: usize,
		text: &str,
	) -> Self {
		Self {
			lits,
			weight,
			line: Some(line),
			text: text.to_string(),
		}
	}

	pub fn lits(&self) -> &[Lit] {
		&self.lits
	}

	pub fn weight(&self) -> Option<Weight> {
		self.weight
	}

	/// 1-based line of the instance text this clause was read from
	pub fn line(&self) -> Option<usize> {
		self.line
	}

	/// The clause as it appeared in the instance, or its DIMACS rendering for
	/// clauses built in code
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
		self.lits.iter().any(|&lit| assignment.satisfies(lit))
	}
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormulaKind {
	Cnf,
	Wcnf { hard_weight: Weight },
}

impl fmt::Display for FormulaKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FormulaKind::Cnf => write!(f, "cnf"),
			FormulaKind::Wcnf { .. } => write!(f, "wcnf"),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
	kind: FormulaKind,
	num_vars: Var,
	num_clauses: usize,
	clauses: Vec<Clause>,
}

impl Formula {
	pub fn new_cnf(num_vars: Var, num_clauses: usize) -> Self {
		Self::with_kind(FormulaKind::Cnf, num_vars, num_clauses)
	}

	pub fn new_wcnf(num_vars: Var, num_clauses: usize, hard_weight: Weight) -> Self {
		Self::with_kind(FormulaKind::Wcnf { hard_weight }, num_vars, num_clauses)
	}

	pub(crate) fn with_kind(
		kind: FormulaKind,
		num_vars: Var,
		num_clauses: usize,
	) -> Self {
		Self {
			kind,
			num_vars,
			num_clauses,
			clauses: Vec::with_capacity(num_clauses),
		}
	}

	pub fn kind(&self) -> FormulaKind {
		self.kind
	}

	/// Variable count declared by the header
	pub fn num_vars(&self) -> Var {
		self.num_vars
	}

	/// Clause count declared by the header
	pub fn num_clauses(&self) -> usize {
		self.num_clauses
	}

	pub fn hard_weight(&self) -> Option<Weight> {
		match self.kind {
			FormulaKind::Cnf => None,
			FormulaKind::Wcnf { hard_weight } => Some(hard_weight),
		}
	}

	pub fn clauses(&self) -> &[Clause] {
		&self.clauses
	}

	/// Adds a clause built in code. Zero literals are dropped, the weight is
	/// ignored for CNF formulas.
	pub fn add_clause<I>(&mut self, lits: I, weight: Option<Weight>)
	where
		I: IntoIterator<Item = RawLit>,
	{
		let lits: Vec<Lit> = lits.into_iter().filter_map(Lit::from_dimacs).collect();
		let weight = match self.kind {
			FormulaKind::Cnf => None,
			FormulaKind::Wcnf { hard_weight } => Some(weight.unwrap_or(hard_weight)),
		};

		let mut text = String::new();
		if let Some(weight) = weight {
			text.push_str(&format!("{weight} "));
		}
		for lit in lits.iter() {
			text.push_str(&format!("{lit} "));
		}
		text.push('0');

		self.clauses.push(Clause {
			lits,
			weight,
			line: None,
			text,
		});
	}

	pub(crate) fn push(&mut self, clause: Clause) {
		self.clauses.push(clause);
	}

	/// CNF clauses are always hard
	pub fn is_hard(&self, clause: &Clause) -> bool {
		match (self.kind, clause.weight) {
			(FormulaKind::Wcnf { hard_weight }, Some(weight)) => weight == hard_weight,
			_ => true,
		}
	}

	/// Returns the first clause not satisfied by the assignment
	pub fn first_unsatisfied(&self, assignment: &Assignment) -> Option<&Clause> {
		self.clauses
			.iter()
			.find(|clause| !clause.is_satisfied_by(assignment))
	}

	/// Sums the weights of the soft clauses left unsatisfied by the
	/// assignment. Fails with the first hard clause that is unsatisfied.
	pub fn objective(&self, assignment: &Assignment) -> Result<Weight, &Clause> {
		let mut objective: Weight = 0;

		for clause in self.clauses.iter() {
			if clause.is_satisfied_by(assignment) {
				continue;
			}

			if self.is_hard(clause) {
				return Err(clause);
			}

			objective = objective.saturating_add(clause.weight.unwrap_or(0));
		}

		Ok(objective)
	}
}

/// The literals a solver claims true. A literal not present asserts nothing
/// about its variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
	lits: HashSet<Lit>,
}

impl Assignment {
	#[inline]
	pub fn satisfies(&self, lit: Lit) -> bool {
		self.lits.contains(&lit)
	}

	pub fn len(&self) -> usize {
		self.lits.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lits.is_empty()
	}

	/// Variables asserted with both polarities, in ascending order
	pub fn conflicting_vars(&self) -> Vec<Var> {
		let mut polarities: HashMap<Var, bool> = HashMap::new();
		let mut conflicts: Vec<Var> = self
			.lits
			.iter()
			.filter_map(|lit| {
				match polarities.insert(lit.variable(), lit.polarity()) {
					Some(pol) if pol != lit.polarity() => Some(lit.variable()),
					_ => None,
				}
			})
			.collect();

		conflicts.sort_unstable();
		conflicts
	}
}

impl FromIterator<Lit> for Assignment {
	fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
		Self {
			lits: iter.into_iter().collect(),
		}
	}
}

impl FromIterator<RawLit> for Assignment {
	fn from_iter<I: IntoIterator<Item = RawLit>>(iter: I) -> Self {
		iter.into_iter().filter_map(Lit::from_dimacs).collect()
	}
}

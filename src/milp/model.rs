//! Binary program definition.

/// Index of a binary variable within a [`MilpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

/// A 0/1 decision variable.
#[derive(Debug, Clone)]
pub struct BinaryVar {
    /// Variable name, for diagnostics.
    pub name: String,
}

/// Relation between a linear expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs >= rhs`
    GreaterEq,
    /// `lhs == rhs`
    Equal,
}

/// A linear constraint `sum(coef * var) <relation> rhs`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Constraint name, for diagnostics.
    pub name: String,
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Evaluates the left-hand side under `assignment`.
    pub fn lhs(&self, assignment: impl Fn(VarId) -> bool) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment(*v))
            .map(|(_, c)| c)
            .sum()
    }

    /// Whether the constraint holds for the given left-hand side value.
    pub fn holds(&self, lhs: f64) -> bool {
        const EPS: f64 = 1e-9;
        match self.relation {
            Relation::LessEq => lhs <= self.rhs + EPS,
            Relation::GreaterEq => lhs >= self.rhs - EPS,
            Relation::Equal => (lhs - self.rhs).abs() <= EPS,
        }
    }

    /// A constraint with no terms that can never hold.
    pub fn is_trivially_violated(&self) -> bool {
        self.terms.is_empty() && !self.holds(0.0)
    }
}

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// Linear objective over binary variables.
#[derive(Debug, Clone)]
pub struct Objective {
    pub sense: Sense,
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
}

impl Objective {
    /// Evaluates the objective under `assignment`.
    pub fn value(&self, assignment: impl Fn(VarId) -> bool) -> f64 {
        self.terms
            .iter()
            .filter(|(v, _)| assignment(*v))
            .map(|(_, c)| c)
            .sum()
    }
}

/// A binary integer program.
///
/// Contains binary variables, linear constraints and an optional objective.
/// Constraints with no terms are kept: a backend must report them as
/// infeasible when they cannot hold rather than drop them.
///
/// # Examples
///
/// ```
/// use u_coverage::milp::{MilpModel, Relation, Sense};
///
/// let mut model = MilpModel::new("example");
/// let a = model.add_binary("a");
/// let b = model.add_binary("b");
/// model.add_constraint("pick_one", vec![(a, 1.0), (b, 1.0)], Relation::GreaterEq, 1.0);
/// model.set_objective(Sense::Maximize, vec![(a, 2.0), (b, 1.0)]);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MilpModel {
    /// Model name.
    pub name: String,
    /// Binary variables, indexed by [`VarId`].
    pub vars: Vec<BinaryVar>,
    /// Constraints.
    pub constraints: Vec<LinearConstraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl MilpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a binary variable and returns its id.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.vars.push(BinaryVar { name: name.into() });
        VarId(self.vars.len() - 1)
    }

    /// Adds a linear constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            relation,
            rhs,
        });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, sense: Sense, terms: Vec<(VarId, f64)>) {
        self.objective = Some(Objective { sense, terms });
    }

    /// Validates the model for consistency.
    ///
    /// Checks that all referenced variables exist and all numbers are finite.
    pub fn validate(&self) -> Result<(), String> {
        let check_terms = |owner: &str, terms: &[(VarId, f64)]| -> Result<(), String> {
            for &(var, coef) in terms {
                if var.0 >= self.vars.len() {
                    return Err(format!("{owner}: undefined variable #{}", var.0));
                }
                if !coef.is_finite() {
                    return Err(format!("{owner}: non-finite coefficient {coef}"));
                }
            }
            Ok(())
        };

        for c in &self.constraints {
            check_terms(c.name.as_str(), &c.terms)?;
            if !c.rhs.is_finite() {
                return Err(format!("{}: non-finite right-hand side {}", c.name, c.rhs));
            }
        }
        if let Some(obj) = &self.objective {
            check_terms("objective", &obj.terms)?;
        }
        Ok(())
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

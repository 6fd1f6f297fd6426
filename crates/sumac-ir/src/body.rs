use smallvec::SmallVec;

use crate::{AccessKind, Function, Location};

/// A value consumed by a statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The formal argument of the enclosing function at this index.
    Argument(usize),
    /// Any value that is not one of the enclosing function's arguments.
    Local,
}

/// The target of a call or partial application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Callee {
    /// A statically known function.
    Direct(Function),
    /// A function value only known at runtime (closure call, witness, ...).
    Indirect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApplyKind {
    Apply,
    TryApply,
    /// A call on one arm of a conditional branch.
    Conditional,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// Begin a formal access on (a projection of) `source`.
    Access {
        source: Operand,
        /// Sub-object projection indices from `source`, outermost first.
        path: SmallVec<[usize; 4]>,
        kind: AccessKind,
        location: Location,
    },
    /// Form a closure binding `captured` to the trailing parameters of `callee`.
    PartialApply {
        callee: Callee,
        captured: Vec<Operand>,
        location: Location,
    },
    /// A full application of `callee` to `arguments`.
    Apply {
        kind: ApplyKind,
        callee: Callee,
        arguments: Vec<Operand>,
        location: Location,
    },
}

impl Statement {
    pub fn location(&self) -> Location {
        match self {
            Statement::Access { location, .. }
            | Statement::PartialApply { location, .. }
            | Statement::Apply { location, .. } => *location,
        }
    }

    pub fn operands(&self) -> impl Iterator<Item = Operand> + '_ {
        let operands: &[Operand] = match self {
            Statement::Access { source, .. } => std::slice::from_ref(source),
            Statement::PartialApply { captured, .. } => captured,
            Statement::Apply { arguments, .. } => arguments,
        };
        operands.iter().copied()
    }
}

/// The ordered statements of a function definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Body {
    statements: Vec<Statement>,
}

impl Body {
    pub fn builder() -> BodyBuilder {
        BodyBuilder::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl FromIterator<Statement> for Body {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Body {
            statements: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BodyBuilder {
    statements: Vec<Statement>,
}

impl BodyBuilder {
    /// Read the whole argument at `argument`.
    pub fn read(self, argument: usize, location: Location) -> Self {
        self.access(AccessKind::Read, Operand::Argument(argument), &[], location)
    }

    /// Modify the whole argument at `argument`.
    pub fn modify(self, argument: usize, location: Location) -> Self {
        self.access(AccessKind::Modify, Operand::Argument(argument), &[], location)
    }

    /// Begin an access of `kind` on the projection `path` of `source`.
    pub fn access(
        mut self,
        kind: AccessKind,
        source: Operand,
        path: &[usize],
        location: Location,
    ) -> Self {
        self.statements.push(Statement::Access {
            source,
            path: SmallVec::from_slice(path),
            kind,
            location,
        });
        self
    }

    pub fn call(self, callee: impl Into<Callee>, arguments: Vec<Operand>, location: Location) -> Self {
        self.apply(ApplyKind::Apply, callee, arguments, location)
    }

    pub fn try_call(
        self,
        callee: impl Into<Callee>,
        arguments: Vec<Operand>,
        location: Location,
    ) -> Self {
        self.apply(ApplyKind::TryApply, callee, arguments, location)
    }

    pub fn apply(
        mut self,
        kind: ApplyKind,
        callee: impl Into<Callee>,
        arguments: Vec<Operand>,
        location: Location,
    ) -> Self {
        self.statements.push(Statement::Apply {
            kind,
            callee: callee.into(),
            arguments,
            location,
        });
        self
    }

    pub fn partial_apply(
        mut self,
        callee: impl Into<Callee>,
        captured: Vec<Operand>,
        location: Location,
    ) -> Self {
        self.statements.push(Statement::PartialApply {
            callee: callee.into(),
            captured,
            location,
        });
        self
    }

    pub fn new(self) -> Body {
        Body {
            statements: self.statements,
        }
    }
}

impl From<Function> for Callee {
    fn from(function: Function) -> Self {
        Callee::Direct(function)
    }
}

use crate::Body;

crate::identifier! {
    /// A unique identifier for a function declared in a [`Module`](crate::Module).
    pub struct Function
}

/// How an argument is passed to a function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentConvention {
    /// The callee receives the address of the caller's storage (`inout`-like).
    Address,
    /// The callee receives its own copy of the value.
    Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgumentDecl {
    pub name: Option<String>,
    pub convention: ArgumentConvention,
}

impl ArgumentDecl {
    pub fn is_address(&self) -> bool {
        self.convention == ArgumentConvention::Address
    }
}

/// A function declaration with its formal arguments and, when its definition
/// is visible, its body.
#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub(crate) name: String,
    pub(crate) arguments: Vec<ArgumentDecl>,
    pub(crate) body: Option<Body>,
}

impl FunctionDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[ArgumentDecl] {
        &self.arguments
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Whether the definition is available for analysis.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

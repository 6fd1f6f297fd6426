use rustc_hash::FxHashMap;

use crate::arena::Arena;
use crate::{
    ArgumentConvention, ArgumentDecl, Body, Callee, Function, FunctionDecl, IrError, Operand,
    Statement,
};

/// A set of functions that may call each other.
#[derive(Clone, Debug, Default)]
pub struct Module {
    functions: Arena<Function, FunctionDecl>,
    names: FxHashMap<String, Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring a new function.
    pub fn function(&mut self) -> FunctionBuilder<'_> {
        FunctionBuilder::from_module(self)
    }

    /// Look up a live function declaration.
    pub fn decl(&self, function: Function) -> Option<&FunctionDecl> {
        self.functions
            .get(function)
            .filter(|item| !item.deleted())
            .map(|item| &**item)
    }

    /// Look up a live function declaration, panicking if it does not exist.
    pub fn expect_decl(&self, function: Function) -> &FunctionDecl {
        self.decl(function).unwrap_or_else(|| {
            panic!("Expected function {function:?} to be declared in the module, but none was found.")
        })
    }

    pub fn function_by_name(&self, name: &str) -> Option<Function> {
        self.names.get(name).copied()
    }

    /// Iterate over all live functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = (Function, &FunctionDecl)> {
        self.functions.iter().map(|(id, item)| (id, &**item))
    }

    /// Replace the body of `function`, validating every operand and callee.
    /// Passing `None` turns the function into an opaque declaration.
    pub fn set_body(&mut self, function: Function, body: Option<Body>) -> Result<(), IrError> {
        let decl = self.decl(function).ok_or(IrError::UnknownFunction(function))?;
        if let Some(body) = &body {
            self.verify_body(decl, body)?;
        }
        self.functions[function].body = body;
        Ok(())
    }

    /// Remove `function` from the module. Existing statements that call it
    /// keep referring to the deleted identifier and become opaque calls.
    pub fn delete_function(&mut self, function: Function) -> Result<(), IrError> {
        let name = self
            .decl(function)
            .ok_or(IrError::UnknownFunction(function))?
            .name
            .clone();
        self.functions.delete(function);
        self.names.remove(&name);
        Ok(())
    }

    fn verify_body(&self, decl: &FunctionDecl, body: &Body) -> Result<(), IrError> {
        for statement in body.statements() {
            for operand in statement.operands() {
                if let Operand::Argument(index) = operand {
                    if index >= decl.argument_count() {
                        return Err(IrError::ArgumentOutOfRange {
                            function: decl.name.clone(),
                            index,
                            count: decl.argument_count(),
                        });
                    }
                }
            }

            match statement {
                Statement::Access { .. } => {}
                Statement::PartialApply {
                    callee: Callee::Direct(callee),
                    captured,
                    ..
                } => {
                    let callee_decl = self.decl(*callee).ok_or(IrError::UnknownFunction(*callee))?;
                    if captured.len() > callee_decl.argument_count() {
                        return Err(IrError::TooManyCaptures {
                            callee: callee_decl.name.clone(),
                            expected: callee_decl.argument_count(),
                            captured: captured.len(),
                        });
                    }
                }
                Statement::Apply {
                    callee: Callee::Direct(callee),
                    arguments,
                    ..
                } => {
                    let callee_decl = self.decl(*callee).ok_or(IrError::UnknownFunction(*callee))?;
                    if arguments.len() != callee_decl.argument_count() {
                        return Err(IrError::ArityMismatch {
                            callee: callee_decl.name.clone(),
                            expected: callee_decl.argument_count(),
                            got: arguments.len(),
                        });
                    }
                }
                Statement::PartialApply { .. } | Statement::Apply { .. } => {}
            }
        }
        Ok(())
    }
}

pub struct FunctionBuilder<'a> {
    module: &'a mut Module,
    name: Option<String>,
    arguments: Vec<ArgumentDecl>,
    body: Option<Body>,
}

impl<'a> FunctionBuilder<'a> {
    pub(crate) fn from_module(module: &'a mut Module) -> Self {
        FunctionBuilder {
            module,
            name: None,
            arguments: Vec::new(),
            body: None,
        }
    }

    /// Set the name of this function. Unnamed functions get a generated name.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an address-type (by-reference) argument.
    pub fn address_argument<S: Into<String>>(mut self, name: S) -> Self {
        self.arguments.push(ArgumentDecl {
            name: Some(name.into()),
            convention: ArgumentConvention::Address,
        });
        self
    }

    /// Add a by-value argument.
    pub fn value_argument<S: Into<String>>(mut self, name: S) -> Self {
        self.arguments.push(ArgumentDecl {
            name: Some(name.into()),
            convention: ArgumentConvention::Value,
        });
        self
    }

    /// Attach a body. Functions that (mutually) call themselves are declared
    /// first and given a body with [`Module::set_body`].
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn new(self) -> Result<Function, IrError> {
        let FunctionBuilder {
            module,
            name,
            arguments,
            body,
        } = self;
        let id = module.functions.next_id();
        let name = name.unwrap_or_else(|| format!("fn{}", crate::Id::from(id).raw()));
        if module.names.contains_key(&name) {
            return Err(IrError::DuplicateFunction(name));
        }

        let decl = FunctionDecl {
            name: name.clone(),
            arguments,
            body: None,
        };
        if let Some(body) = &body {
            module.verify_body(&decl, body)?;
        }

        let function = module.functions.alloc(FunctionDecl { body, ..decl });
        module.names.insert(name, function);
        Ok(function)
    }
}

use smallvec::SmallVec;

use crate::{AccessKind, Callee, Function, FunctionDecl, Location, Module, Operand, Statement};

/// How a single use of a formal argument affects the argument's storage.
///
/// The taxonomy is total: every use of an argument falls into exactly one
/// of these cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentUse {
    /// A formal access of `kind` on the projection `path` of the argument.
    Access {
        kind: AccessKind,
        path: SmallVec<[usize; 4]>,
        location: Location,
    },
    /// The argument is captured by a closure over `callee`, binding the
    /// callee's parameter at index `parameter`.
    Capture {
        callee: Function,
        parameter: usize,
        location: Location,
    },
    /// The argument is passed as actual argument `argument` to `callee`.
    Call {
        callee: Function,
        argument: usize,
        location: Location,
    },
    /// The argument escapes into a call whose target or body is not visible.
    OpaqueCall { location: Location },
}

impl ArgumentUse {
    pub fn location(&self) -> Location {
        match self {
            ArgumentUse::Access { location, .. }
            | ArgumentUse::Capture { location, .. }
            | ArgumentUse::Call { location, .. }
            | ArgumentUse::OpaqueCall { location } => *location,
        }
    }
}

/// Enumerates and classifies the uses of function arguments.
pub trait UseClassifier {
    /// The declaration of `function`, or `None` if it does not exist.
    fn decl(&self, function: Function) -> Option<&FunctionDecl>;

    /// All uses of the formal argument at `argument` in the body of
    /// `function`, in body order. Functions without a body have no uses.
    fn argument_uses(&self, function: Function, argument: usize) -> Vec<ArgumentUse>;
}

impl Module {
    /// Resolve a callee to a function whose body can be analyzed.
    fn analyzable_callee(&self, callee: Callee) -> Option<(Function, &FunctionDecl)> {
        match callee {
            Callee::Direct(function) => self
                .decl(function)
                .filter(|decl| decl.has_body())
                .map(|decl| (function, decl)),
            Callee::Indirect => None,
        }
    }
}

impl UseClassifier for Module {
    fn decl(&self, function: Function) -> Option<&FunctionDecl> {
        Module::decl(self, function)
    }

    fn argument_uses(&self, function: Function, argument: usize) -> Vec<ArgumentUse> {
        let Some(body) = self.decl(function).and_then(FunctionDecl::body) else {
            return Vec::new();
        };
        let this = Operand::Argument(argument);

        let mut uses = Vec::new();
        for statement in body.statements() {
            match statement {
                Statement::Access {
                    source,
                    path,
                    kind,
                    location,
                } => {
                    if *source == this {
                        uses.push(ArgumentUse::Access {
                            kind: *kind,
                            path: path.clone(),
                            location: *location,
                        });
                    }
                }
                Statement::PartialApply {
                    callee,
                    captured,
                    location,
                } => {
                    let target = self.analyzable_callee(*callee);
                    for (position, _) in captured.iter().enumerate().filter(|(_, op)| **op == this) {
                        uses.push(match target {
                            // captured operands bind the trailing parameters
                            Some((callee, decl)) => ArgumentUse::Capture {
                                callee,
                                parameter: decl.argument_count() - captured.len() + position,
                                location: *location,
                            },
                            None => ArgumentUse::OpaqueCall {
                                location: *location,
                            },
                        });
                    }
                }
                Statement::Apply {
                    callee,
                    arguments,
                    location,
                    ..
                } => {
                    let target = self.analyzable_callee(*callee);
                    for (position, _) in arguments.iter().enumerate().filter(|(_, op)| **op == this) {
                        uses.push(match target {
                            Some((callee, _)) => ArgumentUse::Call {
                                callee,
                                argument: position,
                                location: *location,
                            },
                            None => ArgumentUse::OpaqueCall {
                                location: *location,
                            },
                        });
                    }
                }
            }
        }
        uses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Body;

    fn loc(line: u32) -> Location {
        Location::new(line, 1)
    }

    #[test]
    fn test_access_uses_keep_path() {
        let mut module = Module::new();
        let f = module
            .function()
            .name("f")
            .address_argument("x")
            .address_argument("y")
            .body(
                Body::builder()
                    .access(AccessKind::Read, Operand::Argument(0), &[1, 0], loc(1))
                    .modify(1, loc(2))
                    .new(),
            )
            .new()
            .unwrap();

        assert_eq!(
            module.argument_uses(f, 0),
            vec![ArgumentUse::Access {
                kind: AccessKind::Read,
                path: SmallVec::from_slice(&[1, 0]),
                location: loc(1),
            }]
        );
        assert_eq!(module.argument_uses(f, 1).len(), 1);
    }

    #[test]
    fn test_capture_binds_trailing_parameters() {
        let mut module = Module::new();
        let closure = module
            .function()
            .name("closure")
            .value_argument("n")
            .address_argument("a")
            .address_argument("b")
            .body(Body::builder().modify(2, loc(10)).new())
            .new()
            .unwrap();
        let f = module
            .function()
            .name("f")
            .address_argument("x")
            .address_argument("y")
            .body(
                Body::builder()
                    .partial_apply(
                        closure,
                        vec![Operand::Argument(1), Operand::Argument(0)],
                        loc(3),
                    )
                    .new(),
            )
            .new()
            .unwrap();

        assert_eq!(
            module.argument_uses(f, 0),
            vec![ArgumentUse::Capture {
                callee: closure,
                parameter: 2,
                location: loc(3),
            }]
        );
        assert_eq!(
            module.argument_uses(f, 1),
            vec![ArgumentUse::Capture {
                callee: closure,
                parameter: 1,
                location: loc(3),
            }]
        );
    }

    #[test]
    fn test_unresolvable_calls_are_opaque() {
        let mut module = Module::new();
        let external = module.function().name("external").address_argument("p").new().unwrap();
        let f = module
            .function()
            .name("f")
            .address_argument("x")
            .body(
                Body::builder()
                    .call(external, vec![Operand::Argument(0)], loc(1))
                    .call(Callee::Indirect, vec![Operand::Local, Operand::Argument(0)], loc(2))
                    .partial_apply(Callee::Indirect, vec![Operand::Argument(0)], loc(3))
                    .new(),
            )
            .new()
            .unwrap();

        let locations: Vec<_> = module
            .argument_uses(f, 0)
            .into_iter()
            .map(|u| match u {
                ArgumentUse::OpaqueCall { location } => location,
                other => panic!("expected opaque call, got {other:?}"),
            })
            .collect();
        assert_eq!(locations, vec![loc(1), loc(2), loc(3)]);
    }

    #[test]
    fn test_argument_passed_twice_yields_two_uses() {
        let mut module = Module::new();
        let g = module
            .function()
            .name("g")
            .address_argument("a")
            .address_argument("b")
            .body(Body::default())
            .new()
            .unwrap();
        let f = module
            .function()
            .name("f")
            .address_argument("x")
            .body(
                Body::builder()
                    .try_call(g, vec![Operand::Argument(0), Operand::Argument(0)], loc(5))
                    .new(),
            )
            .new()
            .unwrap();

        let arguments: Vec<_> = module
            .argument_uses(f, 0)
            .into_iter()
            .filter_map(|u| match u {
                ArgumentUse::Call { callee, argument, .. } if callee == g => Some(argument),
                _ => None,
            })
            .collect();
        assert_eq!(arguments, vec![0, 1]);
    }

    #[test]
    fn test_declaration_without_body_has_no_uses() {
        let mut module = Module::new();
        let f = module.function().name("f").address_argument("x").new().unwrap();
        assert!(module.argument_uses(f, 0).is_empty());
    }
}

//! Function representation consumed by the access summary analysis.
//!
//! A [`Module`] owns function declarations in an [`Arena`]. Bodies are flat
//! lists of [`Statement`]s; the [`UseClassifier`] trait turns them into the
//! per-argument [`ArgumentUse`] taxonomy the analysis consumes.

mod access;
mod arena;
mod body;
mod error;
mod function;
mod lattice;
mod location;
mod module;
mod uses;

pub use access::AccessKind;
pub use arena::{Arena, Id, Identifier, Item};
pub use body::{ApplyKind, Body, BodyBuilder, Callee, Operand, Statement};
pub use error::IrError;
pub use function::{ArgumentConvention, ArgumentDecl, Function, FunctionDecl};
pub use lattice::Lattice;
pub use location::Location;
pub use module::{FunctionBuilder, Module};
pub use uses::{ArgumentUse, UseClassifier};

pub use smallvec::{self, SmallVec};

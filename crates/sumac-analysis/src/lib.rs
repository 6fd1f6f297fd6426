//! Interprocedural summaries of the formal accesses a function begins on its
//! address-type arguments.
//!
//! [`AccessSummaryAnalysis::get_or_create_summary`] returns, for every
//! argument of a function, the strongest access (`read` or `modify`) the
//! function or anything it calls or captures the argument into performs,
//! with an exemplar location. Summaries are consumed by exclusivity
//! diagnostics for arguments captured by non-escaping closures.

mod analysis;
mod builder;
mod config;
mod fixpoint;
mod info;
mod order;
mod path_trie;
mod summary;

pub use analysis::{AccessSummaryAnalysis, AnalysisStats, InvalidationKind};
pub use config::AnalysisConfig;
pub use info::{AccessRecord, ArgumentFlow, FunctionInfo, FunctionInfoId, InfoState};
pub use path_trie::{PathNode, PathTrie};
pub use summary::{ArgumentSummary, FunctionSummary};

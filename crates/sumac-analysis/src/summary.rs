use std::fmt;

use smallvec::{SmallVec, smallvec};
use sumac_ir::{AccessKind, Lattice, Location};

/// Summarizes the accesses that a function begins on one of its arguments.
///
/// Forms the lattice `none < read < modify`. The location is an exemplar
/// access of the recorded kind and is only meaningful when a kind is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArgumentSummary {
    kind: Option<AccessKind>,
    location: Location,
}

impl ArgumentSummary {
    /// The strongest access observed, or `None` when the argument is never accessed.
    pub fn access_kind(&self) -> Option<AccessKind> {
        self.kind
    }

    /// The exemplar location of the access, if any access was observed.
    pub fn location(&self) -> Option<Location> {
        self.kind.map(|_| self.location)
    }

    pub fn is_bottom(&self) -> bool {
        self.kind.is_none()
    }

    /// Merge in an access of `kind` at `location`. Returns `true` if the
    /// summary changed.
    ///
    /// The first location observed for a kind is kept; a `read` upgraded to
    /// `modify` adopts the location of the modification.
    pub fn merge_with_access(&mut self, kind: AccessKind, location: Location) -> bool {
        let joined = self.kind.join(&Some(kind));
        if joined == self.kind {
            return false;
        }
        // the new kind dominates, so the access is its exemplar
        self.kind = joined;
        self.location = location;
        true
    }

    /// The lattice join. Returns `true` if the summary changed.
    pub fn merge_with(&mut self, other: &ArgumentSummary) -> bool {
        match other.kind {
            Some(kind) => self.merge_with_access(kind, other.location),
            None => false,
        }
    }
}

impl fmt::Display for ArgumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            None => f.write_str("none"),
            Some(kind) => write!(f, "{} @ {}", kind, self.location),
        }
    }
}

/// Summarizes the accesses that a function begins on its arguments, indexed
/// by argument position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionSummary {
    arguments: SmallVec<[ArgumentSummary; 6]>,
}

impl FunctionSummary {
    /// A summary with no accesses for a function taking `argument_count` arguments.
    pub fn new(argument_count: usize) -> Self {
        Self {
            arguments: smallvec![ArgumentSummary::default(); argument_count],
        }
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    /// The summary of the argument at `argument`. Panics when out of range.
    pub fn access_for_argument(&self, argument: usize) -> &ArgumentSummary {
        self.arguments.get(argument).unwrap_or_else(|| {
            panic!(
                "argument index {argument} out of range for summary of {} arguments",
                self.arguments.len()
            )
        })
    }

    pub(crate) fn access_for_argument_mut(&mut self, argument: usize) -> &mut ArgumentSummary {
        let count = self.arguments.len();
        self.arguments.get_mut(argument).unwrap_or_else(|| {
            panic!("argument index {argument} out of range for summary of {count} arguments")
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArgumentSummary> {
        self.arguments.iter()
    }
}

impl std::ops::Index<usize> for FunctionSummary {
    type Output = ArgumentSummary;

    fn index(&self, argument: usize) -> &Self::Output {
        self.access_for_argument(argument)
    }
}

/// One line per argument: `none`, `read @ <loc>` or `modify @ <loc>`.
impl fmt::Display for FunctionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{argument}")?;
        }
        Ok(())
    }
}

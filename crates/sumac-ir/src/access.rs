use std::fmt;

use crate::Lattice;

/// The kind of formal access a function begins on an address.
///
/// `Modify` dominates `Read`. The absence of any access is modelled as
/// `Option::<AccessKind>::None` rather than as a third variant.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessKind {
    Read,
    Modify,
}

impl AccessKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessKind::Read => "read",
            AccessKind::Modify => "modify",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Lattice for AccessKind {
    fn join(&self, other: &Self) -> Self {
        (*self).max(*other)
    }

    fn meet(&self, other: &Self) -> Self {
        (*self).min(*other)
    }

    fn is_subseteq(&self, other: &Self) -> bool {
        self <= other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modify_dominates_read() {
        assert_eq!(AccessKind::Read.join(&AccessKind::Modify), AccessKind::Modify);
        assert_eq!(AccessKind::Modify.join(&AccessKind::Read), AccessKind::Modify);
        assert_eq!(AccessKind::Read.meet(&AccessKind::Modify), AccessKind::Read);
        assert!(AccessKind::Read.is_subseteq(&AccessKind::Modify));
        assert!(!AccessKind::Modify.is_subseteq(&AccessKind::Read));
    }

    #[test]
    fn test_lifted_bottom() {
        let bottom: Option<AccessKind> = None;
        assert_eq!(bottom.join(&Some(AccessKind::Read)), Some(AccessKind::Read));
        assert_eq!(bottom.meet(&Some(AccessKind::Modify)), None);
        assert!(bottom.is_subseteq(&Some(AccessKind::Read)));
        assert!(!Some(AccessKind::Read).is_subseteq(&bottom));
    }
}

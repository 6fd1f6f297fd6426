use std::hash::Hash;

/// Arena ID
/// an ID object can only be created by
/// `arena.next_id()` or `arena.alloc`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Id(pub(crate) usize);

impl Id {
    /// return raw ID as usize
    pub fn raw(self) -> usize {
        self.0
    }
}

pub trait Identifier:
    Sized + Clone + Copy + Hash + Ord + std::fmt::Debug + PartialEq + Eq + From<Id> + Into<Id>
{
}

/// Declare a typed arena handle.
///
/// The generated newtype can only be obtained from an [`Arena`](crate::Arena)
/// that stores items under it.
#[macro_export]
macro_rules! identifier {
    ($(#[$attr:meta])* $vis:vis struct $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
        $vis struct $name($crate::Id);

        impl From<$crate::Id> for $name {
            fn from(value: $crate::Id) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $crate::Id {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl $crate::Identifier for $name {}
    };
}

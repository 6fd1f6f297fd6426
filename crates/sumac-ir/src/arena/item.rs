/// A slot of an [`Arena`](crate::Arena): the stored value and whether it
/// has been deleted. Deleted slots keep their value but are skipped by
/// iteration and by [`Module`](crate::Module) lookups.
#[derive(Debug, Clone)]
pub struct Item<T> {
    pub(super) deleted: bool,
    pub(super) data: T,
}

#[bon::bon]
impl<T> Item<T> {
    #[builder]
    pub fn new(data: T, deleted: Option<bool>) -> Self {
        Self {
            data,
            deleted: deleted.unwrap_or(false),
        }
    }
}

impl<T> Item<T> {
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Mark the slot deleted. Returns `false` if it already was.
    pub(super) fn mark_deleted(&mut self) -> bool {
        !std::mem::replace(&mut self.deleted, true)
    }
}

impl<T> std::ops::Deref for Item<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> std::ops::DerefMut for Item<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

use super::id::{Id, Identifier};
use super::item::Item;

#[derive(Debug, Clone)]
pub struct Arena<I: Identifier, T> {
    pub(super) items: Vec<Item<T>>,
    marker: std::marker::PhantomData<I>,
}

impl<I: Identifier, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            marker: std::marker::PhantomData,
        }
    }
}

impl<I: Identifier, T> Arena<I, T> {
    pub fn next_id(&self) -> I {
        I::from(Id(self.items.len()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocate a new item in the arena and return its identifier.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(Item::builder().data(item).deleted(false).build());
        id
    }

    pub fn get(&self, id: impl Into<I>) -> Option<&Item<T>> {
        self.items.get(id.into().into().raw())
    }

    pub fn get_mut(&mut self, id: impl Into<I>) -> Option<&mut Item<T>> {
        self.items.get_mut(id.into().into().raw())
    }

    /// Mark an item as deleted. Identifiers are never reused, so a deleted
    /// slot keeps its position until the arena is cleared.
    pub fn delete(&mut self, id: impl Into<I>) -> bool {
        self.get_mut(id).is_some_and(Item::mark_deleted)
    }

    /// Drop every item, invalidating all identifiers handed out so far.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (I, &Item<T>)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, arena_item)| !arena_item.deleted)
            .map(|(idx, arena_item)| (I::from(Id(idx)), arena_item))
    }
}

impl<T, I: Identifier> std::ops::Index<I> for Arena<I, T> {
    type Output = Item<T>;

    fn index(&self, index: I) -> &Self::Output {
        &self.items[index.into().raw()]
    }
}

impl<T, I: Identifier> std::ops::IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.items[index.into().raw()]
    }
}

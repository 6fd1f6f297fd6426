mod data;
mod id;
mod item;

pub use data::Arena;
pub use id::{Id, Identifier};
pub use item::Item;

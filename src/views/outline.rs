//! `Outline`: an `ItemList` over [`IndicesKind`], a list
//! view that tracks only *presence*, with no payload at all. Useful for a
//! CRDT layer that needs list order and indices (e.g. a move/outline
//! structure keyed purely by position) without carrying values itself.

use smartstring::alias::String as SmartString;

use crate::error::Error;
use crate::item_list::{Bind, ItemList, SearchDir};
use crate::order::{BunchMeta, Order};
use crate::position::Position;
use crate::sparse::indices::IndicesKind;
use crate::sparse::SerializedRun;

/// An ordered sequence of present/absent slots, indexed by `Position`, with
/// no associated value.
#[derive(Debug, Default)]
pub struct Outline {
    items: ItemList<IndicesKind>,
}

impl Outline {
    pub fn new() -> Self {
        Outline { items: ItemList::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts `count` new present slots starting at list index `i`,
    /// returning the first's `Position` (use [`crate::expand_positions`] for
    /// the rest) and, if a new bunch was allocated, its metadata.
    pub fn insert_at(
        &mut self,
        order: &mut Order,
        i: usize,
        count: u32,
    ) -> Result<(Position, Option<BunchMeta>), Error> {
        self.items.insert_at(order, i, count as usize)
    }

    pub fn set(&mut self, order: &Order, pos: &Position) -> Result<(), Error> {
        self.items.set(order, pos, 1)?;
        Ok(())
    }

    pub fn delete(&mut self, order: &Order, pos: &Position, count: usize) -> Result<(), Error> {
        self.items.delete(order, pos, count)?;
        Ok(())
    }

    pub fn delete_at(&mut self, order: &Order, i: usize, count: usize) -> Result<(), Error> {
        self.items.delete_at(order, i, count)
    }

    pub fn has(&self, pos: &Position) -> bool {
        self.items.has(pos)
    }

    pub fn position_at(&self, order: &Order, i: usize) -> Result<Position, Error> {
        self.items.position_at(order, i)
    }

    pub fn index_of_position(
        &self,
        order: &Order,
        pos: &Position,
        dir: SearchDir,
    ) -> Result<Option<usize>, Error> {
        self.items.index_of_position(order, pos, dir)
    }

    pub fn find(&self, order: &Order, pos: &Position) -> Result<Option<usize>, Error> {
        self.items.find_position(order, pos)
    }

    pub fn cursor_at(&self, order: &Order, i: usize, bind: Bind) -> Result<Position, Error> {
        self.items.cursor_at(order, i, bind)
    }

    pub fn index_of_cursor(&self, order: &Order, pos: &Position, bind: Bind) -> Result<usize, Error> {
        self.items.index_of_cursor(order, pos, bind)
    }

    pub fn positions(&self, order: &Order) -> Result<Vec<Position>, Error> {
        self.items.positions(order)
    }

    pub fn dependencies(&self, order: &Order) -> Vec<BunchMeta> {
        self.items.dependencies(order)
    }

    pub fn save(&self) -> Vec<(SmartString, Vec<SerializedRun<usize>>)> {
        self.items.save()
    }

    pub fn load(&mut self, order: &Order, data: Vec<(SmartString, Vec<SerializedRun<usize>>)>) -> Result<(), Error> {
        self.items.load(order, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_positions() {
        let mut order = Order::new("alice").unwrap();
        let mut outline = Outline::new();
        for i in 0..5 {
            outline.insert_at(&mut order, i, 1).unwrap();
        }
        assert_eq!(outline.len(), 5);
        let positions = outline.positions(&order).unwrap();
        assert_eq!(positions.len(), 5);
        for (i, p) in positions.iter().enumerate() {
            assert_eq!(outline.index_of_position(&order, p, SearchDir::None).unwrap(), Some(i));
        }
    }

    #[test]
    fn delete_shrinks_len() {
        let mut order = Order::new("alice").unwrap();
        let mut outline = Outline::new();
        outline.insert_at(&mut order, 0, 3).unwrap();
        outline.delete_at(&order, 1, 1).unwrap();
        assert_eq!(outline.len(), 2);
    }
}

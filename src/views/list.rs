//! `List<T>`: an `ItemList` over [`ValuesKind<T>`], the
//! generic-array instantiation of the sparse item array.

use smartstring::alias::String as SmartString;

use crate::error::Error;
use crate::item_list::{Bind, ItemList, SearchDir};
use crate::order::{BunchMeta, Order};
use crate::position::Position;
use crate::sparse::values::ValuesKind;
use crate::sparse::SerializedRun;

/// An ordered sequence of `T` values, indexed by `Position`.
#[derive(Debug)]
pub struct List<T: Clone + std::fmt::Debug + PartialEq> {
    items: ItemList<ValuesKind<T>>,
}

impl<T: Clone + std::fmt::Debug + PartialEq> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + std::fmt::Debug + PartialEq> List<T> {
    pub fn new() -> Self {
        List { items: ItemList::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts a single value at list index `i`.
    pub fn insert(&mut self, order: &mut Order, i: usize, value: T) -> Result<Position, Error> {
        let (pos, _meta) = self.items.insert_at(order, i, vec![value])?;
        Ok(pos)
    }

    /// Inserts `values` as a contiguous batch starting at list index `i`,
    /// returning the first value's `Position` (use [`crate::expand_positions`]
    /// for the rest) and, if a new bunch was allocated, its metadata.
    pub fn insert_at(
        &mut self,
        order: &mut Order,
        i: usize,
        values: Vec<T>,
    ) -> Result<(Position, Option<BunchMeta>), Error> {
        self.items.insert_at(order, i, values)
    }

    pub fn set(&mut self, order: &Order, pos: &Position, value: T) -> Result<(), Error> {
        self.items.set(order, pos, vec![value])?;
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

    pub fn get(&self, pos: &Position) -> Option<T> {
        self.items.get(pos).map(|mut v| v.remove(0))
    }

    pub fn get_at(&self, order: &Order, i: usize) -> Result<T, Error> {
        Ok(self.items.get_at(order, i)?.remove(0))
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

    pub fn values(&self, order: &Order) -> Result<Vec<T>, Error> {
        Ok(self.items.entries(order)?.into_iter().map(|(_, mut v)| v.remove(0)).collect())
    }

    pub fn items(&self, order: &Order) -> Result<Vec<(Position, T)>, Error> {
        Ok(self.items.entries(order)?.into_iter().map(|(p, mut v)| (p, v.remove(0))).collect())
    }

    pub fn slice(&self, order: &Order, start: usize, end: usize) -> Result<Vec<T>, Error> {
        Ok(self.items.slice(order, start, end)?.into_iter().map(|(_, mut v)| v.remove(0)).collect())
    }

    pub fn dependencies(&self, order: &Order) -> Vec<BunchMeta> {
        self.items.dependencies(order)
    }

    pub fn save(&self) -> Vec<(SmartString, Vec<SerializedRun<Vec<T>>>)> {
        self.items.save()
    }

    pub fn load(&mut self, order: &Order, data: Vec<(SmartString, Vec<SerializedRun<Vec<T>>>)>) -> Result<(), Error> {
        self.items.load(order, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_delete_round_trip() {
        let mut order = Order::new("alice").unwrap();
        let mut list: List<i32> = List::new();
        for (i, v) in [1, 2, 3, 4, 5].into_iter().enumerate() {
            list.insert(&mut order, i, v).unwrap();
        }
        assert_eq!(list.values(&order).unwrap(), vec![1, 2, 3, 4, 5]);
        list.delete_at(&order, 1, 2).unwrap();
        assert_eq!(list.values(&order).unwrap(), vec![1, 4, 5]);
    }

    #[test]
    fn batch_insert_shares_one_bunch() {
        let mut order = Order::new("alice").unwrap();
        let mut list: List<char> = List::new();
        let (start, meta) = list.insert_at(&mut order, 0, vec!['a', 'b', 'c']).unwrap();
        assert!(meta.is_some());
        let expanded = crate::expand_positions(&start, 3);
        assert_eq!(list.get(&expanded[0]), Some('a'));
        assert_eq!(list.get(&expanded[1]), Some('b'));
        assert_eq!(list.get(&expanded[2]), Some('c'));
        assert_eq!(list.values(&order).unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn save_load_preserves_values_and_order() {
        let mut order = Order::new("alice").unwrap();
        let mut list: List<i32> = List::new();
        for i in 0..20 {
            list.insert(&mut order, i, i as i32).unwrap();
        }
        let saved = list.save();
        let mut loaded: List<i32> = List::new();
        loaded.load(&order, saved).unwrap();
        assert_eq!(loaded.values(&order).unwrap(), list.values(&order).unwrap());
    }
}

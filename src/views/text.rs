//! `Text`: an `ItemList` over [`TextKind`], a collaborative
//! string where each `Position` names one `char`.

use smartstring::alias::String as SmartString;

use crate::error::Error;
use crate::item_list::{Bind, ItemList, SearchDir};
use crate::order::{BunchMeta, Order};
use crate::position::Position;
use crate::sparse::text::TextKind;
use crate::sparse::SerializedRun;

/// A collaborative string, indexed by `Position` per `char`.
#[derive(Debug, Default)]
pub struct Text {
    items: ItemList<TextKind>,
}

impl Text {
    pub fn new() -> Self {
        Text { items: ItemList::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts a single `char` at list index `i`.
    pub fn insert(&mut self, order: &mut Order, i: usize, ch: char) -> Result<Position, Error> {
        let (pos, _meta) = self.items.insert_at(order, i, ch.to_string())?;
        Ok(pos)
    }

    /// Inserts `s` as a contiguous run of chars starting at list index `i`,
    /// returning the first char's `Position` (use [`crate::expand_positions`]
    /// for the rest) and, if a new bunch was allocated, its metadata.
    pub fn insert_str(
        &mut self,
        order: &mut Order,
        i: usize,
        s: &str,
    ) -> Result<(Position, Option<BunchMeta>), Error> {
        self.items.insert_at(order, i, s.to_string())
    }

    pub fn set(&mut self, order: &Order, pos: &Position, ch: char) -> Result<(), Error> {
        self.items.set(order, pos, ch.to_string())?;
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

    pub fn get(&self, pos: &Position) -> Option<char> {
        self.items.get(pos)?.chars().next()
    }

    pub fn get_at(&self, order: &Order, i: usize) -> Result<char, Error> {
        self.items
            .get_at(order, i)?
            .chars()
            .next()
            .ok_or(Error::RangeOutOfBounds { index: i, len: self.len() })
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

    /// The text content, in list order.
    pub fn to_string(&self, order: &Order) -> Result<String, Error> {
        Ok(self.items.entries(order)?.into_iter().map(|(_, ch)| ch).collect())
    }

    pub fn slice(&self, order: &Order, start: usize, end: usize) -> Result<String, Error> {
        Ok(self.items.slice(order, start, end)?.into_iter().map(|(_, ch)| ch).collect())
    }

    pub fn dependencies(&self, order: &Order) -> Vec<BunchMeta> {
        self.items.dependencies(order)
    }

    pub fn save(&self) -> Vec<(SmartString, Vec<SerializedRun<String>>)> {
        self.items.save()
    }

    pub fn load(&mut self, order: &Order, data: Vec<(SmartString, Vec<SerializedRun<String>>)>) -> Result<(), Error> {
        self.items.load(order, data)
    }
}

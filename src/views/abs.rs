//! `AbsList<T>`/`LexList<T>`: the self-contained surface that needs no
//! externally-shared `Order`: each instance owns its own `Order` outright,
//! so `save()` embeds the `Order`'s saved state alongside the list's, and
//! `load()` reconstructs both from nothing but that blob.
//!
//! `LexList` is the same thing with the public boundary speaking lex strings
//! instead of `AbsolutePosition`, for callers that want a
//! plain, orderable `String` key (e.g. to store positions in an external
//! sorted index) rather than the structured form.

use std::fmt;

use smartstring::alias::String as SmartString;

use crate::error::Error;
use crate::item_list::SearchDir;
use crate::order::{Order, OrderSavedState};
use crate::position::AbsolutePosition;
use crate::sparse::SerializedRun;
use crate::views::list::List;

/// `AbsList::save()`'s output: an `Order`'s full bunch tree plus the list's
/// own per-bunch runs, sufficient to reconstruct the list from scratch.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct AbsListSavedState<T> {
    pub replica: SmartString,
    pub order: OrderSavedState,
    pub items: Vec<(SmartString, Vec<SerializedRun<Vec<T>>>)>,
}

/// A `List<T>` that owns its `Order`, so it never needs one supplied
/// separately and its saved state is fully self-describing.
#[derive(Debug)]
pub struct AbsList<T: Clone + fmt::Debug + PartialEq> {
    order: Order,
    list: List<T>,
}

impl<T: Clone + fmt::Debug + PartialEq> AbsList<T> {
    pub fn new(replica: impl Into<SmartString>) -> Result<Self, Error> {
        Ok(AbsList { order: Order::new(replica)?, list: List::new() })
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn insert(&mut self, i: usize, value: T) -> Result<AbsolutePosition, Error> {
        let pos = self.list.insert(&mut self.order, i, value)?;
        self.order.abs(&pos)
    }

    /// Inserts `values` as a contiguous batch starting at list index `i`,
    /// returning the first's absolute position.
    pub fn insert_at(&mut self, i: usize, values: Vec<T>) -> Result<AbsolutePosition, Error> {
        let (pos, _meta) = self.list.insert_at(&mut self.order, i, values)?;
        self.order.abs(&pos)
    }

    pub fn set(&mut self, pos: &AbsolutePosition, value: T) -> Result<(), Error> {
        let p = self.order.unabs(pos)?;
        self.list.set(&self.order, &p, value)?;
        Ok(())
    }

    pub fn delete(&mut self, pos: &AbsolutePosition, count: usize) -> Result<(), Error> {
        let p = self.order.unabs(pos)?;
        self.list.delete(&self.order, &p, count)?;
        Ok(())
    }

    pub fn delete_at(&mut self, i: usize, count: usize) -> Result<(), Error> {
        self.list.delete_at(&self.order, i, count)
    }

    pub fn get(&self, pos: &AbsolutePosition) -> Option<T> {
        self.list.get(&pos.to_position())
    }

    pub fn get_at(&self, i: usize) -> Result<T, Error> {
        self.list.get_at(&self.order, i)
    }

    pub fn position_at(&self, i: usize) -> Result<AbsolutePosition, Error> {
        let p = self.list.position_at(&self.order, i)?;
        self.order.abs(&p)
    }

    pub fn index_of_position(
        &mut self,
        pos: &AbsolutePosition,
        dir: SearchDir,
    ) -> Result<Option<usize>, Error> {
        let p = self.order.unabs(pos)?;
        self.list.index_of_position(&self.order, &p, dir)
    }

    pub fn values(&self) -> Result<Vec<T>, Error> {
        self.list.values(&self.order)
    }

    pub fn save(&self) -> AbsListSavedState<T> {
        AbsListSavedState {
            replica: SmartString::from(self.order.replica()),
            order: self.order.save(),
            items: self.list.save(),
        }
    }

    /// Rebuilds an `AbsList` from a previously-`save`d blob. There is no
    /// prior `Order` to pass in; the saved bunch tree is enough.
    pub fn load(data: AbsListSavedState<T>) -> Result<Self, Error> {
        let mut order = Order::new(data.replica)?;
        order.load(data.order)?;
        let mut list = List::new();
        list.load(&order, data.items)?;
        Ok(AbsList { order, list })
    }
}

/// `AbsList<T>` with a lex-string public boundary instead of
/// `AbsolutePosition`: useful when callers want a plain, totally-ordered
/// `String` key rather than the structured form, e.g. to use positions
/// directly as sorted-index keys in an external store.
#[derive(Debug)]
pub struct LexList<T: Clone + fmt::Debug + PartialEq>(AbsList<T>);

impl<T: Clone + fmt::Debug + PartialEq> LexList<T> {
    pub fn new(replica: impl Into<SmartString>) -> Result<Self, Error> {
        Ok(LexList(AbsList::new(replica)?))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, i: usize, value: T) -> Result<String, Error> {
        Ok(crate::lex::encode(&self.0.insert(i, value)?))
    }

    pub fn insert_at(&mut self, i: usize, values: Vec<T>) -> Result<String, Error> {
        Ok(crate::lex::encode(&self.0.insert_at(i, values)?))
    }

    pub fn set(&mut self, lex: &str, value: T) -> Result<(), Error> {
        let abs = crate::lex::parse(lex)?;
        self.0.set(&abs, value)
    }

    pub fn delete(&mut self, lex: &str, count: usize) -> Result<(), Error> {
        let abs = crate::lex::parse(lex)?;
        self.0.delete(&abs, count)
    }

    pub fn delete_at(&mut self, i: usize, count: usize) -> Result<(), Error> {
        self.0.delete_at(i, count)
    }

    pub fn get(&self, lex: &str) -> Result<Option<T>, Error> {
        let abs = crate::lex::parse(lex)?;
        Ok(self.0.get(&abs))
    }

    pub fn get_at(&self, i: usize) -> Result<T, Error> {
        self.0.get_at(i)
    }

    pub fn position_at(&self, i: usize) -> Result<String, Error> {
        Ok(crate::lex::encode(&self.0.position_at(i)?))
    }

    pub fn index_of_position(&mut self, lex: &str, dir: SearchDir) -> Result<Option<usize>, Error> {
        let abs = crate::lex::parse(lex)?;
        self.0.index_of_position(&abs, dir)
    }

    pub fn values(&self) -> Result<Vec<T>, Error> {
        self.0.values()
    }

    pub fn save(&self) -> AbsListSavedState<T> {
        self.0.save()
    }

    pub fn load(data: AbsListSavedState<T>) -> Result<Self, Error> {
        Ok(LexList(AbsList::load(data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_list_round_trips_through_positions() {
        let mut list: AbsList<char> = AbsList::new("alice").unwrap();
        let mut positions = Vec::new();
        for (i, ch) in "hello".chars().enumerate() {
            positions.push(list.insert(i, ch).unwrap());
        }
        assert_eq!(list.values().unwrap(), vec!['h', 'e', 'l', 'l', 'o']);
        for (i, pos) in positions.iter().enumerate() {
            assert_eq!(list.get(pos), Some("hello".chars().nth(i).unwrap()));
        }
    }

    #[test]
    fn abs_list_save_load_needs_no_prior_order() {
        let mut list: AbsList<i32> = AbsList::new("alice").unwrap();
        for i in 0..10 {
            list.insert(i, i as i32).unwrap();
        }
        let saved = list.save();
        let loaded: AbsList<i32> = AbsList::load(saved).unwrap();
        assert_eq!(loaded.values().unwrap(), list.values().unwrap());
    }

    #[test]
    fn lex_list_positions_sort_like_list_order() {
        let mut list: LexList<char> = LexList::new("alice").unwrap();
        let a = list.insert(0, 'a').unwrap();
        let c = list.insert(1, 'c').unwrap();
        let b = list.insert(1, 'b').unwrap();
        let mut lexes = vec![a.clone(), b.clone(), c.clone()];
        lexes.sort();
        assert_eq!(lexes, vec![a, b, c]);
        assert_eq!(list.values().unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn lex_list_save_load_round_trips() {
        let mut list: LexList<i32> = LexList::new("alice").unwrap();
        for i in 0..5 {
            list.insert(i, i as i32).unwrap();
        }
        let saved = list.save();
        let loaded: LexList<i32> = LexList::load(saved).unwrap();
        assert_eq!(loaded.values().unwrap(), list.values().unwrap());
    }
}

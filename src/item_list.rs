//! `ItemList`: the per-bunch sparse-array index backing the
//! `List`/`Outline`/`Text` views. Maintains the `index <-> Position`
//! bijection over an [`Order`]'s bunch tree in expected `O(log n)` by
//! caching, per known bunch, the total present-item count of its subtree
//! and refreshing that cache up the ancestor chain after every edit.
//!
//! `ItemList` does not store an `&Order` itself. Instead every method that
//! needs to consult the bunch tree takes `&Order`/`&mut Order` as an
//! explicit parameter rather than closing over shared state.

use std::collections::{HashMap, HashSet};
use std::fmt;

use smartstring::alias::String as SmartString;

use crate::bunch_id::ROOT_BUNCH_ID;
use crate::error::Error;
use crate::order::{BunchMeta, Order};
use crate::position::Position;
use crate::sparse::{ItemKind, SerializedRun, SparseArray};

/// How [`ItemList::index_of_position`] should resolve a position that isn't
/// currently present.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchDir {
    /// Absent positions resolve to `None`.
    None,
    /// Absent positions resolve to the index of the nearest present item to
    /// their left, or `None` if nothing present precedes them.
    Left,
    /// Absent positions resolve to the index they would occupy if inserted
    /// (i.e. the index of the nearest present item to their right, or the
    /// list length if nothing present follows).
    Right,
}

/// Which side of a list-index gap a [`Cursor`] is anchored to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bind {
    /// The cursor names the position immediately to the left of the gap
    /// (`Position::min()` if the gap is at index 0).
    Left,
    /// The cursor names the position immediately to the right of the gap
    /// (`Position::max()` if the gap is at the end of the list).
    Right,
}

/// One maximal run of a bunch's local linear order that isn't interrupted by
/// a child bunch: either a contiguous span of present own-slots, or a single
/// child subtree. Produced by [`ItemList::segments`] in ascending local
/// offset order; the splitting logic is what keeps `position_at`/`rank`/
/// traversal correct when a child bunch was inserted in the middle of what
/// the sparse array would otherwise see as one present run.
enum Segment {
    Own { start: usize, len: usize },
    Child(SmartString),
}

/// The list-index <-> `Position` index for one sparse-array kind `K`. Shared
/// machinery behind [`crate::views::list::List`], [`crate::views::outline::Outline`],
/// and [`crate::views::text::Text`].
pub struct ItemList<K: ItemKind> {
    arrays: HashMap<SmartString, SparseArray<K>>,
    /// `bunch_id -> total present count in the subtree rooted at that
    /// bunch`. Entries are created lazily; a bunch with no entry is treated
    /// as count 0, which is always correct for a bunch this `ItemList` has
    /// never touched (bunches start empty and are never deleted).
    subtree_count: HashMap<SmartString, usize>,
}

impl<K: ItemKind> Default for ItemList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ItemKind> ItemList<K> {
    pub fn new() -> Self {
        ItemList { arrays: HashMap::new(), subtree_count: HashMap::new() }
    }

    /// Total number of present positions known to this `ItemList`.
    pub fn len(&self) -> usize {
        self.subtree_count.get(ROOT_BUNCH_ID).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn own_count(&self, bunch_id: &str) -> usize {
        self.arrays.get(bunch_id).map(SparseArray::count_present).unwrap_or(0)
    }

    /// Recomputes `subtree_count[bunch_id]` from its own present count plus
    /// its children's *already-cached* subtree counts.
    fn refresh_node(&mut self, order: &Order, bunch_id: &str) -> Result<(), Error> {
        let children = order.children(bunch_id)?;
        let mut total = self.own_count(bunch_id);
        for (_, child_id) in &children {
            total += self.subtree_count.get(child_id.as_str()).copied().unwrap_or(0);
        }
        self.subtree_count.insert(SmartString::from(bunch_id), total);
        Ok(())
    }

    /// Refreshes `bunch_id` and every ancestor up to and including ROOT,
    /// after a `set`/`delete` touched `bunch_id`'s own array.
    fn propagate(&mut self, order: &Order, bunch_id: &str) -> Result<(), Error> {
        self.refresh_node(order, bunch_id)?;
        let mut cur = SmartString::from(bunch_id);
        while let Some(parent) = order.parent(&cur)? {
            self.refresh_node(order, &parent)?;
            cur = parent;
        }
        Ok(())
    }

    /// Splits `bunch_id`'s local linear order into disjoint,
    /// ascending-offset [`Segment`]s. A present run from the sparse array is
    /// cut short wherever a child bunch's offset falls strictly inside its
    /// span, so no segment here straddles a child.
    fn segments(&self, order: &Order, bunch_id: &str) -> Result<Vec<Segment>, Error> {
        let children = order.children(bunch_id)?;
        let runs: Vec<(usize, usize)> = match self.arrays.get(bunch_id) {
            Some(a) => a.entries().map(|(start, item)| (start, K::length(item))).collect(),
            None => Vec::new(),
        };

        let mut out = Vec::new();
        let mut child_idx = 0usize;
        let mut run_idx = 0usize;
        let mut cur_run = runs.first().copied();

        loop {
            let next_child_offset = children.get(child_idx).map(|(o, _)| *o);
            match cur_run {
                None => match next_child_offset {
                    None => break,
                    Some(_) => {
                        out.push(Segment::Child(children[child_idx].1.clone()));
                        child_idx += 1;
                    }
                },
                Some((start, len)) => {
                    let run_offset = 2 * start as u32 + 1;
                    let take_child_first =
                        matches!(next_child_offset, Some(co) if co < run_offset);
                    if take_child_first {
                        out.push(Segment::Child(children[child_idx].1.clone()));
                        child_idx += 1;
                    } else {
                        let take = match next_child_offset {
                            Some(co) => {
                                let boundary_k = (co / 2) as usize;
                                len.min(boundary_k.saturating_sub(start))
                            }
                            None => len,
                        };
                        out.push(Segment::Own { start, len: take });
                        if take == len {
                            run_idx += 1;
                            cur_run = runs.get(run_idx).copied();
                        } else {
                            cur_run = Some((start + take, len - take));
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// `ItemList.positionAt(i)`.
    pub fn position_at(&self, order: &Order, index: usize) -> Result<Position, Error> {
        let len = self.len();
        if index >= len {
            return Err(Error::RangeOutOfBounds { index, len });
        }
        self.position_at_in(order, ROOT_BUNCH_ID, index)
    }

    fn position_at_in(
        &self,
        order: &Order,
        bunch_id: &str,
        mut remaining: usize,
    ) -> Result<Position, Error> {
        for seg in self.segments(order, bunch_id)? {
            match seg {
                Segment::Child(child_id) => {
                    let count = self.subtree_count.get(child_id.as_str()).copied().unwrap_or(0);
                    if remaining < count {
                        return self.position_at_in(order, &child_id, remaining);
                    }
                    remaining -= count;
                }
                Segment::Own { start, len } => {
                    if remaining < len {
                        return Ok(Position::new(SmartString::from(bunch_id), (start + remaining) as u32));
                    }
                    remaining -= len;
                }
            }
        }
        Err(Error::RangeOutOfBounds { index: remaining, len: 0 })
    }

    /// Count of present positions in `bunch_id`'s subtree whose local offset
    /// is `< target_offset` (and, for an exact-offset tie at a child bunch,
    /// `< target_id` by `bunch_id` ascending).
    fn rank_in_bunch(
        &self,
        order: &Order,
        bunch_id: &str,
        target_offset: u32,
        target_id: Option<&str>,
    ) -> Result<usize, Error> {
        let mut total = 0;
        for seg in self.segments(order, bunch_id)? {
            match seg {
                Segment::Child(child_id) => {
                    let offset = order.offset(&child_id)?;
                    let before = offset < target_offset
                        || (offset == target_offset
                            && target_id.map_or(false, |tid| child_id.as_str() < tid));
                    if before {
                        total += self.subtree_count.get(child_id.as_str()).copied().unwrap_or(0);
                    } else {
                        break;
                    }
                }
                Segment::Own { start, len } => {
                    let seg_start_offset = 2 * start as u32 + 1;
                    let seg_end_offset = 2 * (start + len - 1) as u32 + 1;
                    if seg_end_offset < target_offset {
                        total += len;
                    } else if seg_start_offset > target_offset {
                        break;
                    } else {
                        let partial = (target_offset as usize).saturating_sub(seg_start_offset as usize) / 2;
                        total += partial.min(len);
                        break;
                    }
                }
            }
        }
        Ok(total)
    }

    /// Number of present positions strictly less than `pos`, regardless of
    /// whether `pos` itself is present.
    fn rank(&self, order: &Order, pos: &Position) -> Result<usize, Error> {
        if !order.has_bunch(&pos.bunch_id) {
            return Err(Error::MissingMetadata(pos.bunch_id.clone()));
        }
        let mut total = self.rank_in_bunch(order, &pos.bunch_id, 2 * pos.inner_index + 1, None)?;
        let mut cur = pos.bunch_id.clone();
        while let Some(parent) = order.parent(&cur)? {
            let my_offset = order.offset(&cur)?;
            total += self.rank_in_bunch(order, &parent, my_offset, Some(&cur))?;
            cur = parent;
        }
        Ok(total)
    }

    /// `ItemList.indexOfPosition(p, searchDir)`.
    pub fn index_of_position(
        &self,
        order: &Order,
        pos: &Position,
        dir: SearchDir,
    ) -> Result<Option<usize>, Error> {
        let rank = self.rank(order, pos)?;
        if self.has(pos) {
            return Ok(Some(rank));
        }
        Ok(match dir {
            SearchDir::None => None,
            SearchDir::Right => Some(rank),
            SearchDir::Left => {
                if rank == 0 {
                    None
                } else {
                    Some(rank - 1)
                }
            }
        })
    }

    /// Convenience alias for `index_of_position(pos, SearchDir::None)`,
    /// `None`-friendly since there's no `-1` sentinel that fits `usize`.
    pub fn find_position(&self, order: &Order, pos: &Position) -> Result<Option<usize>, Error> {
        self.index_of_position(order, pos, SearchDir::None)
    }

    /// `ItemList.cursorAt(i, bind)`.
    pub fn cursor_at(&self, order: &Order, i: usize, bind: Bind) -> Result<Position, Error> {
        let len = self.len();
        if i > len {
            return Err(Error::RangeOutOfBounds { index: i, len });
        }
        match bind {
            Bind::Left => {
                if i == 0 {
                    Ok(Position::min())
                } else {
                    self.position_at(order, i - 1)
                }
            }
            Bind::Right => {
                if i == len {
                    Ok(Position::max())
                } else {
                    self.position_at(order, i)
                }
            }
        }
    }

    /// `ItemList.indexOfCursor`: the inverse of
    /// [`cursor_at`](Self::cursor_at).
    pub fn index_of_cursor(&self, order: &Order, pos: &Position, bind: Bind) -> Result<usize, Error> {
        match bind {
            Bind::Left => {
                if pos.is_min() {
                    Ok(0)
                } else {
                    Ok(self.rank(order, pos)? + 1)
                }
            }
            Bind::Right => {
                if pos.is_max() {
                    Ok(self.len())
                } else {
                    self.rank(order, pos)
                }
            }
        }
    }

    pub fn has(&self, pos: &Position) -> bool {
        self.arrays
            .get(pos.bunch_id.as_str())
            .map(|a| a.has(pos.inner_index as usize))
            .unwrap_or(false)
    }

    pub fn get(&self, pos: &Position) -> Option<K::Item> {
        self.arrays.get(pos.bunch_id.as_str())?.get(pos.inner_index as usize)
    }

    pub fn get_at(&self, order: &Order, i: usize) -> Result<K::Item, Error> {
        let pos = self.position_at(order, i)?;
        self.get(&pos).ok_or(Error::RangeOutOfBounds { index: i, len: self.len() })
    }

    /// `SparseArray.set` at `pos`, then refreshes cached subtree counts up
    /// to ROOT. Returns the overwritten content.
    pub fn set(&mut self, order: &Order, pos: &Position, item: K::Item) -> Result<SparseArray<K>, Error> {
        if !order.has_bunch(&pos.bunch_id) {
            return Err(Error::MissingMetadata(pos.bunch_id.clone()));
        }
        let arr = self.arrays.entry(pos.bunch_id.clone()).or_default();
        let replaced = arr.set(pos.inner_index as usize, item);
        self.propagate(order, &pos.bunch_id)?;
        Ok(replaced)
    }

    /// `SparseArray.delete` at `pos`, then refreshes cached subtree counts.
    pub fn delete(&mut self, order: &Order, pos: &Position, count: usize) -> Result<SparseArray<K>, Error> {
        if !order.has_bunch(&pos.bunch_id) {
            return Err(Error::MissingMetadata(pos.bunch_id.clone()));
        }
        let arr = self.arrays.entry(pos.bunch_id.clone()).or_default();
        let replaced = arr.delete(pos.inner_index as usize, count);
        self.propagate(order, &pos.bunch_id)?;
        Ok(replaced)
    }

    /// Deletes the `count` present list items starting at index `i`. Walks
    /// one item at a time rather than batching across bunch boundaries,
    /// simple and correct; per-bunch run counts stay small in practice (see
    /// `sparse::mod`), so this isn't the asymptotic bottleneck it would be
    /// for a pathological layout.
    pub fn delete_at(&mut self, order: &Order, i: usize, count: usize) -> Result<(), Error> {
        if count == 0 {
            return Err(Error::InvalidCount);
        }
        let len = self.len();
        if i + count > len {
            return Err(Error::RangeOutOfBounds { index: i, len });
        }
        for _ in 0..count {
            let pos = self.position_at(order, i)?;
            self.delete(order, &pos, 1)?;
        }
        Ok(())
    }

    /// `ItemList.insertAt(i, ...)`: computes `prev`/`next`
    /// from neighboring indices (falling back to `MIN`/`MAX`), asks `order`
    /// for `count` new positions between them, and writes `item` at the
    /// first.
    pub fn insert_at(
        &mut self,
        order: &mut Order,
        i: usize,
        item: K::Item,
    ) -> Result<(Position, Option<BunchMeta>), Error> {
        let len = self.len();
        if i > len {
            return Err(Error::RangeOutOfBounds { index: i, len });
        }
        let item_len = K::length(&item);
        if item_len == 0 {
            return Err(Error::InvalidCount);
        }
        let prev = if i == 0 { Position::min() } else { self.position_at(order, i - 1)? };
        let next = if i == len { Position::max() } else { self.position_at(order, i)? };
        let (start, meta) = order.create_positions(&prev, &next, item_len as u32)?;
        self.set(order, &start, item)?;
        Ok((start, meta))
    }

    fn collect_positions(&self, order: &Order, bunch_id: &str, out: &mut Vec<Position>) -> Result<(), Error> {
        for seg in self.segments(order, bunch_id)? {
            match seg {
                Segment::Own { start, len } => {
                    for k in 0..len {
                        out.push(Position::new(SmartString::from(bunch_id), (start + k) as u32));
                    }
                }
                Segment::Child(child_id) => {
                    self.collect_positions(order, &child_id, out)?;
                }
            }
        }
        Ok(())
    }

    /// All present positions, in ascending (list) order.
    pub fn positions(&self, order: &Order) -> Result<Vec<Position>, Error> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_positions(order, ROOT_BUNCH_ID, &mut out)?;
        Ok(out)
    }

    /// `(Position, item)` for every present position, in ascending order.
    pub fn entries(&self, order: &Order) -> Result<Vec<(Position, K::Item)>, Error> {
        let positions = self.positions(order)?;
        Ok(positions
            .into_iter()
            .map(|p| {
                let item = self
                    .get(&p)
                    .expect("positions() only yields positions this ItemList holds present");
                (p, item)
            })
            .collect())
    }

    /// `entries()[start..end]`, clamped to the list's current length.
    pub fn slice(&self, order: &Order, start: usize, end: usize) -> Result<Vec<(Position, K::Item)>, Error> {
        let all = self.entries(order)?;
        let start = start.min(all.len());
        let end = end.min(all.len()).max(start);
        Ok(all[start..end].to_vec())
    }

    /// The `BunchMeta` for every bunch this `ItemList` currently stores
    /// items in, plus their ancestors up to ROOT (so a receiver can
    /// reconstruct enough of the tree to compare the positions).
    pub fn dependencies(&self, order: &Order) -> Vec<BunchMeta> {
        let mut seen = HashSet::new();
        let mut metas = Vec::new();
        for bunch_id in self.arrays.keys() {
            let mut cur = bunch_id.clone();
            while let Some(meta) = order.get_node(&cur) {
                if !seen.insert(meta.bunch_id.clone()) {
                    break;
                }
                cur = meta.parent_id.clone();
                metas.push(meta);
            }
        }
        metas
    }

    /// Packed per-bunch serialized form.
    pub fn save(&self) -> Vec<(SmartString, Vec<SerializedRun<K::Item>>)> {
        self.arrays.iter().map(|(id, arr)| (id.clone(), arr.serialize())).collect()
    }

    /// Overwrites this `ItemList`'s state.
    pub fn load(
        &mut self,
        order: &Order,
        data: Vec<(SmartString, Vec<SerializedRun<K::Item>>)>,
    ) -> Result<(), Error> {
        self.arrays.clear();
        self.subtree_count.clear();
        for (bunch_id, _) in &data {
            if bunch_id.as_str() != ROOT_BUNCH_ID && !order.has_bunch(bunch_id) {
                return Err(Error::MissingMetadata(bunch_id.clone()));
            }
        }
        for (bunch_id, runs) in data {
            self.arrays.insert(bunch_id, SparseArray::deserialize(runs));
        }
        let touched: Vec<SmartString> = self.arrays.keys().cloned().collect();
        for bunch_id in touched {
            self.propagate(order, &bunch_id)?;
        }
        Ok(())
    }
}

impl<K: ItemKind> fmt::Debug for ItemList<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::sparse::indices::IndicesKind;
    use crate::sparse::values::ValuesKind;

    type Values = ItemList<ValuesKind<char>>;

    #[test]
    fn insert_at_then_position_at_round_trips() {
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        for (i, ch) in "hello".chars().enumerate() {
            list.insert_at(&mut order, i, vec![ch]).unwrap();
        }
        assert_eq!(list.len(), 5);
        let s: String = (0..5).map(|i| list.get_at(&order, i).unwrap()[0]).collect();
        assert_eq!(s, "hello");
    }

    #[test]
    fn index_of_position_bijects_with_position_at() {
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        for i in 0..10 {
            list.insert_at(&mut order, i, vec!['x']).unwrap();
        }
        for i in 0..10 {
            let pos = list.position_at(&order, i).unwrap();
            assert_eq!(list.index_of_position(&order, &pos, SearchDir::None).unwrap(), Some(i));
        }
    }

    #[test]
    fn min_max_indices_match_sentinel_semantics() {
        let mut order = Order::new("alice").unwrap();
        let mut list: ItemList<IndicesKind> = ItemList::new();
        list.set(&order, &Position::min(), 1).unwrap();
        list.set(&order, &Position::max(), 1).unwrap();
        assert_eq!(list.position_at(&order, 0).unwrap(), Position::min());
        assert_eq!(list.position_at(&order, 1).unwrap(), Position::max());

        let (m, _) = order.create_positions(&Position::min(), &Position::max(), 1).unwrap();
        assert_eq!(list.index_of_position(&order, &m, SearchDir::Left).unwrap(), Some(0));
        assert_eq!(list.index_of_position(&order, &m, SearchDir::Right).unwrap(), Some(1));
        assert_eq!(list.index_of_position(&order, &m, SearchDir::None).unwrap(), None);

        list.set(&order, &m, 1).unwrap();
        assert_eq!(list.index_of_position(&order, &m, SearchDir::None).unwrap(), Some(1));
    }

    #[test]
    fn delete_at_removes_and_shifts() {
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        for (i, ch) in "abcde".chars().enumerate() {
            list.insert_at(&mut order, i, vec![ch]).unwrap();
        }
        list.delete_at(&order, 1, 2).unwrap(); // remove 'b','c'
        let s: String = (0..list.len()).map(|i| list.get_at(&order, i).unwrap()[0]).collect();
        assert_eq!(s, "ade");
    }

    #[test]
    fn cursor_round_trips_through_index() {
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        for i in 0..5 {
            list.insert_at(&mut order, i, vec!['a']).unwrap();
        }
        for i in 0..=5 {
            let left = list.cursor_at(&order, i, Bind::Left).unwrap();
            assert_eq!(list.index_of_cursor(&order, &left, Bind::Left).unwrap(), i);
            let right = list.cursor_at(&order, i, Bind::Right).unwrap();
            assert_eq!(list.index_of_cursor(&order, &right, Bind::Right).unwrap(), i);
        }
    }

    #[test]
    fn save_load_round_trips() {
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        for (i, ch) in "seqpos".chars().enumerate() {
            list.insert_at(&mut order, i, vec![ch]).unwrap();
        }
        let saved = list.save();
        let mut reloaded: Values = ItemList::new();
        reloaded.load(&order, saved).unwrap();
        assert_eq!(reloaded.positions(&order).unwrap(), list.positions(&order).unwrap());
        for i in 0..list.len() {
            assert_eq!(reloaded.get_at(&order, i).unwrap(), list.get_at(&order, i).unwrap());
        }
    }

    #[test]
    fn child_bunch_interleaved_inside_a_run_still_orders_correctly() {
        // Force a child bunch to land strictly inside what would otherwise
        // be one contiguous present run, and check position_at/rank still
        // see the child in between.
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        for (i, ch) in "aaaa".chars().enumerate() {
            list.insert_at(&mut order, i, vec![ch]).unwrap();
        }
        // Insert 'b' between the 2nd and 3rd 'a' from a different replica so
        // bunch reuse can't apply: this must allocate a new child bunch of
        // alice's run, landing between two of its slots.
        let mut bob_order = Order::new("bob").unwrap();
        for meta in order.save().0 {
            bob_order.add_meta(meta).unwrap();
        }
        let p1 = list.position_at(&order, 1).unwrap();
        let p2 = list.position_at(&order, 2).unwrap();
        let (b_pos, b_meta) = bob_order.create_positions(&p1, &p2, 1).unwrap();
        order.add_meta(b_meta.unwrap()).unwrap();
        list.set(&order, &b_pos, vec!['b']).unwrap();

        let s: String = (0..list.len()).map(|i| list.get_at(&order, i).unwrap()[0]).collect();
        assert_eq!(s, "aabaa");
        assert_eq!(list.index_of_position(&order, &b_pos, SearchDir::None).unwrap(), Some(2));
    }

    /// Random insert/delete against a single replica, checked at every step
    /// against a plain `Vec<char>` reference model.
    #[test]
    fn fuzz_single_replica_matches_vec_reference() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
        let mut order = Order::new("alice").unwrap();
        let mut list: Values = ItemList::new();
        let mut reference: Vec<char> = Vec::new();

        for _ in 0..500 {
            let len = reference.len();
            let insert_weight = if len < 50 { 0.7 } else { 0.4 };
            if len == 0 || rng.gen_bool(insert_weight) {
                let i = rng.gen_range(0..=len);
                let ch = (b'a' + rng.gen_range(0..26)) as char;
                list.insert_at(&mut order, i, vec![ch]).unwrap();
                reference.insert(i, ch);
            } else {
                let i = rng.gen_range(0..len);
                let span = rng.gen_range(1..=usize::min(5, len - i));
                list.delete_at(&order, i, span).unwrap();
                reference.drain(i..i + span);
            }
            assert_eq!(list.len(), reference.len());
            let actual: Vec<char> = (0..list.len()).map(|i| list.get_at(&order, i).unwrap()[0]).collect();
            assert_eq!(actual, reference);
        }
    }
}

//! The bunch tree, position creation, the total order, and metadata
//! save/load/receive. This is the bulk of the crate: the
//! `Order` owns a small arena of `BunchNode`s addressed by a compact integer
//! handle, plus a `bunchID -> handle` map for name lookup, rather than
//! `Rc`/pointer-chasing between nodes.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;
use smartstring::alias::String as SmartString;

use crate::bunch_id::{self, BunchIdFactory, ROOT_BUNCH_ID};
use crate::error::Error;
use crate::position::{AbsolutePosition, PathStep, Position};

type BunchHandle = u32;
const ROOT_HANDLE: BunchHandle = 0;

/// `{bunchID, parentID, offset}`: the metadata describing
/// one bunch. Cheap to copy-by-clone, used both as the wire form and as the
/// payload of [`Order::on_new_meta`] notifications.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct BunchMeta {
    pub bunch_id: SmartString,
    pub parent_id: SmartString,
    pub offset: u32,
}

/// The saved form of an `Order`'s whole bunch tree, as a flat list rather
/// than grouped by parent; `Vec<BunchMeta>` carries the same information
/// and round-trips through [`Order::save`]/[`Order::load`] identically.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct OrderSavedState(pub Vec<BunchMeta>);

#[derive(Debug)]
struct BunchNode {
    id: SmartString,
    parent: Option<BunchHandle>,
    offset: u32,
    /// Sorted by `(offset, id)`, matching the tie-break rule below.
    children: Vec<BunchHandle>,
    /// The highest inner index *this* `Order` instance has itself assigned
    /// in this bunch via a local `create_positions` call (never by
    /// `add_meta`/`unabs`). `None` means this `Order` has never locally
    /// authored into this bunch, so right-extension here can never reuse it
    ///).
    local_watermark: Option<u32>,
}

/// The bunch tree, position creation, total order, and metadata
/// save/load/receive. One `Order` instance is the single-threaded namespace
/// authority: all mutators run without
/// interleaving, there is no internal locking.
pub struct Order {
    nodes: Vec<BunchNode>,
    index: HashMap<SmartString, BunchHandle>,
    id_factory: BunchIdFactory,
    listeners: Vec<Box<dyn FnMut(&BunchMeta)>>,
}

impl fmt::Debug for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("nodes", &self.nodes)
            .field("id_factory", &self.id_factory)
            .finish()
    }
}

impl Order {
    /// Creates a fresh `Order` whose own new bunches are authored under
    /// `replica`. `replica` must pass [`bunch_id::validate`].
    pub fn new(replica: impl Into<SmartString>) -> Result<Self, Error> {
        let root = BunchNode {
            id: SmartString::from(ROOT_BUNCH_ID),
            parent: None,
            offset: 0,
            children: Vec::new(),
            local_watermark: None,
        };
        let mut index = HashMap::new();
        index.insert(SmartString::from(ROOT_BUNCH_ID), ROOT_HANDLE);
        Ok(Order {
            nodes: vec![root],
            index,
            id_factory: BunchIdFactory::new(replica)?,
            listeners: Vec::new(),
        })
    }

    /// Subscribes `f` to be called once for every bunch that becomes known
    /// to this `Order` for the first time, whether by local creation,
    /// [`Order::add_metas`], or [`Order::unabs`].
    pub fn on_new_meta<F: FnMut(&BunchMeta) + 'static>(&mut self, f: F) {
        self.listeners.push(Box::new(f));
    }

    /// The replica string this `Order`'s bunch id factory was built with.
    pub fn replica(&self) -> &str {
        self.id_factory.replica()
    }

    /// Whether `bunch_id` is registered.
    pub fn has_bunch(&self, bunch_id: &str) -> bool {
        self.index.contains_key(bunch_id)
    }

    /// The metadata for `bunch_id`, if registered.
    pub fn get_node(&self, bunch_id: &str) -> Option<BunchMeta> {
        let handle = *self.index.get(bunch_id)?;
        let node = &self.nodes[handle as usize];
        if handle == ROOT_HANDLE {
            return None; // ROOT has no BunchMeta of its own (no parent).
        }
        Some(BunchMeta {
            bunch_id: node.id.clone(),
            parent_id: self.nodes[node.parent.unwrap() as usize].id.clone(),
            offset: node.offset,
        })
    }

    fn handle_of(&self, bunch_id: &str) -> Result<BunchHandle, Error> {
        self.index
            .get(bunch_id)
            .copied()
            .ok_or_else(|| Error::MissingMetadata(SmartString::from(bunch_id)))
    }

    /// Children of `bunch_id`, sorted by `(offset, bunch_id)`, the local
    /// order this crate defines. Exposed so `item_list` can walk the tree
    /// without reaching into `Order`'s private arena.
    pub fn children(&self, bunch_id: &str) -> Result<Vec<(u32, SmartString)>, Error> {
        let handle = self.handle_of(bunch_id)?;
        Ok(self.nodes[handle as usize]
            .children
            .iter()
            .map(|&h| {
                let n = &self.nodes[h as usize];
                (n.offset, n.id.clone())
            })
            .collect())
    }

    /// The parent of `bunch_id`, or `None` for ROOT.
    pub fn parent(&self, bunch_id: &str) -> Result<Option<SmartString>, Error> {
        let handle = self.handle_of(bunch_id)?;
        Ok(self.nodes[handle as usize].parent.map(|p| self.nodes[p as usize].id.clone()))
    }

    /// The offset of `bunch_id` within its parent. `Err` for ROOT (which has
    /// no parent, hence no offset of its own).
    pub fn offset(&self, bunch_id: &str) -> Result<u32, Error> {
        let handle = self.handle_of(bunch_id)?;
        let node = &self.nodes[handle as usize];
        if node.parent.is_none() {
            return Err(Error::MissingMetadata(SmartString::from(bunch_id)));
        }
        Ok(node.offset)
    }

    /// The first (smallest `bunch_id`, i.e. leftmost) child of `parent`
    /// sitting at exactly `offset`, if any. Children lists stay small in
    /// practice, so a linear scan (children are kept sorted by
    /// `(offset, id)`) is simpler than a custom binary search here.
    fn find_child_at_offset(&self, parent: BunchHandle, offset: u32) -> Option<BunchHandle> {
        self.nodes[parent as usize]
            .children
            .iter()
            .find(|&&h| self.nodes[h as usize].offset == offset)
            .copied()
    }

    fn register_one(&mut self, meta: BunchMeta) -> Result<bool, Error> {
        if let Some(&existing) = self.index.get(meta.bunch_id.as_str()) {
            let node = &self.nodes[existing as usize];
            let existing_parent = node.parent.map(|h| self.nodes[h as usize].id.clone());
            if existing_parent.as_deref() == Some(meta.parent_id.as_str())
                && node.offset == meta.offset
            {
                return Ok(false);
            }
            return Err(Error::MetadataConflict(meta.bunch_id));
        }

        bunch_id::validate(&meta.bunch_id)?;
        let parent_handle = self.handle_of(&meta.parent_id)?;

        if let Some((replica, counter)) = bunch_id::parse_bunch_id(&meta.bunch_id) {
            if replica == self.id_factory.replica() {
                self.id_factory.bump_to_at_least(counter + 1);
            }
        }

        let handle = self.nodes.len() as BunchHandle;
        self.nodes.push(BunchNode {
            id: meta.bunch_id.clone(),
            parent: Some(parent_handle),
            offset: meta.offset,
            children: Vec::new(),
            local_watermark: None,
        });
        self.index.insert(meta.bunch_id.clone(), handle);

        let siblings_snapshot: Vec<(u32, SmartString, BunchHandle)> = self.nodes
            [parent_handle as usize]
            .children
            .iter()
            .map(|&h| {
                let n = &self.nodes[h as usize];
                (n.offset, n.id.clone(), h)
            })
            .collect();
        let insert_at = siblings_snapshot
            .iter()
            .position(|(o, id, _)| (*o, id.as_str()) > (meta.offset, meta.bunch_id.as_str()))
            .unwrap_or(siblings_snapshot.len());
        self.nodes[parent_handle as usize]
            .children
            .insert(insert_at, handle);

        for f in &mut self.listeners {
            f(&meta);
        }
        Ok(true)
    }

    /// Registers a single [`BunchMeta`]. Idempotent if bit-identical to an
    /// already-registered entry; a fatal [`Error::MetadataConflict`] if it
    /// contradicts one. The parent must already be registered
    /// ([`Error::MissingMetadata`] otherwise); callers needing
    /// order-independent batch registration should use [`Order::load`].
    pub fn add_meta(&mut self, meta: BunchMeta) -> Result<(), Error> {
        self.register_one(meta).map(|_| ())
    }

    /// Registers each of `metas` in iteration order (see [`add_meta`](Self::add_meta)).
    pub fn add_metas(&mut self, metas: impl IntoIterator<Item = BunchMeta>) -> Result<(), Error> {
        for meta in metas {
            self.add_meta(meta)?;
        }
        Ok(())
    }

    /// The full ancestor chain of `pos`, expressed the same way `compare`
    /// walks it: one `(offset, bunch_id)` pair per level from a child of
    /// ROOT down to `pos`'s own bunch, followed by the final slot pair
    /// `(2*inner_index + 1, pos.bunch_id)`.
    fn full_path(&self, pos: &Position) -> Result<SmallVec<[(u32, SmartString); 4]>, Error> {
        let mut chain: SmallVec<[(u32, SmartString); 4]> = SmallVec::new();
        let mut handle = self.handle_of(&pos.bunch_id)?;
        while let Some(parent) = self.nodes[handle as usize].parent {
            let node = &self.nodes[handle as usize];
            chain.push((node.offset, node.id.clone()));
            handle = parent;
        }
        chain.reverse();
        chain.push((2 * pos.inner_index + 1, pos.bunch_id.clone()));
        Ok(chain)
    }

    /// Total order on positions: antisymmetric, transitive,
    /// total; `compare(p, p) == Equal` for all registered `p`.
    pub fn compare(&self, a: &Position, b: &Position) -> Result<Ordering, Error> {
        let path_a = self.full_path(a)?;
        let path_b = self.full_path(b)?;
        for (step_a, step_b) in path_a.iter().zip(path_b.iter()) {
            match step_a.cmp(step_b) {
                Ordering::Equal => continue,
                other => return Ok(other),
            }
        }
        Ok(path_a.len().cmp(&path_b.len()))
    }

    pub fn less_than(&self, a: &Position, b: &Position) -> Result<bool, Error> {
        Ok(self.compare(a, b)? == Ordering::Less)
    }

    /// `Order.abs`: the self-contained absolute form of `pos`.
    pub fn abs(&self, pos: &Position) -> Result<AbsolutePosition, Error> {
        let full = self.full_path(pos)?;
        // Drop the final (slot) entry; that information is carried by
        // `inner_index` directly in `AbsolutePosition`.
        let ancestor_steps = &full[..full.len() - 1];
        let path = ancestor_steps
            .iter()
            .map(|(offset, id)| PathStep { bunch_id: id.clone(), offset: *offset })
            .collect();
        Ok(AbsolutePosition { path, bunch_id: pos.bunch_id.clone(), inner_index: pos.inner_index })
    }

    /// `Order.unabs`: reconstructs the compact `Position`, registering any
    /// bunch along the ancestor chain this `Order` hasn't seen yet.
    pub fn unabs(&mut self, abs: &AbsolutePosition) -> Result<Position, Error> {
        let mut parent_id: SmartString = SmartString::from(ROOT_BUNCH_ID);
        for step in &abs.path {
            let meta = BunchMeta {
                bunch_id: step.bunch_id.clone(),
                parent_id: parent_id.clone(),
                offset: step.offset,
            };
            self.add_meta(meta)?;
            parent_id = step.bunch_id.clone();
        }
        // The position's own bunch, if it differs from the last path step
        // (it always does, unless `abs.bunch_id == ROOT`, i.e. a sentinel).
        if abs.bunch_id != parent_id && !self.has_bunch(&abs.bunch_id) {
            return Err(Error::MissingMetadata(abs.bunch_id.clone()));
        }
        Ok(abs.to_position())
    }

    /// Convenience: `lex(abs(pos))`.
    pub fn lex(&self, pos: &Position) -> Result<String, Error> {
        let abs = self.abs(pos)?;
        Ok(crate::lex::encode(&abs))
    }

    /// Convenience: `unabs(parse(s))`.
    pub fn parse_lex(&mut self, s: &str) -> Result<Position, Error> {
        let abs = crate::lex::parse(s)?;
        self.unabs(&abs)
    }

    fn can_reuse(&self, bunch: BunchHandle, inner_index: u32) -> bool {
        self.nodes[bunch as usize].local_watermark == Some(inner_index)
    }

    fn new_bunch_meta(&mut self, parent: BunchHandle, offset: u32, count: u32) -> BunchMeta {
        let bunch_id = self.id_factory.new_bunch_id();
        let parent_id = self.nodes[parent as usize].id.clone();
        let meta = BunchMeta { bunch_id: bunch_id.clone(), parent_id, offset };

        let handle = self.nodes.len() as BunchHandle;
        self.nodes.push(BunchNode {
            id: bunch_id.clone(),
            parent: Some(parent),
            offset,
            children: Vec::new(),
            local_watermark: Some(count - 1),
        });
        self.index.insert(bunch_id, handle);

        let siblings_snapshot: Vec<(u32, SmartString, BunchHandle)> = self.nodes[parent as usize]
            .children
            .iter()
            .map(|&h| {
                let n = &self.nodes[h as usize];
                (n.offset, n.id.clone(), h)
            })
            .collect();
        let insert_at = siblings_snapshot
            .iter()
            .position(|(o, id, _)| (*o, id.as_str()) > (meta.offset, meta.bunch_id.as_str()))
            .unwrap_or(siblings_snapshot.len());
        self.nodes[parent as usize].children.insert(insert_at, handle);

        for f in &mut self.listeners {
            f(&meta);
        }
        meta
    }

    /// `Order.createPositions(prev, next, count)`: produces
    /// `count` new positions strictly between `prev` and `next`, returning
    /// the first (use [`crate::expand_positions`] for the rest) and, if a
    /// new bunch was allocated, its metadata.
    pub fn create_positions(
        &mut self,
        prev: &Position,
        next: &Position,
        count: u32,
    ) -> Result<(Position, Option<BunchMeta>), Error> {
        if count == 0 {
            return Err(Error::InvalidCount);
        }
        if !self.less_than(prev, next)? {
            return Err(Error::ComparisonInvalid);
        }

        // Right-extend from `prev`, descending ("left-extend the blocking
        // child's slot 0") whenever the immediate gap is already occupied.
        // This single-direction walk always lands strictly between `prev`
        // and `next` regardless of where `next` actually sits: any blocking
        // child must itself lie to the right of `prev` and, if it doesn't
        // already contain `next`, strictly to the left of it too.
        let mut anchor_bunch = self.handle_of(&prev.bunch_id)?;
        let mut anchor_index = prev.inner_index;
        let mut left_extend_mode = false;

        loop {
            let target_offset = if left_extend_mode { 0 } else { 2 * anchor_index + 2 };
            if let Some(child) = self.find_child_at_offset(anchor_bunch, target_offset) {
                anchor_bunch = child;
                anchor_index = 0;
                left_extend_mode = true;
                continue;
            }

            if !left_extend_mode {
                let bunch_id = self.nodes[anchor_bunch as usize].id.clone();
                let next_is_here_directly =
                    next.bunch_id == bunch_id && next.inner_index == anchor_index + 1;
                if !next_is_here_directly && self.can_reuse(anchor_bunch, anchor_index) {
                    self.nodes[anchor_bunch as usize].local_watermark =
                        Some(anchor_index + count);
                    let first = Position::new(bunch_id, anchor_index + 1);
                    return Ok((first, None));
                }
            }

            let meta = self.new_bunch_meta(anchor_bunch, target_offset, count);
            let first = Position::new(meta.bunch_id.clone(), 0);
            return Ok((first, Some(meta)));
        }
    }

    /// Saves the whole bunch tree.
    pub fn save(&self) -> OrderSavedState {
        let mut out = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        for (handle, node) in self.nodes.iter().enumerate() {
            if handle as BunchHandle == ROOT_HANDLE {
                continue;
            }
            out.push(BunchMeta {
                bunch_id: node.id.clone(),
                parent_id: self.nodes[node.parent.unwrap() as usize].id.clone(),
                offset: node.offset,
            });
        }
        OrderSavedState(out)
    }

    /// Loads a saved bunch tree, equivalent to `add_metas` over all
    /// entries. Unlike `add_metas`, tolerates entries appearing before
    /// their parent in iteration order by retrying until a fixpoint.
    pub fn load(&mut self, state: OrderSavedState) -> Result<(), Error> {
        let mut pending = state.0;
        loop {
            let mut progressed = false;
            let mut still_pending = Vec::new();
            for meta in pending {
                if self.has_bunch(&meta.parent_id) || meta.parent_id.as_str() == ROOT_BUNCH_ID {
                    self.add_meta(meta)?;
                    progressed = true;
                } else {
                    still_pending.push(meta);
                }
            }
            if still_pending.is_empty() {
                return Ok(());
            }
            if !progressed {
                return Err(Error::MissingMetadata(still_pending[0].parent_id.clone()));
            }
            pending = still_pending;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(start: &Position, count: u32) -> Vec<Position> {
        (0..count)
            .map(|k| Position::new(start.bunch_id.clone(), start.inner_index + k))
            .collect()
    }

    #[test]
    fn min_max_are_sentinels() {
        let order = Order::new("alice").unwrap();
        let min = Position::min();
        let max = Position::max();
        assert_eq!(order.compare(&min, &max).unwrap(), Ordering::Less);
        assert_eq!(order.compare(&min, &min).unwrap(), Ordering::Equal);
    }

    #[test]
    fn ltr_run_shares_at_most_two_bunches() {
        // Shortened to keep the unit test fast; a fuller version lives in
        // `tests/concrete_scenarios.rs`.
        let mut order = Order::new("alice").unwrap();
        let mut prev = Position::min();
        let max = Position::max();
        let mut bunches = std::collections::HashSet::new();
        let mut positions = Vec::new();
        for _ in 0..50 {
            let (pos, meta) = order.create_positions(&prev, &max, 1).unwrap();
            if let Some(meta) = meta {
                bunches.insert(meta.bunch_id);
            }
            assert!(order.less_than(&prev, &pos).unwrap());
            assert!(order.less_than(&pos, &max).unwrap());
            positions.push(pos.clone());
            prev = pos;
        }
        assert!(bunches.len() <= 2, "expected reuse to keep bunch count low, got {bunches:?}");
        for w in positions.windows(2) {
            assert_eq!(order.compare(&w[0], &w[1]).unwrap(), Ordering::Less);
        }
    }

    #[test]
    fn restart_rounds_strictly_precede_previous_round() {
        let mut order = Order::new("alice").unwrap();
        let max = Position::max();
        let mut list: Vec<Position> = Vec::new();
        let mut previous_round_first: Option<Position> = None;

        for _round in 0..5 {
            let next = list.first().cloned().unwrap_or_else(Position::max);
            let (start, _meta) = order.create_positions(&Position::min(), &next, 10).unwrap();
            let new_positions = expand(&start, 10);
            for p in new_positions.iter() {
                assert!(order.less_than(p, &next).unwrap());
            }
            if let Some(first_before) = &previous_round_first {
                for p in new_positions.iter() {
                    assert!(order.less_than(p, first_before).unwrap());
                }
            }
            previous_round_first = Some(new_positions[0].clone());
            let mut merged = new_positions;
            merged.extend(list);
            list = merged;
        }

        for w in list.windows(2) {
            assert_eq!(order.compare(&w[0], &w[1]).unwrap(), Ordering::Less);
        }
        let _ = max;
    }

    #[test]
    fn concurrent_insert_between_same_gap_is_non_colliding() {
        // Two replicas concurrently inserting into the same gap.
        let mut order = Order::new("alice").unwrap();
        let (a_start, _) = order.create_positions(&Position::min(), &Position::max(), 2).unwrap();
        let ab = expand(&a_start, 2);
        let (a, b) = (ab[0].clone(), ab[1].clone());

        let mut alice = Order::new("alice").unwrap();
        let mut bob = Order::new("bob").unwrap();
        for o in [&mut alice, &mut bob] {
            o.add_meta(order.get_node(&a.bunch_id).unwrap()).unwrap();
        }

        let (c, c_meta) = alice.create_positions(&a, &b, 1).unwrap();
        let (d, d_meta) = bob.create_positions(&a, &b, 1).unwrap();
        assert_ne!(c, d);

        // Exchange metadata both ways.
        if let Some(m) = c_meta {
            bob.add_meta(m).unwrap();
        }
        if let Some(m) = d_meta {
            alice.add_meta(m).unwrap();
        }

        // Establish which of c, d sorts first on a replica that knows both.
        let order_is_less = alice.less_than(&c, &d).unwrap();
        let (first, second) = if order_is_less { (&c, &d) } else { (&d, &c) };

        for o in [&alice, &bob] {
            assert_eq!(o.compare(&a, first).unwrap(), Ordering::Less);
            assert_eq!(o.compare(first, second).unwrap(), Ordering::Less);
            assert_eq!(o.compare(second, &b).unwrap(), Ordering::Less);
        }
    }

    #[test]
    fn save_load_round_trips_across_orders() {
        let mut order_a = Order::new("alice").unwrap();
        let (p, _) = order_a.create_positions(&Position::min(), &Position::max(), 1).unwrap();
        let lex = order_a.lex(&p).unwrap();

        let mut order_b = Order::new("bob").unwrap();
        let parsed = order_b.parse_lex(&lex).unwrap();
        assert_eq!(order_b.abs(&parsed).unwrap(), order_a.abs(&p).unwrap());
    }

    #[test]
    fn add_metas_rejects_conflicting_redefinition() {
        let mut order = Order::new("alice").unwrap();
        let meta = BunchMeta {
            bunch_id: "x_0".into(),
            parent_id: "ROOT".into(),
            offset: 2,
        };
        order.add_meta(meta.clone()).unwrap();
        order.add_meta(meta.clone()).unwrap(); // idempotent, identical

        let conflicting = BunchMeta { offset: 4, ..meta };
        assert!(matches!(order.add_meta(conflicting), Err(Error::MetadataConflict(_))));
    }

    #[test]
    fn missing_parent_is_fatal() {
        let mut order = Order::new("alice").unwrap();
        let meta = BunchMeta {
            bunch_id: "x_0".into(),
            parent_id: "y_0".into(),
            offset: 2,
        };
        assert!(matches!(order.add_meta(meta), Err(Error::MissingMetadata(_))));
    }

    #[test]
    fn create_positions_rejects_reversed_bounds() {
        let mut order = Order::new("alice").unwrap();
        let err = order.create_positions(&Position::max(), &Position::min(), 1).unwrap_err();
        assert_eq!(err, Error::ComparisonInvalid);
    }

    /// Each round one of several simulated replicas inserts at a random gap
    /// in its own view, broadcasts the resulting metadata to the others, and
    /// every replica's `compare` is checked to agree on the resulting total
    /// order over every position seen so far.
    #[test]
    fn fuzz_multi_replica_total_order_agrees_everywhere() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0xBADF00D);
        let mut replicas: Vec<Order> = ["alice", "bob", "carol"]
            .iter()
            .map(|r| Order::new(*r).unwrap())
            .collect();
        let mut positions: Vec<Position> = Vec::new();

        for _ in 0..300 {
            let r = rng.gen_range(0..replicas.len());
            let len = positions.len();
            let i = rng.gen_range(0..=len);
            let prev = if i == 0 { Position::min() } else { positions[i - 1].clone() };
            let next = if i == len { Position::max() } else { positions[i].clone() };
            let (pos, meta) = replicas[r].create_positions(&prev, &next, 1).unwrap();
            if let Some(meta) = meta {
                for (j, other) in replicas.iter_mut().enumerate() {
                    if j != r {
                        other.add_meta(meta.clone()).unwrap();
                    }
                }
            }
            positions.insert(i, pos);
        }

        for w in positions.windows(2) {
            for replica in &replicas {
                assert_eq!(replica.compare(&w[0], &w[1]).unwrap(), Ordering::Less);
            }
        }
    }

    #[test]
    fn on_new_meta_fires_once_per_new_bunch() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        let mut order = Order::new("alice").unwrap();
        order.on_new_meta(move |_meta| {
            *count_clone.borrow_mut() += 1;
        });
        order.create_positions(&Position::min(), &Position::max(), 5).unwrap();
        assert_eq!(*count.borrow(), 1);
    }
}

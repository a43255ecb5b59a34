//! `Position` and `AbsolutePosition`: value types naming a slot
//! in the global total order. `Position` is the compact, opaque form used
//! everywhere internally; `AbsolutePosition` is the self-contained form that
//! embeds the full ancestor chain so it compares without needing any prior
//! `Order` state (see `order::Order::abs`/`unabs`).

use std::hash::Hash;

use smallvec::SmallVec;
use smartstring::alias::String as SmartString;

use crate::bunch_id::ROOT_BUNCH_ID;

/// An opaque identifier of a slot in the total order: a bunch id plus an
/// index within that bunch. Positions are value types: produced once,
/// freely copied, never mutated.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct Position {
    pub bunch_id: SmartString,
    pub inner_index: u32,
}

impl Position {
    pub fn new(bunch_id: impl Into<SmartString>, inner_index: u32) -> Self {
        Position { bunch_id: bunch_id.into(), inner_index }
    }

    /// The globally fixed minimum position, `{bunchID: "ROOT", innerIndex: 0}`.
    pub fn min() -> Self {
        Position::new(ROOT_BUNCH_ID, 0)
    }

    /// The globally fixed maximum position, `{bunchID: "ROOT", innerIndex: 1}`.
    pub fn max() -> Self {
        Position::new(ROOT_BUNCH_ID, 1)
    }

    pub fn is_min(&self) -> bool {
        *self == Position::min()
    }

    pub fn is_max(&self) -> bool {
        *self == Position::max()
    }
}

/// One step of an absolute position's ancestor chain: the bunch id of a
/// parent, and the even offset the next step (child or final inner slot)
/// occupies within that parent.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct PathStep {
    pub bunch_id: SmartString,
    pub offset: u32,
}

/// A `Position` plus the full ancestor chain needed to compare it without
/// consulting any `Order` state: `[(ROOT, offsetA), (bunchA, offsetB), ...]`
/// down to the position's own bunch, plus the final `innerIndex`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub struct AbsolutePosition {
    /// Ancestor steps from (but not including) ROOT down to, and
    /// including, this position's own bunch: `(bunch_id, offset-of-next-step)`.
    pub path: SmallVec<[PathStep; 4]>,
    pub bunch_id: SmartString,
    pub inner_index: u32,
}

impl AbsolutePosition {
    /// The compact `Position` this absolute position names (drops ancestry).
    pub fn to_position(&self) -> Position {
        Position::new(self.bunch_id.clone(), self.inner_index)
    }
}

//! A position algebra for collaborative ordered sequences: dense,
//! replica-independent identifiers ([`position::Position`]) that support
//! inserting arbitrarily many new elements anywhere in a total order without
//! renumbering existing ones.
//!
//! [`order::Order`] owns the bunch tree and the operations that create and
//! compare positions. [`item_list::ItemList`] indexes a sparse array of
//! items by `Position`, giving the `index <-> Position` bijection the
//! [`views`] (list/outline/text) and [`position_map`] (order-independent
//! maps) types build on.

pub mod bunch_id;
pub mod error;
pub mod item_list;
pub mod lex;
pub mod order;
pub mod position;
pub mod position_map;
pub mod sparse;
pub mod views;

pub use error::{Error, Result};
pub use order::{BunchMeta, Order, OrderSavedState};
pub use position::{AbsolutePosition, PathStep, Position};

/// Expands the first of `count` positions returned by
/// [`order::Order::create_positions`] into the full batch:
/// all `count` positions share a bunch and occupy consecutive inner
/// indices, so this never touches the `Order`.
pub fn expand_positions(first: &Position, count: u32) -> Vec<Position> {
    (0..count)
        .map(|k| Position::new(first.bunch_id.clone(), first.inner_index + k))
        .collect()
}

//! Error kinds raised by the position algebra.
//!
//! Everything here is fatal: the library does not attempt recovery, and a
//! mutator that returns `Err` has not partially mutated its receiver (see the
//! per-function docs for the one or two places a check happens before any
//! write).

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

use smartstring::alias::String as SmartString;

/// Errors raised by [`crate::order::Order`], the sparse arrays, and the
/// views built on top of them.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A bunch id failed [`crate::bunch_id::validate`]: it was `"ROOT"`,
    /// contained `.` or `,`, or sorted `>= "~"`.
    InvalidBunchId(SmartString),

    /// A `Position`/`BunchMeta` referenced a `bunchID` the `Order` has never
    /// registered.
    MissingMetadata(SmartString),

    /// `addMetas`/`receiveMetas` was given a `BunchMeta` for a `bunchID`
    /// already registered with a different `parentID`/`offset`.
    MetadataConflict(SmartString),

    /// `positionAt`/`insertAt`/`deleteAt` was given an index outside the
    /// valid range for the operation.
    RangeOutOfBounds { index: usize, len: usize },

    /// `createPositions(prev, next, ..)` was called with `prev >= next`.
    ComparisonInvalid,

    /// `createPositions(.., count)` was called with `count == 0`.
    InvalidCount,

    /// [`crate::lex::parse`] was given a string that isn't a valid `lex`
    /// encoding.
    InvalidLex(SmartString),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBunchId(id) => write!(f, "invalid bunch id: {:?}", id),
            Error::MissingMetadata(id) => {
                write!(f, "bunch {:?} is not registered in this Order", id)
            }
            Error::MetadataConflict(id) => {
                write!(f, "conflicting metadata for bunch {:?}", id)
            }
            Error::RangeOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            Error::ComparisonInvalid => {
                write!(f, "createPositions requires prev < next")
            }
            Error::InvalidCount => {
                write!(f, "createPositions requires count >= 1")
            }
            Error::InvalidLex(s) => {
                write!(f, "{:?} is not a valid lex encoding", s)
            }
        }
    }
}

impl StdError for Error {}

pub type Result<T> = std::result::Result<T, Error>;

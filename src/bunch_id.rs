//! Bunch ID factory.
//!
//! Bunch ids are opaque strings with three hard rules: never `"ROOT"`, never
//! contain any byte `<= ','` (the `lex` module uses `.` and `,` as
//! level/terminator separators, and anything sorting at or below `,` could
//! otherwise make a sibling id a lexicographic "prefix trap" — see
//! `validate` below), and always sort strictly less than `"~"` (so
//! `MAX_POSITION`'s lex encoding can use `"~"` as a true upper sentinel). The
//! default factory just pairs a replica string with a monotonic counter.

use smartstring::alias::String as SmartString;

use crate::error::Error;

/// The reserved bunch id of the root bunch.
pub const ROOT_BUNCH_ID: &str = "ROOT";

/// Every valid bunch id sorts strictly less than this.
pub const MAX_SENTINEL: &str = "~";

/// Checks `id` against the validation rules. Does not allocate.
///
/// Besides `.`/`,` themselves, any byte `<= ','` (0x2C) is forbidden too: the
/// `lex` encoding terminates each level with `,`, so if a bunch id `a` were a
/// proper prefix of a sibling id `b` (e.g. `a = "x"`, `b = "x!"`), `compare`
/// orders them by the usual prefix rule (`a < b`), but `encode` would instead
/// compare `"x,"` against `"x!,"` and see `',' > '!'`, reversing the order.
/// Requiring every byte of `id` to sort above `,` makes `,` itself always the
/// smallest possible next byte after any bunch id, so the terminator can
/// never be "overtaken" by a continuation of the id it terminates.
pub fn validate(id: &str) -> Result<(), Error> {
    if id == ROOT_BUNCH_ID
        || id.contains('.')
        || id.chars().any(|c| c <= ',')
        || id >= MAX_SENTINEL
    {
        Err(Error::InvalidBunchId(SmartString::from(id)))
    } else {
        Ok(())
    }
}

/// A stateful factory producing bunch ids of the form `"<replica>_<counter
/// in base 36>"`. `replica` is validated once, up front; the counter then
/// increases monotonically so every id this factory produces is unique for
/// the lifetime of the process (restarting with the same replica string and
/// a lower counter is the caller's responsibility to avoid, e.g. by
/// persisting the counter alongside the rest of the document).
#[derive(Clone, Debug)]
pub struct BunchIdFactory {
    replica: SmartString,
    next_counter: u64,
}

impl BunchIdFactory {
    /// Creates a new factory for the given replica string. `replica` itself
    /// must pass [`validate`] (it will form a prefix of every id this
    /// factory produces, and a bare replica string containing `_` is fine;
    /// only `.`/`,`/`ROOT`/`>= "~"` are forbidden).
    pub fn new(replica: impl Into<SmartString>) -> Result<Self, Error> {
        let replica = replica.into();
        validate(&replica)?;
        Ok(BunchIdFactory { replica, next_counter: 0 })
    }

    /// The replica string this factory was built with.
    pub fn replica(&self) -> &str {
        &self.replica
    }

    /// Produces the next bunch id and advances the internal counter.
    pub fn new_bunch_id(&mut self) -> SmartString {
        let counter = self.next_counter;
        self.next_counter += 1;
        format_bunch_id(&self.replica, counter)
    }

    /// Raises the counter so the next id is at least `format_bunch_id(replica,
    /// min)`, never lowers it. Called whenever an `Order` learns of a bunch
    /// authored by its own replica string (via `add_meta`/`unabs`/`load`) so
    /// that resuming from a saved state, or two `Order`s restarted with the
    /// same replica string, never reissues an id already in use.
    pub(crate) fn bump_to_at_least(&mut self, min: u64) {
        if self.next_counter < min {
            self.next_counter = min;
        }
    }
}

fn format_bunch_id(replica: &str, counter: u64) -> SmartString {
    let mut out = SmartString::from(replica);
    out.push('_');
    push_base36(&mut out, counter);
    out
}

pub(crate) fn push_base36(out: &mut SmartString, mut n: u64) {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        out.push('0');
        return;
    }
    let mut buf = [0u8; 13]; // u64::MAX fits in 13 base-36 digits
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = DIGITS[(n % 36) as usize];
        n /= 36;
    }
    out.push_str(std::str::from_utf8(&buf[i..]).unwrap());
}

/// Recovers `(replica, counter)` from an id produced by [`BunchIdFactory`].
/// Returns `None` for ids that don't match the `"<replica>_<base36>"` shape
/// (e.g. ids a caller constructed by hand with a different scheme); this is
/// a best-effort parser, not a validator.
pub fn parse_bunch_id(id: &str) -> Option<(&str, u64)> {
    let (replica, counter_str) = id.rsplit_once('_')?;
    if replica.is_empty() || counter_str.is_empty() {
        return None;
    }
    let counter = u64::from_str_radix(counter_str, 36).ok()?;
    Some((replica, counter))
}

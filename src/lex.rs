//! Lexicographic string encoding: a pure function from
//! [`AbsolutePosition`] to a `String` whose ordinary string ordering matches
//! [`crate::order::Order::compare`]'s position ordering, and back.
//!
//! Grammar (bunch ids can't contain `.`/`,`, enforced by
//! [`crate::bunch_id::validate`], so scanning for the next `,` unambiguously
//! ends a bunch id):
//!
//! ```text
//! string    := "" | "~" | level* final
//! level     := offset "." bunch_id ","
//! final     := offset
//! offset    := length_digit base36_digit{length_digit}
//! ```
//!
//! `offset` is self-describing: a single base-36 digit giving the digit
//! count, then that many base-36 digits of the value itself. Because a u32
//! offset never needs more than 7 base-36 digits, the length digit is
//! always a single character, and two same-length offsets compare digit by
//! digit exactly like their numeric values (the `push_base36` alphabet is
//! itself ascending). This is the standard "length-self-describing base-N
//! sequence" trick for making numeric strings sort correctly as plain
//! strings.

use smartstring::alias::String as SmartString;

use crate::bunch_id::{self, MAX_SENTINEL, ROOT_BUNCH_ID};
use crate::error::Error;
use crate::position::{AbsolutePosition, PathStep};

/// Encodes `abs` as a string whose ordering matches position order.
pub fn encode(abs: &AbsolutePosition) -> String {
    if abs.path.is_empty() {
        // The only positions with an empty ancestor chain are the two
        // sentinels living directly in ROOT.
        return if abs.inner_index == 0 { String::new() } else { MAX_SENTINEL.to_string() };
    }
    let mut out = String::new();
    for step in &abs.path {
        push_offset(&mut out, step.offset);
        out.push('.');
        out.push_str(&step.bunch_id);
        out.push(',');
    }
    push_offset(&mut out, 2 * abs.inner_index + 1);
    out
}

/// Parses a string produced by [`encode`] back into an [`AbsolutePosition`].
pub fn parse(s: &str) -> Result<AbsolutePosition, Error> {
    if s.is_empty() {
        return Ok(AbsolutePosition {
            path: Default::default(),
            bunch_id: SmartString::from(ROOT_BUNCH_ID),
            inner_index: 0,
        });
    }
    if s == MAX_SENTINEL {
        return Ok(AbsolutePosition {
            path: Default::default(),
            bunch_id: SmartString::from(ROOT_BUNCH_ID),
            inner_index: 1,
        });
    }

    let mut rest = s;
    let mut path: smallvec::SmallVec<[PathStep; 4]> = Default::default();
    let mut last_bunch_id = SmartString::from(ROOT_BUNCH_ID);

    loop {
        let (offset, after_offset) = read_offset(s, rest)?;
        match after_offset.strip_prefix('.') {
            Some(after_dot) => {
                let comma = after_dot
                    .find(',')
                    .ok_or_else(|| Error::InvalidLex(SmartString::from(s)))?;
                let bunch_id = &after_dot[..comma];
                bunch_id::validate(bunch_id)?;
                let bunch_id = SmartString::from(bunch_id);
                path.push(PathStep { bunch_id: bunch_id.clone(), offset });
                last_bunch_id = bunch_id;
                rest = &after_dot[comma + 1..];
            }
            None => {
                if !after_offset.is_empty() {
                    return Err(Error::InvalidLex(SmartString::from(s)));
                }
                if offset == 0 || offset % 2 == 0 {
                    return Err(Error::InvalidLex(SmartString::from(s)));
                }
                let inner_index = (offset - 1) / 2;
                return Ok(AbsolutePosition {
                    path,
                    bunch_id: last_bunch_id,
                    inner_index,
                });
            }
        }
    }
}

fn push_offset(out: &mut String, n: u32) {
    let mut digits = SmartString::new();
    bunch_id::push_base36(&mut digits, n as u64);
    let len_digit = std::char::from_digit(digits.len() as u32, 36)
        .expect("u32 never needs more than 7 base-36 digits");
    out.push(len_digit);
    out.push_str(&digits);
}

fn read_offset<'a>(whole: &str, s: &'a str) -> Result<(u32, &'a str), Error> {
    let invalid = || Error::InvalidLex(SmartString::from(whole));
    let mut chars = s.char_indices();
    let (_, len_char) = chars.next().ok_or_else(invalid)?;
    let len = len_char.to_digit(36).ok_or_else(invalid)? as usize;
    if len == 0 {
        return Err(invalid());
    }
    let digits_start = len_char.len_utf8();
    let digits_end = digits_start
        + s[digits_start..]
            .char_indices()
            .nth(len - 1)
            .map(|(i, c)| i + c.len_utf8())
            .ok_or_else(invalid)?;
    let digits = &s[digits_start..digits_end];
    let value = u32::from_str_radix(digits, 36).map_err(|_| invalid())?;
    Ok((value, &s[digits_end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Order;
    use crate::position::Position;
    use std::cmp::Ordering as O;

    #[test]
    fn sentinels_are_empty_and_tilde() {
        let min = AbsolutePosition { path: Default::default(), bunch_id: "ROOT".into(), inner_index: 0 };
        let max = AbsolutePosition { path: Default::default(), bunch_id: "ROOT".into(), inner_index: 1 };
        assert_eq!(encode(&min), "");
        assert_eq!(encode(&max), "~");
        assert_eq!(parse("").unwrap(), min);
        assert_eq!(parse("~").unwrap(), max);
    }

    #[test]
    fn round_trips_through_order() {
        let mut order = Order::new("alice").unwrap();
        let mut prev = Position::min();
        let max = Position::max();
        let mut lexes = Vec::new();
        for _ in 0..20 {
            let (pos, _) = order.create_positions(&prev, &max, 1).unwrap();
            let l = order.lex(&pos).unwrap();
            let parsed = order.parse_lex(&l).unwrap();
            assert_eq!(parsed, pos);
            lexes.push(l);
            prev = pos;
        }
        for w in lexes.windows(2) {
            assert_eq!(w[0].cmp(&w[1]), O::Less);
        }
    }

    #[test]
    fn lex_order_matches_compare_for_reused_bunch() {
        let mut order = Order::new("alice").unwrap();
        let (a, _) = order.create_positions(&Position::min(), &Position::max(), 1).unwrap();
        let (b, _) = order.create_positions(&a, &Position::max(), 1).unwrap();
        let la = order.lex(&a).unwrap();
        let lb = order.lex(&b).unwrap();
        assert_eq!(order.compare(&a, &b).unwrap(), O::Less);
        assert!(la < lb);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("not-a-lex-string-at-all-$$$").is_err());
        assert!(parse("9").is_err()); // claims 9 more digits follow but the string ends
    }
}

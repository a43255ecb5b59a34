//! Sparse item array: a run-length-encoded map from a
//! contiguous key space `0..len` to either "present with value" or
//! "deleted", generic over the "item" kind (an array of `T`, a text
//! substring, or a bare run-length count for Outline/PositionSet).
//!
//! Internally the array is a `Vec` of runs alternating `Present`/`Deleted`,
//! with adjacent same-kind runs always merged (so there is exactly one
//! canonical internal representation per logical content). `set`/`delete`
//! locate the runs touched by a linear scan, expected cheap in practice
//! because per-bunch run counts stay small (the whole point of bunch reuse
//! in `order.rs` is to keep single bunches mostly-contiguous), splice in
//! the new run, then re-merge any runs left newly adjacent by the edit.

pub mod indices;
pub mod text;
pub mod values;

use std::fmt;

/// The "present" payload kind a [`SparseArray`] stores. Three concrete
/// instantiations live in the sibling modules: [`values::ValuesKind`] for
/// `List`, [`text::TextKind`] for `Text`, and [`indices::IndicesKind`] for
/// `Outline`/`PositionSet` (where a present run carries no payload beyond
/// its own length).
pub trait ItemKind: Clone + fmt::Debug {
    /// A non-empty contiguous run of present items.
    type Item: Clone + fmt::Debug + PartialEq;

    /// Number of keys this item occupies. Must be `> 0` for any item
    /// actually stored in a run (empty items are never kept as their own
    /// run; they're simply absent).
    fn length(item: &Self::Item) -> usize;

    /// The sub-run covering keys `[start, end)` of `item` (0-indexed
    /// relative to the start of `item`, not the array).
    fn slice(item: &Self::Item, start: usize, end: usize) -> Self::Item;

    /// Concatenates two adjacent runs into one, preserving order.
    fn concat(a: Self::Item, b: Self::Item) -> Self::Item;
}

/// One run in the internal representation.
#[derive(Clone, Debug, PartialEq)]
enum Run<K: ItemKind> {
    Present(K::Item),
    Deleted(usize),
}

impl<K: ItemKind> Run<K> {
    fn len(&self) -> usize {
        match self {
            Run::Present(item) => K::length(item),
            Run::Deleted(n) => *n,
        }
    }

    fn is_present(&self) -> bool {
        matches!(self, Run::Present(_))
    }
}

/// One entry of the serialized (wire) form: `(T[] | number)*`
/// alternation, made explicit with a tag instead of relying on "value vs.
/// number" type-sniffing the way the untyped JS original does (Rust's
/// `Vec<T>` can't hold mixed element types). `serialize`/`deserialize` still
/// honor the documented semantics: strictly alternating runs, trailing
/// deletions omitted, a leading deletion run is representable directly
/// (rather than via a leading empty-present placeholder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde_crate::Serialize, serde_crate::Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "serde_crate"))]
pub enum SerializedRun<T> {
    Present(T),
    Deleted(usize),
}

/// A run-length-encoded sparse array `0..len -> Present(item) | Deleted`.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseArray<K: ItemKind> {
    runs: Vec<Run<K>>,
}

impl<K: ItemKind> Default for SparseArray<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ItemKind> SparseArray<K> {
    pub fn new() -> Self {
        SparseArray { runs: Vec::new() }
    }

    /// Total size of the key space covered (the highest key this array has
    /// ever been told about, plus one; equivalently the sum of all run
    /// lengths).
    pub fn len(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Locates the run containing `index`, returning `(run position in
    /// `self.runs`, key-offset of that run's start, offset of `index`
    /// within the run)`. If `index >= self.len()`, returns the
    /// one-past-the-end position with offset 0.
    fn locate(&self, index: usize) -> (usize, usize, usize) {
        let mut start = 0;
        for (i, run) in self.runs.iter().enumerate() {
            let len = run.len();
            if index < start + len {
                return (i, start, index - start);
            }
            start += len;
        }
        (self.runs.len(), start, 0)
    }

    /// Appends `run` to `runs` without merging, dropping it if empty. Used
    /// while assembling intermediate, possibly-non-canonical run lists;
    /// callers run [`canonicalize`](Self::canonicalize) before exposing the
    /// result.
    fn push_raw(runs: &mut Vec<Run<K>>, run: Run<K>) {
        if run.len() > 0 {
            runs.push(run);
        }
    }

    /// Merges adjacent same-kind runs in place. This is the only place
    /// `Present`+`Present` or `Deleted`+`Deleted` neighbors are collapsed,
    /// so it's safe to build up a run list with [`push_raw`](Self::push_raw)
    /// (which never merges) and canonicalize once at the end.
    fn canonicalize(runs: Vec<Run<K>>) -> Vec<Run<K>> {
        let mut out: Vec<Run<K>> = Vec::with_capacity(runs.len());
        for run in runs {
            match (out.last_mut(), run) {
                (Some(Run::Deleted(n)), Run::Deleted(m)) => *n += m,
                (Some(Run::Present(a)), Run::Present(b)) => {
                    *a = K::concat(a.clone(), b);
                }
                (_, run) => out.push(run),
            }
        }
        out
    }

    /// Overwrites `[index, index + K::length(&item))` with `item`, extending
    /// the array with an implicit deleted gap first if `index` is beyond
    /// the current length. Returns the overwritten content (present runs
    /// and deletion gaps alike) as its own `SparseArray`, reindexed to start
    /// at 0, useful for undo/merge.
    pub fn set(&mut self, index: usize, item: K::Item) -> SparseArray<K> {
        let write_len = K::length(&item);
        if write_len == 0 {
            return SparseArray::new();
        }
        self.splice(index, write_len, Some(Run::Present(item)))
    }

    /// Marks `[index, index + count)` deleted, extending the array first if
    /// necessary. Returns the overwritten content, same convention as
    /// [`set`](Self::set).
    pub fn delete(&mut self, index: usize, count: usize) -> SparseArray<K> {
        if count == 0 {
            return SparseArray::new();
        }
        self.splice(index, count, Some(Run::Deleted(count)))
    }

    /// Replaces `[index, index + remove_len)` with `insert` (or nothing, if
    /// `insert` is `None`), extending the array with an implicit deleted
    /// gap first if `index` is beyond the current length. Returns the
    /// replaced content, reindexed to start at 0.
    fn splice(&mut self, index: usize, remove_len: usize, insert: Option<Run<K>>) -> SparseArray<K> {
        let total = self.len();
        let mut before: Vec<Run<K>> = Vec::new();
        if index > total {
            Self::push_raw(&mut before, Run::Deleted(index - total));
        }

        let effective_total = total.max(index);
        let (start_run, _start_key, start_off) = self.locate(index.min(total));
        let (end_run, _end_key, end_off) = self.locate((index + remove_len).min(effective_total));

        let mut survivors_before: Vec<Run<K>> = self.runs[..start_run.min(self.runs.len())].to_vec();
        let mut replaced: Vec<Run<K>> = Vec::new();
        let mut survivors_after: Vec<Run<K>> = Vec::new();

        if start_run == end_run {
            if let Some(run) = self.runs.get(start_run) {
                match run {
                    Run::Present(item) => {
                        let item_len = K::length(item);
                        if start_off > 0 {
                            Self::push_raw(&mut survivors_before, Run::Present(K::slice(item, 0, start_off)));
                        }
                        Self::push_raw(
                            &mut replaced,
                            Run::Present(K::slice(item, start_off, end_off.min(item_len))),
                        );
                        if end_off < item_len {
                            Self::push_raw(&mut survivors_after, Run::Present(K::slice(item, end_off, item_len)));
                        }
                    }
                    Run::Deleted(n) => {
                        if start_off > 0 {
                            Self::push_raw(&mut survivors_before, Run::Deleted(start_off));
                        }
                        Self::push_raw(&mut replaced, Run::Deleted(end_off - start_off));
                        if end_off < *n {
                            Self::push_raw(&mut survivors_after, Run::Deleted(n - end_off));
                        }
                    }
                }
            }
        } else {
            if let Some(run) = self.runs.get(start_run) {
                match run {
                    Run::Present(item) => {
                        let item_len = K::length(item);
                        if start_off > 0 {
                            Self::push_raw(&mut survivors_before, Run::Present(K::slice(item, 0, start_off)));
                        }
                        Self::push_raw(&mut replaced, Run::Present(K::slice(item, start_off, item_len)));
                    }
                    Run::Deleted(n) => {
                        if start_off > 0 {
                            Self::push_raw(&mut survivors_before, Run::Deleted(start_off));
                        }
                        Self::push_raw(&mut replaced, Run::Deleted(n - start_off));
                    }
                }
            }

            for run in &self.runs[(start_run + 1).min(self.runs.len())..end_run.min(self.runs.len())] {
                Self::push_raw(&mut replaced, run.clone());
            }

            if let Some(run) = self.runs.get(end_run) {
                match run {
                    Run::Present(item) => {
                        if end_off > 0 {
                            Self::push_raw(&mut replaced, Run::Present(K::slice(item, 0, end_off)));
                        }
                        let item_len = K::length(item);
                        if end_off < item_len {
                            Self::push_raw(&mut survivors_after, Run::Present(K::slice(item, end_off, item_len)));
                        }
                    }
                    Run::Deleted(n) => {
                        if end_off > 0 {
                            Self::push_raw(&mut replaced, Run::Deleted(end_off));
                        }
                        if end_off < *n {
                            Self::push_raw(&mut survivors_after, Run::Deleted(n - end_off));
                        }
                    }
                }
            }
        }

        if end_run < self.runs.len() {
            survivors_after.extend(self.runs[end_run + 1..].iter().cloned());
        }

        let mut rebuilt = survivors_before;
        rebuilt.extend(before);
        if let Some(run) = insert {
            Self::push_raw(&mut rebuilt, run);
        }
        rebuilt.extend(survivors_after);

        self.runs = Self::canonicalize(rebuilt);
        SparseArray { runs: Self::canonicalize(replaced) }
    }

    /// The single-key item at `index`, if present (a length-1 slice of
    /// whatever run covers it).
    pub fn get(&self, index: usize) -> Option<K::Item> {
        let (run_idx, start, _) = self.locate(index);
        match self.runs.get(run_idx) {
            Some(Run::Present(item)) => {
                let offset = index - start;
                Some(K::slice(item, offset, offset + 1))
            }
            _ => None,
        }
    }

    pub fn has(&self, index: usize) -> bool {
        let (run_idx, _, _) = self.locate(index);
        matches!(self.runs.get(run_idx), Some(Run::Present(_)))
    }

    /// Number of present keys strictly before `index`.
    pub fn count_present_before(&self, index: usize) -> usize {
        let mut count = 0;
        let mut start = 0;
        for run in &self.runs {
            if start >= index {
                break;
            }
            let len = run.len();
            let covered = len.min(index - start);
            if run.is_present() {
                count += covered;
            }
            start += len;
        }
        count
    }

    /// Total number of present keys in the whole array.
    pub fn count_present(&self) -> usize {
        self.runs.iter().filter(|r| r.is_present()).map(Run::len).sum()
    }

    /// Iterates `(start_index, item)` for every present run, in ascending
    /// key order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &K::Item)> + '_ {
        let mut start = 0;
        self.runs.iter().filter_map(move |run| {
            let len = run.len();
            let this_start = start;
            start += len;
            match run {
                Run::Present(item) => Some((this_start, item)),
                Run::Deleted(_) => None,
            }
        })
    }

    /// Drops a trailing deletion run, shrinking `len()`.
    pub fn trim(&mut self) {
        if matches!(self.runs.last(), Some(Run::Deleted(_))) {
            self.runs.pop();
        }
    }

    /// Packed serialized form: present runs and deletion
    /// counts in order, trailing deletions omitted.
    pub fn serialize(&self) -> Vec<SerializedRun<K::Item>> {
        let mut runs = self.runs.clone();
        if matches!(runs.last(), Some(Run::Deleted(_))) {
            runs.pop();
        }
        runs.into_iter()
            .map(|r| match r {
                Run::Present(item) => SerializedRun::Present(item),
                Run::Deleted(n) => SerializedRun::Deleted(n),
            })
            .collect()
    }

    /// Inverse of [`serialize`](Self::serialize).
    pub fn deserialize(data: Vec<SerializedRun<K::Item>>) -> Self {
        let mut runs = Vec::with_capacity(data.len());
        for entry in data {
            let run = match entry {
                SerializedRun::Present(item) => Run::Present(item),
                SerializedRun::Deleted(n) => Run::Deleted(n),
            };
            Self::push_raw(&mut runs, run);
        }
        SparseArray { runs: Self::canonicalize(runs) }
    }
}

//! Client-side table sorting.
//!
//! Activating a column header sorts the rows of the table body by that
//! column. Every header remembers its own direction flag, which is inverted on
//! each activation. Cells are ordered per pair: two numeric cells compare as
//! numbers, any other pair compares as text.

use crate::numeric::to_number;
use std::cmp::Ordering;

/// Ordering key of one cell, decided independently for each side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellKey<'a> {
    Numeric(f64),
    Text(&'a str),
}

impl<'a> CellKey<'a> {
    /// Empty text never takes the numeric path, even though `Number("")` is 0.
    pub fn classify(text: &'a str) -> Self {
        if text.is_empty() {
            return CellKey::Text(text);
        }
        match to_number(text) {
            Some(n) => CellKey::Numeric(n),
            None => CellKey::Text(text),
        }
    }
}

/// Locale-aware string comparison used for non-numeric pairs.
pub trait TextOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Native stand-in for the browser's default collation: case-insensitive
/// first, lowercase before uppercase on a case-only difference, then code points.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldOrder;

impl TextOrder for CaseFoldOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let folded = a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase));
        folded
            .then_with(|| {
                a.chars()
                    .zip(b.chars())
                    .find(|(x, y)| x != y)
                    .map(|(x, y)| y.is_lowercase().cmp(&x.is_lowercase()))
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.cmp(b))
    }
}

impl<T: TextOrder + ?Sized> TextOrder for &T {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        (**self).compare(a, b)
    }
}

pub fn compare_cells(a: &str, b: &str, order: &impl TextOrder) -> Ordering {
    match (CellKey::classify(a), CellKey::classify(b)) {
        // Infinity - Infinity is NaN in the browser, which the sort treats as a tie
        (CellKey::Numeric(x), CellKey::Numeric(y)) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        _ => order.compare(a, b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn from_ascending(asc: bool) -> Self {
        if asc {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Direction::Ascending
    }
}

/// A row that can be sorted by the text of one of its cells.
pub trait SortRow {
    fn cell_text(&self, column: usize) -> Option<&str>;
}

impl SortRow for Vec<String> {
    fn cell_text(&self, column: usize) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

/// Row comparator for `column`. Descending swaps the rows before comparing
/// instead of negating the result.
pub fn comparer<R: SortRow, O: TextOrder>(
    column: usize,
    direction: Direction,
    order: O,
) -> impl Fn(&R, &R) -> Ordering {
    move |a: &R, b: &R| {
        let (first, second) = if direction.is_ascending() { (a, b) } else { (b, a) };
        compare_cells(
            first.cell_text(column).unwrap_or(""),
            second.cell_text(column).unwrap_or(""),
            &order,
        )
    }
}

// runs at or below this length are insertion sorted
const INSERTION_RUN: usize = 20;

/// Stable in-place sort of `rows` by `column`.
///
/// Per-pair classification is not a total order ("9" < "10" < "1a" < "9"), so
/// this uses a merge sort that accepts any comparator instead of `slice::sort_by`.
pub fn sort_rows<R: SortRow>(
    rows: &mut [R],
    column: usize,
    direction: Direction,
    order: &impl TextOrder,
) {
    let cmp = comparer(column, direction, order);
    let mut perm: Vec<usize> = (0..rows.len()).collect();
    let mut scratch = Vec::with_capacity(rows.len());
    merge_sort(&mut perm, &mut scratch, &|a: usize, b: usize| cmp(&rows[a], &rows[b]));
    apply_permutation(rows, perm);
}

fn merge_sort(
    idx: &mut [usize],
    scratch: &mut Vec<usize>,
    cmp: &dyn Fn(usize, usize) -> Ordering,
) {
    if idx.len() <= INSERTION_RUN {
        for i in 1..idx.len() {
            let mut j = i;
            while j > 0 && cmp(idx[j - 1], idx[j]) == Ordering::Greater {
                idx.swap(j - 1, j);
                j -= 1;
            }
        }
        return;
    }
    let mid = idx.len() / 2;
    merge_sort(&mut idx[..mid], scratch, cmp);
    merge_sort(&mut idx[mid..], scratch, cmp);

    scratch.clear();
    let (mut l, mut r) = (0, mid);
    while l < mid && r < idx.len() {
        // ties take the left side
        if cmp(idx[r], idx[l]) == Ordering::Less {
            scratch.push(idx[r]);
            r += 1;
        } else {
            scratch.push(idx[l]);
            l += 1;
        }
    }
    scratch.extend_from_slice(&idx[l..mid]);
    scratch.extend_from_slice(&idx[r..]);
    idx.copy_from_slice(scratch);
}

// perm[k] is the current index of the row that belongs at position k
fn apply_permutation<R>(rows: &mut [R], mut perm: Vec<usize>) {
    for start in 0..perm.len() {
        let mut cur = start;
        while perm[cur] != cur {
            let src = perm[cur];
            perm[cur] = cur;
            if src == start {
                break;
            }
            rows.swap(cur, src);
            cur = src;
        }
    }
}

/// Per-header direction flags, one entry per header created on first activation.
#[derive(Debug, Clone)]
pub struct SortState<K> {
    entries: Vec<(K, bool)>,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq> SortState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invert the header's stored flag (initially false) and return the new one
    /// as the direction: the first activation sorts ascending.
    pub fn toggle(&mut self, header: K) -> Direction {
        let asc = match self.entries.iter_mut().find(|(k, _)| *k == header) {
            Some((_, flag)) => {
                *flag = !*flag;
                *flag
            }
            None => {
                self.entries.push((header, true));
                true
            }
        };
        Direction::from_ascending(asc)
    }

    /// Direction of the last activation of `header`, if any.
    pub fn direction(&self, header: &K) -> Option<Direction> {
        self.entries
            .iter()
            .find(|(k, _)| k == header)
            .map(|(_, asc)| Direction::from_ascending(*asc))
    }

    /// Keep only the headers for which `keep` holds, e.g. those still on the page.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.entries.retain(|(k, _)| keep(k));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sort engine for the tables of one page.
#[derive(Debug, Clone, Default)]
pub struct TableSorter<K, O = CaseFoldOrder> {
    state: SortState<K>,
    order: O,
}

impl<K: PartialEq, O: TextOrder> TableSorter<K, O> {
    pub fn with_order(order: O) -> Self {
        Self {
            state: SortState::default(),
            order,
        }
    }

    pub fn state_mut(&mut self) -> &mut SortState<K> {
        &mut self.state
    }

    /// Handle activation of `header`, which sits at `column` among its siblings.
    pub fn activate<R: SortRow>(
        &mut self,
        header: K,
        column: usize,
        rows: &mut [R],
    ) -> Direction {
        let direction = self.state.toggle(header);
        log::debug!(
            "sorting {} rows by column {} {:?}",
            rows.len(),
            column,
            direction
        );
        sort_rows(rows, column, direction, &self.order);
        direction
    }
}

#![forbid(unsafe_code)]

//! Named areas derived from a [`GridTemplate`].
//!
//! # Bounds
//!
//! For each distinct name token the scan runs top to bottom:
//!
//! - `first_row` is the first row containing the name, `last_row` the last.
//!   Rows in between need not contain it.
//! - `first_column` / `last_column` are the leftmost and rightmost positions
//!   of the name on the first row that contains it.
//!
//! For a name that occupies a rectangle this is exactly the rectangle. For
//! anything else the bounds are permissive; [`AreaScan::rectangularity`]
//! reports the difference.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Cell;
use crate::template::{GridTemplate, Token};

/// Row/column bounds of one named area. All indices are zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedArea {
    pub first_row: usize,
    pub last_row: usize,
    pub first_column: usize,
    pub last_column: usize,
}

impl NamedArea {
    #[inline]
    #[must_use]
    pub const fn new(
        first_row: usize,
        last_row: usize,
        first_column: usize,
        last_column: usize,
    ) -> Self {
        Self {
            first_row,
            last_row,
            first_column,
            last_column,
        }
    }

    /// Single-cell area.
    #[inline]
    #[must_use]
    pub const fn cell(row: usize, column: usize) -> Self {
        Self::new(row, row, column, column)
    }

    #[inline]
    pub const fn rowspan(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    #[inline]
    pub const fn columnspan(&self) -> usize {
        self.last_column - self.first_column + 1
    }

    #[inline]
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.first_row..=self.last_row
    }

    #[inline]
    pub fn columns(&self) -> RangeInclusive<usize> {
        self.first_column..=self.last_column
    }

    #[inline]
    pub fn contains(&self, (row, column): Cell) -> bool {
        self.rows().contains(&row) && self.columns().contains(&column)
    }
}

/// Mapping from area name to bounds. Iterates in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridAreas {
    areas: BTreeMap<String, NamedArea>,
}

impl GridAreas {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&NamedArea> {
        self.areas.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.areas.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.areas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamedArea)> + '_ {
        self.areas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Min/max occupied row and column across all areas, `None` when empty.
    pub fn limits(&self) -> Option<GridLimits> {
        let mut values = self.areas.values();
        let first = values.next()?;
        let init = GridLimits {
            min_row: first.first_row,
            max_row: first.last_row,
            min_column: first.first_column,
            max_column: first.last_column,
        };
        Some(values.fold(init, |acc, a| GridLimits {
            min_row: acc.min_row.min(a.first_row),
            max_row: acc.max_row.max(a.last_row),
            min_column: acc.min_column.min(a.first_column),
            max_column: acc.max_column.max(a.last_column),
        }))
    }
}

impl FromIterator<(String, NamedArea)> for GridAreas {
    fn from_iter<T: IntoIterator<Item = (String, NamedArea)>>(iter: T) -> Self {
        Self {
            areas: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GridAreas {
    type Item = (&'a String, &'a NamedArea);
    type IntoIter = std::collections::btree_map::Iter<'a, String, NamedArea>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.iter()
    }
}

/// Extent of the occupied part of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLimits {
    pub min_row: usize,
    pub max_row: usize,
    pub min_column: usize,
    pub max_column: usize,
}

impl GridLimits {
    #[inline]
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.min_row..=self.max_row
    }

    #[inline]
    pub fn columns(&self) -> RangeInclusive<usize> {
        self.min_column..=self.max_column
    }
}

/// Per-track resize weights. Zero means "keep natural size".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandWeights {
    pub rows: Vec<u16>,
    pub columns: Vec<u16>,
}

impl ExpandWeights {
    /// Give `weight` to every track inside `limits`, zero to the rest.
    #[must_use]
    pub fn from_limits(
        limits: Option<GridLimits>,
        row_count: usize,
        column_count: usize,
        weight: u16,
    ) -> Self {
        let mut rows = vec![0; row_count];
        let mut columns = vec![0; column_count];
        if let Some(limits) = limits {
            for r in limits.rows().filter(|&r| r < row_count) {
                rows[r] = weight;
            }
            for c in limits.columns().filter(|&c| c < column_count) {
                columns[c] = weight;
            }
        }
        Self { rows, columns }
    }

    #[inline]
    pub fn row(&self, index: usize) -> u16 {
        self.rows.get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub fn column(&self, index: usize) -> u16 {
        self.columns.get(index).copied().unwrap_or(0)
    }
}

/// Cells of an area that break its bounding rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangularityIssue {
    pub name: String,
    /// Inside the bounds but carrying another token.
    pub missing: Vec<Cell>,
    /// Carrying the name but outside the bounds.
    pub outside: Vec<Cell>,
}

/// Output of scanning a template: area bounds plus every occupied cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaScan {
    pub areas: GridAreas,
    cells: BTreeMap<String, Vec<Cell>>,
}

impl AreaScan {
    /// Scan `template` and derive bounds for each name.
    #[must_use]
    pub fn scan(template: &GridTemplate) -> Self {
        let mut found: FxHashMap<&str, (NamedArea, Vec<Cell>)> = FxHashMap::default();

        for (r, row) in template.rows().enumerate() {
            for (c, token) in row.iter().enumerate() {
                let Some(name) = Token::classify(token).name() else {
                    continue;
                };
                let (area, cells) = found
                    .entry(name)
                    .or_insert_with(|| (NamedArea::cell(r, c), Vec::new()));
                if area.first_row == r {
                    // Columns come from the first row only; scanning left to
                    // right makes the latest hit the rightmost one.
                    area.last_column = c;
                }
                area.last_row = r;
                cells.push((r, c));
            }
        }

        let mut areas = BTreeMap::new();
        let mut cells = BTreeMap::new();
        for (name, (area, occupied)) in found {
            areas.insert(name.to_owned(), area);
            cells.insert(name.to_owned(), occupied);
        }
        Self {
            areas: GridAreas { areas },
            cells,
        }
    }

    /// Cells carrying `name`, in row-major order.
    pub fn cells(&self, name: &str) -> Option<&[Cell]> {
        self.cells.get(name).map(Vec::as_slice)
    }

    /// Areas whose occupied cells differ from their bounding rectangle.
    #[must_use]
    pub fn rectangularity(&self) -> Vec<RectangularityIssue> {
        let mut issues = Vec::new();
        for (name, area) in self.areas.iter() {
            let occupied = self.cells.get(name).map(Vec::as_slice).unwrap_or_default();
            let outside: Vec<Cell> = occupied
                .iter()
                .copied()
                .filter(|&cell| !area.contains(cell))
                .collect();
            let missing: Vec<Cell> = area
                .rows()
                .flat_map(|r| area.columns().map(move |c| (r, c)))
                .filter(|cell| occupied.binary_search(cell).is_err())
                .collect();
            if !missing.is_empty() || !outside.is_empty() {
                issues.push(RectangularityIssue {
                    name: name.to_owned(),
                    missing,
                    outside,
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(rows: &[&str]) -> AreaScan {
        AreaScan::scan(&GridTemplate::parse(rows).unwrap())
    }

    #[test]
    fn spans() {
        let a = NamedArea::new(1, 2, 0, 1);
        assert_eq!(a.rowspan(), 2);
        assert_eq!(a.columnspan(), 2);
        assert!(a.contains((2, 1)));
        assert!(!a.contains((0, 1)));
        assert_eq!(NamedArea::cell(3, 4), NamedArea::new(3, 3, 4, 4));
    }

    #[test]
    fn dashboard_layout() {
        let s = scan(&[
            "check   data_gen   info",
            "tree   tree   data",
            "tree   tree   plot",
        ]);
        let a = &s.areas;
        assert_eq!(a.len(), 6);
        assert_eq!(a.get("check"), Some(&NamedArea::new(0, 0, 0, 0)));
        assert_eq!(a.get("data_gen"), Some(&NamedArea::new(0, 0, 1, 1)));
        assert_eq!(a.get("info"), Some(&NamedArea::new(0, 0, 2, 2)));
        assert_eq!(a.get("tree"), Some(&NamedArea::new(1, 2, 0, 1)));
        assert_eq!(a.get("data"), Some(&NamedArea::new(1, 1, 2, 2)));
        assert_eq!(a.get("plot"), Some(&NamedArea::new(2, 2, 2, 2)));
        assert!(s.rectangularity().is_empty());
    }

    #[test]
    fn fill_tokens_are_skipped() {
        let s = scan(&[".  section1", "section2   ."]);
        assert_eq!(s.areas.len(), 2);
        assert_eq!(s.areas.get("section1"), Some(&NamedArea::new(0, 0, 1, 1)));
        assert_eq!(s.areas.get("section2"), Some(&NamedArea::new(1, 1, 0, 0)));
        assert!(!s.areas.contains("."));
    }

    #[test]
    fn rows_between_need_not_contain_name() {
        let s = scan(&["a", ".", "a"]);
        assert_eq!(s.areas.get("a"), Some(&NamedArea::new(0, 2, 0, 0)));
        let issues = s.rectangularity();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].missing, vec![(1, 0)]);
        assert!(issues[0].outside.is_empty());
    }

    #[test]
    fn columns_come_from_first_row() {
        // Row 1 widens `x`, but the bounds keep row 0's column extent.
        let s = scan(&["x . .", "x x x"]);
        assert_eq!(s.areas.get("x"), Some(&NamedArea::new(0, 1, 0, 0)));
        let issues = s.rectangularity();
        assert_eq!(issues[0].outside, vec![(1, 1), (1, 2)]);
        assert_eq!(s.cells("x"), Some(&[(0, 0), (1, 0), (1, 1), (1, 2)][..]));
    }

    #[test]
    fn gap_within_first_row_is_spanned() {
        let s = scan(&["a b a"]);
        assert_eq!(s.areas.get("a"), Some(&NamedArea::new(0, 0, 0, 2)));
        assert_eq!(s.rectangularity()[0].missing, vec![(0, 1)]);
    }

    #[test]
    fn limits_cover_all_areas() {
        let s = scan(&[". . .", ". a .", ". . b"]);
        let limits = s.areas.limits().unwrap();
        assert_eq!(limits.rows(), 1..=2);
        assert_eq!(limits.columns(), 1..=2);
        assert!(GridAreas::new().limits().is_none());
    }

    #[test]
    fn expand_weights_mark_occupied_span() {
        let s = scan(&[". . .", ". a .", ". . b"]);
        let w = ExpandWeights::from_limits(s.areas.limits(), 3, 3, 1);
        assert_eq!(w.rows, vec![0, 1, 1]);
        assert_eq!(w.columns, vec![0, 1, 1]);
        assert_eq!(w.row(9), 0);

        let none = ExpandWeights::from_limits(None, 2, 2, 5);
        assert_eq!(none.rows, vec![0, 0]);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let s = scan(&["zeta alpha mid"]);
        let names: Vec<_> = s.areas.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn areas_serialize_as_map() {
        let s = scan(&["b1", "b1"]);
        let json = serde_json::to_string(&s.areas).unwrap();
        assert_eq!(
            json,
            r#"{"b1":{"first_row":0,"last_row":1,"first_column":0,"last_column":0}}"#
        );
    }
}

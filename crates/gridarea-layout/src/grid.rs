#![forbid(unsafe_code)]

//! Track solver: turns a resolved template into rectangles.
//!
//! Each row and column is a [`Track`] with a minimum size and an expand
//! weight. Splitting a container:
//!
//! 1. gives every track its minimum, clamped to what is left;
//! 2. shares the leftover among weighted tracks in proportion to weight,
//!    handing rounding remainders to the earliest weighted tracks.
//!
//! With no weighted track the leftover stays unused.
//!
//! # Example
//!
//! ```
//! use gridarea_core::geometry::Rect;
//! use gridarea_layout::{AreaGrid, GridAreaResolver};
//!
//! let mut resolver = GridAreaResolver::new();
//! resolver.configure(["header header", "side main"])?;
//!
//! let layout = AreaGrid::from_resolver(&resolver).split(Rect::new(0, 0, 80, 24));
//! let header = layout.area("header").unwrap();
//! assert_eq!(header.width, 80);
//! # Ok::<(), gridarea_layout::LayoutError>(())
//! ```

use gridarea_core::geometry::Rect;

use crate::area::{GridAreas, NamedArea};
use crate::resolver::GridAreaResolver;

/// One row or column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Track {
    /// Size granted before any leftover is shared.
    pub min: u16,
    /// Share of the leftover; zero keeps the track at `min`.
    pub weight: u16,
}

impl Track {
    #[inline]
    #[must_use]
    pub const fn fixed(size: u16) -> Self {
        Self {
            min: size,
            weight: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn weighted(min: u16, weight: u16) -> Self {
        Self { min, weight }
    }
}

/// Distribute `available` cells across `tracks`.
///
/// The result has one entry per track and never sums past `available`.
#[must_use]
pub fn solve_tracks(tracks: &[Track], available: u16) -> Vec<u16> {
    let mut sizes = Vec::with_capacity(tracks.len());
    let mut remaining = available;
    for track in tracks {
        let size = track.min.min(remaining);
        sizes.push(size);
        remaining -= size;
    }

    let total_weight: u64 = tracks.iter().map(|t| u64::from(t.weight)).sum();
    if remaining == 0 || total_weight == 0 {
        return sizes;
    }

    let pool = u64::from(remaining);
    let mut distributed = 0u64;
    for (size, track) in sizes.iter_mut().zip(tracks) {
        let share = pool * u64::from(track.weight) / total_weight;
        // share <= pool <= u16::MAX and size + pool <= available.
        *size += share as u16;
        distributed += share;
    }

    let mut leftover = pool - distributed;
    for (size, track) in sizes.iter_mut().zip(tracks) {
        if leftover == 0 {
            break;
        }
        if track.weight > 0 {
            *size += 1;
            leftover -= 1;
        }
    }

    sizes
}

/// A 2D grid of tracks with named areas.
#[derive(Debug, Clone, Default)]
pub struct AreaGrid {
    rows: Vec<Track>,
    columns: Vec<Track>,
    row_gap: u16,
    col_gap: u16,
    areas: GridAreas,
}

/// Result of splitting an [`AreaGrid`].
#[derive(Debug, Clone)]
pub struct AreaLayout {
    row_heights: Vec<u16>,
    col_widths: Vec<u16>,
    row_positions: Vec<u16>,
    col_positions: Vec<u16>,
    areas: GridAreas,
    row_gap: u16,
    col_gap: u16,
    /// Container the layout was split from; every rect is clipped to it.
    bounds: Rect,
}

impl AreaGrid {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks, gaps and areas taken from a configured resolver.
    ///
    /// Every track gets the configured minimum; tracks inside the grid
    /// limits also get the configured expand weight.
    #[must_use]
    pub fn from_resolver(resolver: &GridAreaResolver) -> Self {
        let config = resolver.config();
        let weights = resolver.expand_weights();
        Self {
            rows: weights
                .rows
                .iter()
                .map(|&w| Track::weighted(config.min_row_height, w))
                .collect(),
            columns: weights
                .columns
                .iter()
                .map(|&w| Track::weighted(config.min_col_width, w))
                .collect(),
            row_gap: config.row_gap,
            col_gap: config.col_gap,
            areas: resolver.areas().clone(),
        }
    }

    #[must_use]
    pub fn rows(mut self, tracks: impl IntoIterator<Item = Track>) -> Self {
        self.rows = tracks.into_iter().collect();
        self
    }

    #[must_use]
    pub fn columns(mut self, tracks: impl IntoIterator<Item = Track>) -> Self {
        self.columns = tracks.into_iter().collect();
        self
    }

    #[must_use]
    pub fn row_gap(mut self, gap: u16) -> Self {
        self.row_gap = gap;
        self
    }

    #[must_use]
    pub fn col_gap(mut self, gap: u16) -> Self {
        self.col_gap = gap;
        self
    }

    /// Set uniform gap for both rows and columns.
    #[must_use]
    pub fn gap(self, gap: u16) -> Self {
        self.row_gap(gap).col_gap(gap)
    }

    #[must_use]
    pub fn areas(mut self, areas: GridAreas) -> Self {
        self.areas = areas;
        self
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Split `area` into track sizes and positions.
    pub fn split(&self, area: Rect) -> AreaLayout {
        let num_rows = self.rows.len();
        let num_cols = self.columns.len();

        if num_rows == 0 || num_cols == 0 || area.is_empty() {
            return AreaLayout {
                row_heights: vec![0; num_rows],
                col_widths: vec![0; num_cols],
                row_positions: vec![area.y; num_rows],
                col_positions: vec![area.x; num_cols],
                areas: self.areas.clone(),
                row_gap: self.row_gap,
                col_gap: self.col_gap,
                bounds: area,
            };
        }

        let available_height = area.height.saturating_sub(total_gap(num_rows, self.row_gap));
        let available_width = area.width.saturating_sub(total_gap(num_cols, self.col_gap));

        let row_heights = solve_tracks(&self.rows, available_height);
        let col_widths = solve_tracks(&self.columns, available_width);

        let row_positions = positions(&row_heights, area.y, area.bottom(), self.row_gap);
        let col_positions = positions(&col_widths, area.x, area.right(), self.col_gap);

        AreaLayout {
            row_heights,
            col_widths,
            row_positions,
            col_positions,
            areas: self.areas.clone(),
            row_gap: self.row_gap,
            col_gap: self.col_gap,
            bounds: area,
        }
    }
}

fn total_gap(tracks: usize, gap: u16) -> u16 {
    if tracks > 1 {
        let gaps = (tracks - 1) as u64;
        (gaps * u64::from(gap)).min(u64::from(u16::MAX)) as u16
    } else {
        0
    }
}

/// Cumulative start positions from sizes, never past `end`.
fn positions(sizes: &[u16], start: u16, end: u16, gap: u16) -> Vec<u16> {
    let mut out = Vec::with_capacity(sizes.len());
    let mut pos = start;
    for (i, &size) in sizes.iter().enumerate() {
        out.push(pos.min(end));
        pos = pos.saturating_add(size);
        if i + 1 < sizes.len() {
            pos = pos.saturating_add(gap);
        }
    }
    out
}

impl AreaLayout {
    /// Rectangle for one cell; empty if out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Rect {
        self.span(row, col, 1, 1)
    }

    /// Rectangle covering `rowspan` x `colspan` cells from `(row, col)`.
    ///
    /// Spans past the grid edge are clamped.
    pub fn span(&self, row: usize, col: usize, rowspan: usize, colspan: usize) -> Rect {
        let rowspan = rowspan.max(1);
        let colspan = colspan.max(1);

        if row >= self.row_heights.len() || col >= self.col_widths.len() {
            return Rect::default();
        }

        let end_row = (row + rowspan).min(self.row_heights.len());
        let end_col = (col + colspan).min(self.col_widths.len());

        let x = self.col_positions[col];
        let y = self.row_positions[row];
        // Gaps can outgrow a tiny container; clip to it.
        let width = extent(&self.col_widths[col..end_col], self.col_gap)
            .min(self.bounds.right().saturating_sub(x));
        let height = extent(&self.row_heights[row..end_row], self.row_gap)
            .min(self.bounds.bottom().saturating_sub(y));

        Rect::new(x, y, width, height)
    }

    /// Rectangle for a named area, `None` if the template lacks it.
    pub fn area(&self, name: &str) -> Option<Rect> {
        self.areas.get(name).map(|a| self.area_rect(a))
    }

    /// All named areas with their rectangles, in name order.
    pub fn iter_areas(&self) -> impl Iterator<Item = (&str, Rect)> + '_ {
        self.areas.iter().map(|(name, a)| (name, self.area_rect(a)))
    }

    fn area_rect(&self, a: &NamedArea) -> Rect {
        self.span(a.first_row, a.first_column, a.rowspan(), a.columnspan())
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.row_heights.len()
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.col_widths.len()
    }

    #[inline]
    pub fn row_height(&self, row: usize) -> u16 {
        self.row_heights.get(row).copied().unwrap_or(0)
    }

    #[inline]
    pub fn col_width(&self, col: usize) -> u16 {
        self.col_widths.get(col).copied().unwrap_or(0)
    }

    /// Iterate over all cells, yielding (row, col, Rect).
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Rect)> + '_ {
        let num_rows = self.num_rows();
        let num_cols = self.num_cols();
        (0..num_rows)
            .flat_map(move |row| (0..num_cols).map(move |col| (row, col, self.cell(row, col))))
    }
}

/// Sum of sizes plus the gaps between them.
fn extent(sizes: &[u16], gap: u16) -> u16 {
    let total = sizes.iter().fold(0u16, |acc, &s| acc.saturating_add(s));
    let gaps = sizes.len().saturating_sub(1) as u16;
    total.saturating_add(gap.saturating_mul(gaps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn solve_gives_minimums_first() {
        let sizes = solve_tracks(&[Track::fixed(10), Track::fixed(10)], 15);
        assert_eq!(sizes, vec![10, 5]);
    }

    #[test]
    fn solve_shares_leftover_by_weight() {
        let sizes = solve_tracks(
            &[Track::fixed(10), Track::weighted(0, 1), Track::weighted(0, 3)],
            50,
        );
        assert_eq!(sizes, vec![10, 10, 30]);
    }

    #[test]
    fn solve_remainder_goes_to_earliest_weighted() {
        let sizes = solve_tracks(
            &[Track::fixed(1), Track::weighted(1, 1), Track::weighted(1, 1)],
            8,
        );
        // 5 left over: 2 + 2, remainder 1 to the first weighted track.
        assert_eq!(sizes, vec![1, 4, 3]);
    }

    #[test]
    fn solve_without_weights_leaves_space() {
        let sizes = solve_tracks(&[Track::fixed(2), Track::fixed(3)], 100);
        assert_eq!(sizes, vec![2, 3]);
    }

    #[test]
    fn solve_empty() {
        assert!(solve_tracks(&[], 10).is_empty());
    }

    #[test]
    fn empty_grid() {
        let layout = AreaGrid::new().split(Rect::new(0, 0, 100, 50));
        assert_eq!(layout.num_rows(), 0);
        assert_eq!(layout.num_cols(), 0);
    }

    #[test]
    fn simple_2x2_grid() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(10), Track::fixed(10)])
            .columns([Track::fixed(20), Track::fixed(20)]);
        let layout = grid.split(Rect::new(0, 0, 100, 50));

        assert_eq!(layout.cell(0, 0), Rect::new(0, 0, 20, 10));
        assert_eq!(layout.cell(0, 1), Rect::new(20, 0, 20, 10));
        assert_eq!(layout.cell(1, 0), Rect::new(0, 10, 20, 10));
        assert_eq!(layout.cell(1, 1), Rect::new(20, 10, 20, 10));
    }

    #[test]
    fn gaps_offset_cells_and_join_spans() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(10), Track::fixed(10)])
            .columns([Track::fixed(20), Track::fixed(20)])
            .row_gap(2)
            .col_gap(5);
        let layout = grid.split(Rect::new(0, 0, 100, 50));

        assert_eq!(layout.cell(1, 1), Rect::new(25, 12, 20, 10));
        let full = layout.span(0, 0, 2, 2);
        assert_eq!((full.width, full.height), (45, 22));
    }

    #[test]
    fn uniform_gap_sets_both() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(10), Track::fixed(10)])
            .columns([Track::fixed(20), Track::fixed(20)])
            .gap(3);
        let layout = grid.split(Rect::new(0, 0, 100, 50));
        assert_eq!(layout.cell(0, 1).x, 23);
        assert_eq!(layout.cell(1, 0).y, 13);
    }

    #[test]
    fn out_of_bounds_cell_is_empty_and_span_clamps() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(4), Track::fixed(6)])
            .columns([Track::fixed(8), Track::fixed(12)]);
        let layout = grid.split(Rect::new(0, 0, 40, 20));

        assert_eq!(layout.cell(5, 0), Rect::default());
        assert_eq!(layout.span(1, 1, 5, 5), Rect::new(8, 4, 12, 6));
        assert_eq!(layout.row_height(99), 0);
        assert_eq!(layout.col_width(99), 0);
    }

    #[test]
    fn tiny_area_with_gaps_produces_zero_tracks() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(1), Track::fixed(1)])
            .columns([Track::fixed(1), Track::fixed(1)])
            .gap(2);
        let area = Rect::new(0, 0, 1, 1);
        let layout = grid.split(area);

        assert_eq!(layout.row_height(0), 0);
        assert_eq!(layout.col_width(1), 0);
        let span = layout.span(0, 0, 2, 2);
        assert!(area.contains_rect(&span), "{span:?}");
        assert!(area.contains_rect(&layout.cell(1, 1)));
    }

    #[test]
    fn zero_area_produces_empty_cells() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(10)])
            .columns([Track::fixed(20)]);
        let layout = grid.split(Rect::new(3, 4, 0, 0));
        assert_eq!(layout.cell(0, 0), Rect::new(3, 4, 0, 0));
    }

    #[test]
    fn offset_area() {
        let grid = AreaGrid::new()
            .rows([Track::fixed(10)])
            .columns([Track::fixed(20)]);
        let layout = grid.split(Rect::new(10, 5, 100, 50));
        assert_eq!(layout.cell(0, 0), Rect::new(10, 5, 20, 10));
    }

    #[test]
    fn dashboard_from_resolver() {
        let mut resolver = GridAreaResolver::new();
        resolver
            .configure([
                "check   data_gen   info",
                "tree   tree   data",
                "tree   tree   plot",
            ])
            .unwrap();
        let layout = AreaGrid::from_resolver(&resolver).split(Rect::new(0, 0, 90, 30));

        // Every row and column is weighted equally.
        assert_eq!(layout.area("check"), Some(Rect::new(0, 0, 30, 10)));
        assert_eq!(layout.area("tree"), Some(Rect::new(0, 10, 60, 20)));
        assert_eq!(layout.area("plot"), Some(Rect::new(60, 20, 30, 10)));
        assert_eq!(layout.area("nope"), None);
        assert_eq!(layout.iter_areas().count(), 6);
    }

    #[test]
    fn unoccupied_edges_keep_minimum() {
        let config = LayoutConfig {
            min_row_height: 2,
            min_col_width: 3,
            ..LayoutConfig::default()
        };
        let mut resolver = GridAreaResolver::with_config(config);
        resolver.configure([". . .", ". hero .", ". . ."]).unwrap();
        let layout = AreaGrid::from_resolver(&resolver).split(Rect::new(0, 0, 40, 20));

        assert_eq!(layout.row_height(0), 2);
        assert_eq!(layout.row_height(2), 2);
        assert_eq!(layout.col_width(0), 3);
        assert_eq!(layout.area("hero"), Some(Rect::new(3, 2, 34, 16)));
    }

    #[test]
    fn cells_stay_inside_area() {
        let area = Rect::new(10, 20, 80, 60);
        let grid = AreaGrid::new()
            .rows([Track::fixed(15), Track::weighted(10, 1), Track::fixed(15)])
            .columns([Track::fixed(20), Track::weighted(20, 2), Track::fixed(20)])
            .row_gap(2)
            .col_gap(3);
        let layout = grid.split(area);
        for (row, col, cell) in layout.iter_cells() {
            assert!(area.contains_rect(&cell), "cell ({row},{col}) {cell:?} escapes {area:?}");
        }
    }
}

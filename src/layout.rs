// src/layout.rs

//! Serpentine wiring layouts: the mapping between a crate's 2D pixel
//! grid and the 1D order of LEDs on its wire chain.
//!
//! A physical panel is wired boustrophedon-style: the strip runs along
//! one line of the grid, then doubles back along the next, so the
//! secondary-axis direction flips on every primary line. Eight layouts
//! cover the combinations of primary scan axis (rows or columns),
//! primary direction, and the starting direction on the first line.
//!
//! The layouts keep their historical user-facing names `Layout1` through
//! `Layout8`; [`Layout::from_name`] is the only place those strings are
//! interpreted, so an unknown name is rejected at the input boundary and
//! is unrepresentable past it.

use log::trace;
use serde::{Deserialize, Serialize};

/// One of the 8 named serpentine wiring layouts.
///
/// Variant names describe the traversal: the primary scan axis and its
/// direction, then the secondary-axis direction on the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// `Layout1`: rows scanned bottom to top, first row left to right.
    #[serde(rename = "Layout1")]
    RowsUpStartLeft,
    /// `Layout2`: rows scanned top to bottom, first row left to right.
    #[serde(rename = "Layout2")]
    RowsDownStartLeft,
    /// `Layout3`: rows scanned top to bottom, first row right to left.
    #[serde(rename = "Layout3")]
    RowsDownStartRight,
    /// `Layout4`: rows scanned bottom to top, first row right to left.
    #[serde(rename = "Layout4")]
    RowsUpStartRight,
    /// `Layout5`: columns scanned left to right, first column bottom to top.
    #[serde(rename = "Layout5")]
    ColsRightStartBottom,
    /// `Layout6`: columns scanned left to right, first column top to bottom.
    #[serde(rename = "Layout6")]
    ColsRightStartTop,
    /// `Layout7`: columns scanned right to left, first column top to bottom.
    #[serde(rename = "Layout7")]
    ColsLeftStartTop,
    /// `Layout8`: columns scanned right to left, first column bottom to top.
    #[serde(rename = "Layout8")]
    ColsLeftStartBottom,
}

impl Default for Layout {
    /// `Layout1`, the default selection in the wall-creation form.
    fn default() -> Self {
        Layout::RowsUpStartLeft
    }
}

/// All layouts in menu order.
pub const ALL_LAYOUTS: [Layout; 8] = [
    Layout::RowsUpStartLeft,
    Layout::RowsDownStartLeft,
    Layout::RowsDownStartRight,
    Layout::RowsUpStartRight,
    Layout::ColsRightStartBottom,
    Layout::ColsRightStartTop,
    Layout::ColsLeftStartTop,
    Layout::ColsLeftStartBottom,
];

impl Layout {
    /// The user-facing name, `"Layout1"` through `"Layout8"`.
    pub fn name(self) -> &'static str {
        match self {
            Layout::RowsUpStartLeft => "Layout1",
            Layout::RowsDownStartLeft => "Layout2",
            Layout::RowsDownStartRight => "Layout3",
            Layout::RowsUpStartRight => "Layout4",
            Layout::ColsRightStartBottom => "Layout5",
            Layout::ColsRightStartTop => "Layout6",
            Layout::ColsLeftStartTop => "Layout7",
            Layout::ColsLeftStartBottom => "Layout8",
        }
    }

    /// Resolves a user-supplied layout name. `None` for anything that is
    /// not one of the 8 known names; callers reject that input.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_LAYOUTS.iter().copied().find(|l| l.name() == name)
    }

    /// Computes the wire index of every grid cell.
    ///
    /// Returns one entry per row-major cell: element `row * width + col`
    /// is the position of that cell in the wire chain. The result is a
    /// permutation of `0..width*height`.
    pub fn assign_indices(self, width: usize, height: usize) -> Vec<usize> {
        let mut wire = vec![0usize; width * height];
        match self {
            Layout::RowsUpStartLeft => scan_rows(&mut wire, width, height, true, true),
            Layout::RowsDownStartLeft => scan_rows(&mut wire, width, height, false, true),
            Layout::RowsDownStartRight => scan_rows(&mut wire, width, height, false, false),
            Layout::RowsUpStartRight => scan_rows(&mut wire, width, height, true, false),
            Layout::ColsRightStartBottom => scan_cols(&mut wire, width, height, true, true),
            Layout::ColsRightStartTop => scan_cols(&mut wire, width, height, true, false),
            Layout::ColsLeftStartTop => scan_cols(&mut wire, width, height, false, false),
            Layout::ColsLeftStartBottom => scan_cols(&mut wire, width, height, false, true),
        }
        trace!(
            "assign_indices: {} over {}x{} -> {:?}",
            self.name(),
            width,
            height,
            wire
        );
        wire
    }
}

impl std::str::FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::from_name(s)
            .ok_or_else(|| anyhow::anyhow!("unknown layout {:?} (expected Layout1..Layout8)", s))
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Row-primary serpentine scan.
///
/// `bottom_up` picks the row order; `start_left` is the column direction
/// on the first scanned row, flipping on every row after it.
fn scan_rows(wire: &mut [usize], width: usize, height: usize, bottom_up: bool, start_left: bool) {
    for line in 0..height {
        let y = if bottom_up { height - 1 - line } else { line };
        let base = line * width;
        let leftward = (line % 2 == 0) != start_left;
        for x in 0..width {
            // Visit order along the row decides the wire index of column x.
            let step = if leftward { width - 1 - x } else { x };
            wire[y * width + x] = base + step;
        }
    }
}

/// Column-primary serpentine scan.
///
/// `rightward` picks the column order; `start_bottom` is the row direction
/// on the first scanned column, flipping on every column after it.
fn scan_cols(wire: &mut [usize], width: usize, height: usize, rightward: bool, start_bottom: bool) {
    for line in 0..width {
        let x = if rightward { line } else { width - 1 - line };
        let base = line * height;
        let upward = (line % 2 == 0) == start_bottom;
        for y in 0..height {
            let step = if upward { height - 1 - y } else { y };
            wire[y * width + x] = base + step;
        }
    }
}

// src/wall.rs

//! The data model: a `Wall` owns a grid of `Crate`s, each crate owns a
//! pixel grid and the wire-indexed color buffer that eventually becomes
//! its slice of the exported byte stream.
//!
//! Ownership is explicit: dropping a `Wall` drops its crates. Nothing in
//! the model is tied to any UI surface.

use anyhow::{bail, ensure};
use log::debug;

use crate::color::{Rgb, BLACK};
use crate::layout::Layout;

/// A crate's position in the wall-level wire chain.
///
/// Every crate starts `Excluded`: it accepts no pixel edits and
/// contributes nothing to serialized output until the user assigns it a
/// chain position. The external convention for raw input keeps the
/// original tool's encoding: `-1` excludes, `0..` includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    /// Not part of the wire chain; pixel edits are disabled.
    Excluded,
    /// Part of the wire chain at this ordinal position.
    Included(usize),
}

impl Chain {
    /// The position, if included.
    pub fn position(self) -> Option<usize> {
        match self {
            Chain::Excluded => None,
            Chain::Included(pos) => Some(pos),
        }
    }

    /// The raw external encoding: `-1` for excluded.
    pub fn to_raw(self) -> i64 {
        match self {
            Chain::Excluded => -1,
            Chain::Included(pos) => pos as i64,
        }
    }
}

/// A read-only view of one addressable cell in a crate's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub row: usize,
    pub col: usize,
    /// Position of this cell in the physical LED daisy-chain.
    pub wire_index: usize,
    /// Current content of the color-buffer slot at `wire_index`.
    pub color: Rgb,
}

/// One physical LED panel unit.
#[derive(Debug, Clone)]
pub struct Crate {
    width: usize,
    height: usize,
    layout: Layout,
    chain: Chain,
    extra_pixel: bool,
    /// Wire index per row-major grid cell; always a permutation of
    /// `0..width*height`.
    wire: Vec<usize>,
    /// Wire-index-addressed color buffer. Length is `width*height`, plus
    /// one trailing slot while the extra pixel is enabled.
    colors: Vec<Rgb>,
}

impl Crate {
    /// Creates a crate with all pixels black, excluded from the chain,
    /// and no extra pixel.
    pub fn new(width: usize, height: usize, layout: Layout) -> Self {
        debug_assert!(width > 0 && height > 0, "crate dimensions must be positive");
        Crate {
            width,
            height,
            layout,
            chain: Chain::Excluded,
            extra_pixel: false,
            wire: layout.assign_indices(width, height),
            colors: vec![BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn extra_pixel(&self) -> bool {
        self.extra_pixel
    }

    /// The wire-ordered color buffer (grid pixels plus the optional
    /// trailing extra pixel).
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of buffer slots this crate contributes to the chain.
    pub fn buffer_len(&self) -> usize {
        self.colors.len()
    }

    /// Switches the wiring layout, recomputing every cell's wire index in
    /// place. The color buffer is neither resized nor reordered: existing
    /// colors are simply re-addressed by the new mapping.
    pub fn set_layout(&mut self, layout: Layout) {
        debug!(
            "crate layout {} -> {} ({}x{})",
            self.layout, layout, self.width, self.height
        );
        self.layout = layout;
        self.wire = layout.assign_indices(self.width, self.height);
    }

    /// Assigns the crate's chain position from the raw external encoding:
    /// `-1` excludes it, `0..=max_position` includes it. Anything else is
    /// rejected and the previous state kept.
    pub fn set_chain(&mut self, raw: i64, max_position: usize) -> anyhow::Result<()> {
        let next = match raw {
            -1 => Chain::Excluded,
            pos if pos >= 0 && (pos as usize) <= max_position => Chain::Included(pos as usize),
            _ => bail!(
                "chain position {} out of range (-1 to exclude, 0..={} to include)",
                raw,
                max_position
            ),
        };
        if next != self.chain {
            debug!("crate chain {:?} -> {:?}", self.chain, next);
            self.chain = next;
        }
        Ok(())
    }

    /// Enables or disables the trailing extra pixel. Enabling appends one
    /// black slot to the buffer; disabling pops exactly the last slot.
    pub fn set_extra_pixel(&mut self, enabled: bool) {
        if enabled == self.extra_pixel {
            return;
        }
        self.extra_pixel = enabled;
        if enabled {
            self.colors.push(BLACK);
        } else {
            self.colors.pop();
        }
        debug!("crate extra pixel {}, buffer len {}", enabled, self.colors.len());
    }

    /// Paints one grid cell, writing straight into the buffer slot the
    /// cell's wire index addresses. Rejected while the crate is excluded
    /// from the chain, matching the disabled pixel inputs in that state.
    pub fn paint(&mut self, row: usize, col: usize, color: Rgb) -> anyhow::Result<()> {
        ensure!(
            self.chain != Chain::Excluded,
            "crate is excluded from the chain; set a chain position before painting"
        );
        ensure!(
            row < self.height && col < self.width,
            "pixel ({}, {}) out of bounds for a {}x{} crate",
            row,
            col,
            self.width,
            self.height
        );
        let idx = self.wire[row * self.width + col];
        self.colors[idx] = color;
        Ok(())
    }

    /// Paints the trailing extra pixel, if enabled.
    pub fn paint_extra_pixel(&mut self, color: Rgb) -> anyhow::Result<()> {
        ensure!(
            self.chain != Chain::Excluded,
            "crate is excluded from the chain; set a chain position before painting"
        );
        ensure!(self.extra_pixel, "crate has no extra pixel");
        let last = self.colors.len() - 1;
        self.colors[last] = color;
        Ok(())
    }

    /// A view of one grid cell: its coordinates, wire index, and current
    /// color. `None` out of bounds.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Pixel> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let wire_index = self.wire[row * self.width + col];
        Some(Pixel {
            row,
            col,
            wire_index,
            color: self.colors[wire_index],
        })
    }
}

/// A rectangular arrangement of crates forming one installation.
///
/// Dimensions count crates, not pixels. All crates share the same pixel
/// dimensions and start with the same layout; layout and chain position
/// are per-crate afterwards.
#[derive(Debug, Clone)]
pub struct Wall {
    name: String,
    width: usize,
    height: usize,
    crate_width: usize,
    crate_height: usize,
    crates: Vec<Crate>,
}

impl Wall {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        crate_width: usize,
        crate_height: usize,
        layout: Layout,
    ) -> Self {
        let name = name.into();
        // Column-by-column construction order; serialization ties on equal
        // chain positions resolve in this order.
        let mut crates = Vec::with_capacity(width * height);
        for _x in 0..width {
            for _y in 0..height {
                crates.push(Crate::new(crate_width, crate_height, layout));
            }
        }
        debug!(
            "wall {:?} created: {}x{} crates of {}x{} pixels, layout {}",
            name, width, height, crate_width, crate_height, layout
        );
        Wall {
            name,
            width,
            height,
            crate_width,
            crate_height,
            crates,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn crate_width(&self) -> usize {
        self.crate_width
    }

    pub fn crate_height(&self) -> usize {
        self.crate_height
    }

    pub fn crates(&self) -> &[Crate] {
        &self.crates
    }

    /// Total crate count; chain positions must stay below this.
    pub fn crate_count(&self) -> usize {
        self.crates.len()
    }

    pub fn crate_at(&self, index: usize) -> Option<&Crate> {
        self.crates.get(index)
    }

    pub fn crate_at_mut(&mut self, index: usize) -> Option<&mut Crate> {
        self.crates.get_mut(index)
    }
}

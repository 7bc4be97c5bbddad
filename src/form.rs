// src/form.rs

//! Wall-creation form state and per-field validation.
//!
//! The four dimension fields each carry a tri-state status so the front
//! end can report them individually; wall creation stays blocked until
//! every field reads `Valid`.

use log::trace;

use crate::layout::Layout;

/// Validation status of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Nothing entered yet.
    Empty,
    /// Parses to a positive integer.
    Valid,
    /// Non-numeric, zero, or negative.
    Invalid,
}

impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldStatus::Empty => "Empty",
            FieldStatus::Valid => "Valid",
            FieldStatus::Invalid => "Invalid",
        };
        write!(f, "{}", s)
    }
}

/// Validates a dimension entry: positive integers only.
pub fn validate_positive_int(value: &str) -> FieldStatus {
    if value.trim().is_empty() {
        return FieldStatus::Empty;
    }
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => FieldStatus::Valid,
        _ => FieldStatus::Invalid,
    }
}

/// The four dimension fields of the wall-creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WallWidth,
    WallHeight,
    CrateWidth,
    CrateHeight,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::WallWidth,
        Field::WallHeight,
        Field::CrateWidth,
        Field::CrateHeight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::WallWidth => "Wall Width",
            Field::WallHeight => "Wall Height",
            Field::CrateWidth => "Crate Width",
            Field::CrateHeight => "Crate Height",
        }
    }
}

/// Validated parameters for creating a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSpec {
    pub wall_width: usize,
    pub wall_height: usize,
    pub crate_width: usize,
    pub crate_height: usize,
    pub layout: Layout,
}

/// Form state: raw field entries plus the selected default layout.
#[derive(Debug, Clone, Default)]
pub struct WallForm {
    wall_width: String,
    wall_height: String,
    crate_width: String,
    crate_height: String,
    layout: Layout,
}

impl WallForm {
    /// A form pre-seeded with values (e.g., configured defaults).
    pub fn with_values(
        wall_width: usize,
        wall_height: usize,
        crate_width: usize,
        crate_height: usize,
        layout: Layout,
    ) -> Self {
        WallForm {
            wall_width: wall_width.to_string(),
            wall_height: wall_height.to_string(),
            crate_width: crate_width.to_string(),
            crate_height: crate_height.to_string(),
            layout,
        }
    }

    /// Updates a field and reports its new status.
    pub fn set_field(&mut self, field: Field, value: &str) -> FieldStatus {
        let slot = match field {
            Field::WallWidth => &mut self.wall_width,
            Field::WallHeight => &mut self.wall_height,
            Field::CrateWidth => &mut self.crate_width,
            Field::CrateHeight => &mut self.crate_height,
        };
        *slot = value.to_string();
        let status = validate_positive_int(slot);
        trace!("form field {} = {:?} -> {}", field.label(), value, status);
        status
    }

    pub fn status(&self, field: Field) -> FieldStatus {
        let value = match field {
            Field::WallWidth => &self.wall_width,
            Field::WallHeight => &self.wall_height,
            Field::CrateWidth => &self.crate_width,
            Field::CrateHeight => &self.crate_height,
        };
        validate_positive_int(value)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// The validated parameters, only when all four fields are `Valid`.
    pub fn build(&self) -> Option<WallSpec> {
        if Field::ALL
            .iter()
            .any(|&f| self.status(f) != FieldStatus::Valid)
        {
            return None;
        }
        // Statuses checked above; these parses cannot fail.
        Some(WallSpec {
            wall_width: self.wall_width.trim().parse().ok()?,
            wall_height: self.wall_height.trim().parse().ok()?,
            crate_width: self.crate_width.trim().parse().ok()?,
            crate_height: self.crate_height.trim().parse().ok()?,
            layout: self.layout,
        })
    }
}

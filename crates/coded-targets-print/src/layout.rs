//! Page layout for target sheets.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::PrintError;

/// Physical unit of every length in [`SheetLayout`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    #[default]
    In,
    Cm,
    Mm,
}

impl Unit {
    /// SVG length suffix.
    pub fn as_svg(&self) -> &'static str {
        match self {
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
        }
    }

    /// Pixels per unit at the given dots-per-inch.
    pub fn pixels_per_unit(&self, dpi: u32) -> f32 {
        let dpi = dpi as f32;
        match self {
            Unit::In => dpi,
            Unit::Cm => dpi / 2.54,
            Unit::Mm => dpi / 25.4,
        }
    }
}

/// Grid of targets on a page, with a black background inset from the edges.
///
/// Defaults give a US-letter sheet with 5 × 4 targets of 0.4 in centre dots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub unit: Unit,
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Diameter of the centre dot. The full target is three times as wide.
    pub dot_diameter: f32,
    /// Target rows per page.
    pub rows: usize,
    /// Target columns per page.
    pub columns: usize,
    /// Horizontal page margin around the target grid.
    pub x_margin: f32,
    /// Vertical page margin around the target grid.
    pub y_margin: f32,
    /// Horizontal page margin around the black background.
    pub background_x_margin: f32,
    /// Vertical page margin around the black background.
    pub background_y_margin: f32,
    /// Print the one-based target number next to each target (SVG only).
    pub labels: bool,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            unit: Unit::In,
            width: 8.5,
            height: 11.0,
            dot_diameter: 0.4,
            rows: 5,
            columns: 4,
            x_margin: 0.65,
            y_margin: 0.9,
            background_x_margin: 0.25,
            background_y_margin: 0.5,
            labels: true,
        }
    }
}

impl SheetLayout {
    /// Radius of the centre dot.
    #[inline]
    pub fn dot_radius(&self) -> f32 {
        self.dot_diameter * 0.5
    }

    /// Outer diameter of a whole target (dot plus code ring).
    #[inline]
    pub fn target_size(&self) -> f32 {
        self.dot_diameter * 3.0
    }

    /// Saturates instead of overflowing; [`SheetLayout::validate`] rejects
    /// grids whose product does not fit.
    #[inline]
    pub fn targets_per_page(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    /// Pages needed for `codes` targets.
    pub fn page_count(&self, codes: usize) -> usize {
        match self.targets_per_page() {
            0 => 0,
            per_page => codes.div_ceil(per_page),
        }
    }

    /// Centre-to-centre distance between neighbouring columns and rows.
    pub fn spacing(&self) -> [f32; 2] {
        let size = self.target_size();
        let step = |extent: f32, margin: f32, count: usize| {
            if count > 1 {
                (extent - 2.0 * margin - size) / (count - 1) as f32
            } else {
                0.0
            }
        };
        [
            step(self.width, self.x_margin, self.columns),
            step(self.height, self.y_margin, self.rows),
        ]
    }

    /// Centre of the target in `slot` (row-major within a page).
    pub fn target_center(&self, slot: usize) -> Point2<f32> {
        let columns = self.columns.max(1);
        let (row, col) = (slot / columns, slot % columns);
        let [dx, dy] = self.spacing();
        let half = self.target_size() * 0.5;
        Point2::new(
            self.x_margin + half + col as f32 * dx,
            self.y_margin + half + row as f32 * dy,
        )
    }

    /// Background rectangle as `[x, y, width, height]`.
    pub fn background_rect(&self) -> [f32; 4] {
        [
            self.background_x_margin,
            self.background_y_margin,
            self.width - 2.0 * self.background_x_margin,
            self.height - 2.0 * self.background_y_margin,
        ]
    }

    /// Load a JSON layout from disk; missing fields keep their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PrintError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this layout to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PrintError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check that the targets fit on the page.
    pub fn validate(&self) -> Result<(), PrintError> {
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("dot_diameter", self.dot_diameter),
        ];
        for (name, v) in lengths {
            if !v.is_finite() || v <= 0.0 {
                return Err(invalid(format!("{name} must be > 0, got {v}")));
            }
        }
        let margins = [
            ("x_margin", self.x_margin),
            ("y_margin", self.y_margin),
            ("background_x_margin", self.background_x_margin),
            ("background_y_margin", self.background_y_margin),
        ];
        for (name, v) in margins {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(format!("{name} must be >= 0, got {v}")));
            }
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(invalid("rows and columns must be >= 1".to_string()));
        }
        if self.rows.checked_mul(self.columns).is_none() {
            return Err(invalid(format!(
                "{} x {} targets per page overflows",
                self.rows, self.columns
            )));
        }
        let size = self.target_size();
        if self.width - 2.0 * self.x_margin < size || self.height - 2.0 * self.y_margin < size {
            return Err(invalid(format!(
                "targets of size {size} do not fit inside the margins"
            )));
        }
        let [_, _, bw, bh] = self.background_rect();
        if bw <= 0.0 || bh <= 0.0 {
            return Err(invalid("background margins leave no background".to_string()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> PrintError {
    PrintError::InvalidLayout(msg)
}

//! Printable sheets of circular coded targets.
//!
//! Each target is a white centre dot of radius `r` surrounded by a code ring
//! spanning radii `2r..3r`, on a black background. Ring sector `i` covers the
//! angles `[i, i + 1] · 360° / n`, running clockwise on the page from the
//! +x axis, and is white when sector `i` of the codeword is set. A label
//! with the one-based target number sits at the lower left of each target.
//!
//! ```no_run
//! use coded_targets_print::{write_sheets, SheetFormat, SheetLayout};
//! use coded_targets_ring::generate_de19733466;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = generate_de19733466()?;
//! let pages = write_sheets(&catalog, &SheetLayout::default(), "sheets", SheetFormat::Svg)?;
//! println!("wrote {} sheets", pages.len());
//! # Ok(())
//! # }
//! ```

mod geometry;
mod layout;
mod raster;
mod svg;

pub use geometry::{SectorArc, TargetGeometry};
pub use layout::{SheetLayout, Unit};
pub use raster::render_sheet_png;
pub use svg::render_sheet_svg;

use coded_targets_ring::{Codeword, RingCatalog};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors returned by layout validation and sheet rendering.
#[derive(thiserror::Error, Debug)]
pub enum PrintError {
    #[error("invalid sheet layout: {0}")]
    InvalidLayout(String),
    #[error("page {page} out of range (catalog fills {pages} pages)")]
    PageOutOfRange { page: usize, pages: usize },
    #[error("dpi must be in 1..={max}, got {got}")]
    InvalidDpi { got: u32, max: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Png(#[from] png::EncodingError),
}

/// Output format for [`write_sheets`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetFormat {
    Svg,
    Png { dpi: u32 },
}

impl SheetFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Svg => "svg",
            SheetFormat::Png { .. } => "png",
        }
    }
}

/// Render every page of `catalog` into `dir` as `sheet_000.<ext>`, ...
///
/// Returns the written paths in page order. An empty catalog writes nothing.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(catalog, layout, dir), fields(codes = catalog.len()))
)]
pub fn write_sheets(
    catalog: &RingCatalog,
    layout: &SheetLayout,
    dir: impl AsRef<Path>,
    format: SheetFormat,
) -> Result<Vec<PathBuf>, PrintError> {
    layout.validate()?;
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let pages = layout.page_count(catalog.len());
    let mut written = Vec::with_capacity(pages);
    for page in 0..pages {
        let path = dir.join(format!("sheet_{page:03}.{}", format.extension()));
        match format {
            SheetFormat::Svg => fs::write(&path, render_sheet_svg(catalog, layout, page)?)?,
            SheetFormat::Png { dpi } => {
                fs::write(&path, render_sheet_png(catalog, layout, page, dpi)?)?
            }
        }
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    log::info!(
        "{} codes on {} {} sheets in {}",
        catalog.len(),
        pages,
        format.extension(),
        dir.display()
    );
    Ok(written)
}

/// Slice of codewords shown on `page`, with their slot index on the page.
pub(crate) fn page_slots<'a>(
    catalog: &'a RingCatalog,
    layout: &SheetLayout,
    page: usize,
) -> Result<impl Iterator<Item = (usize, &'a Codeword)> + 'a, PrintError> {
    let pages = layout.page_count(catalog.len());
    if page >= pages {
        return Err(PrintError::PageOutOfRange { page, pages });
    }
    let per_page = layout.targets_per_page();
    let start = page * per_page;
    let end = start.saturating_add(per_page).min(catalog.len());
    Ok(catalog.codewords()[start..end].iter().enumerate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coded_targets_ring::generate_de19733466;

    #[test]
    fn writes_one_file_per_page() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = generate_de19733466().expect("valid params");
        let layout = SheetLayout::default();

        let paths = write_sheets(&catalog, &layout, dir.path(), SheetFormat::Svg).expect("write");
        // 516 codes at 20 per page.
        assert_eq!(paths.len(), 26);
        assert!(paths[0].ends_with("sheet_000.svg"));
        assert!(paths[25].ends_with("sheet_025.svg"));
        assert!(paths.iter().all(|p| p.is_file()));
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let catalog = generate_de19733466().expect("valid params");
        let layout = SheetLayout::default();
        let last: Vec<u32> = page_slots(&catalog, &layout, 25)
            .expect("page 25")
            .map(|(_, c)| c.id)
            .collect();
        assert_eq!(last, (500..516).collect::<Vec<_>>());
        assert!(matches!(
            page_slots(&catalog, &layout, 26),
            Err(PrintError::PageOutOfRange { page: 26, pages: 26 })
        ));
    }

    #[test]
    fn format_extensions() {
        assert_eq!(SheetFormat::Svg.extension(), "svg");
        assert_eq!(SheetFormat::Png { dpi: 72 }.extension(), "png");
    }
}

//! High-level facade crate for the `coded-targets-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the underlying crates,
//! - end-to-end helpers that generate a catalog and write printable sheets,
//! - (feature `cli`, on by default) the `coded-targets` command-line tool.
//!
//! ## Quickstart
//!
//! ```no_run
//! use coded_targets::pipeline;
//! use coded_targets::print::{SheetFormat, SheetLayout};
//!
//! # fn main() -> Result<(), coded_targets::Error> {
//! let catalog = pipeline::published_catalog()?;
//! println!("{}", pipeline::code_listing(&catalog));
//!
//! let sheets = pipeline::write_catalog_sheets(
//!     &catalog,
//!     &SheetLayout::default(),
//!     "targets",
//!     SheetFormat::Svg,
//! )?;
//! println!("wrote {} sheets", sheets.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `coded_targets::core`: ring bit operations and the logger.
//! - `coded_targets::ring`: scheme parameters, structural rules, the greedy
//!   generator, catalogs, lookup and JSON I/O.
//! - `coded_targets::print`: target geometry, sheet layout, SVG/PNG output.
//! - `coded_targets::pipeline`: end-to-end helpers used by the CLI.

pub use coded_targets_core as core;
pub use coded_targets_print as print;
pub use coded_targets_ring as ring;

pub use coded_targets_ring::{
    Codeword, De19733466Rule, RingCatalog, RingCodeParams, StructuralRule, DE19733466_CODE_COUNT,
};

pub mod pipeline;

pub use pipeline::Error;

//! Rotation-invariant circular codes for photogrammetry targets.
//!
//! This crate focuses on:
//! - the scheme parameters and structural rule of the (expired) patent
//!   DE19733466A1: 14 sectors, even parity, at least one pair of opposite
//!   sectors set,
//! - the deterministic greedy search that turns those parameters into a
//!   [`RingCatalog`] (516 codes for the published scheme),
//! - looking up an observed ring pattern in a catalog under any rotation.
//!
//! It does **not** read images. Sampling a ring out of a photograph is left to
//! the caller; [`Matcher`] only works on bit patterns.
//!
//! ```
//! use coded_targets_ring::{generate_de19733466, DE19733466_CODE_COUNT};
//!
//! let catalog = generate_de19733466().expect("published parameters are valid");
//! assert_eq!(catalog.len(), DE19733466_CODE_COUNT);
//! assert_eq!(catalog.codewords()[0].pattern, 0b00000010000001);
//! ```

mod catalog;
mod generator;
mod io;
mod matcher;
mod params;
mod rule;

pub use catalog::{CatalogError, Codeword, RingCatalog};
pub use generator::{generate_catalog, generate_de19733466};
pub use io::{GenerateConfig, RingIoError};
pub use matcher::{Match, Matcher};
pub use params::{RingCodeParams, RingParamsError, DE19733466_CODE_COUNT};
pub use rule::{De19733466Rule, StructuralRule};

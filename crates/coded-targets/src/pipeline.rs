//! End-to-end helpers: parameters in, catalog or printable sheets out.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::print::{self, PrintError, SheetFormat, SheetLayout};
use crate::ring::{
    self, CatalogError, De19733466Rule, RingCatalog, RingCodeParams, RingIoError,
    RingParamsError, DE19733466_CODE_COUNT,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Params(#[from] RingParamsError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    RingIo(#[from] RingIoError),

    #[error(transparent)]
    Print(#[from] PrintError),
}

/// Generate a catalog with the DE19733466A1 rule.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(params)))]
pub fn generate(params: &RingCodeParams) -> Result<RingCatalog, Error> {
    let catalog = ring::generate_catalog(params, &De19733466Rule)?;
    log::info!(
        "generated {} codes (ring_length={}, min_distance={}, transitions={:?})",
        catalog.len(),
        params.ring_length,
        params.min_distance,
        params.transitions
    );
    Ok(catalog)
}

/// The published 516-code catalog, with its size checked.
pub fn published_catalog() -> Result<RingCatalog, Error> {
    let catalog = generate(&RingCodeParams::de19733466())?;
    catalog.expect_len(DE19733466_CODE_COUNT)?;
    Ok(catalog)
}

/// Write every page of `catalog` into `dir`.
pub fn write_catalog_sheets(
    catalog: &RingCatalog,
    layout: &SheetLayout,
    dir: impl AsRef<Path>,
    format: SheetFormat,
) -> Result<Vec<PathBuf>, Error> {
    Ok(print::write_sheets(catalog, layout, dir, format)?)
}

/// Generate a catalog for `params` and print it straight to sheets.
pub fn generate_sheets(
    params: &RingCodeParams,
    layout: &SheetLayout,
    dir: impl AsRef<Path>,
    format: SheetFormat,
) -> Result<Vec<PathBuf>, Error> {
    let catalog = generate(params)?;
    write_catalog_sheets(&catalog, layout, dir, format)
}

/// Human-readable listing: binary codes, then the integer list, then the count.
pub fn code_listing(catalog: &RingCatalog) -> String {
    let n = catalog.ring_length();
    let mut out = String::from("Codes (as binary):\n");
    for c in catalog {
        out.push_str(&c.bits(n));
        out.push('\n');
    }
    let ints: Vec<String> = catalog.patterns().map(|p| p.to_string()).collect();
    let _ = write!(
        out,
        "\nCodes (as integer):\n[{}]\n\nNumber of codes: {}\n",
        ints.join(", "),
        catalog.len()
    );
    out
}

/// Re-check a catalog file against the DE19733466A1 rule.
pub fn verify_catalog_file(path: impl AsRef<Path>) -> Result<RingCatalog, Error> {
    let catalog = RingCatalog::load_json(path)?;
    catalog.verify(&De19733466Rule)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_catalog_passes_size_check() {
        let catalog = published_catalog().expect("catalog");
        assert_eq!(catalog.len(), 516);
    }

    #[test]
    fn listing_has_binary_integer_and_count_sections() {
        let params = RingCodeParams::with_ring_length(6);
        let catalog = generate(&params).expect("catalog");
        let listing = code_listing(&catalog);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Codes (as binary):");
        assert_eq!(lines[1].len(), 6);
        assert!(listing.contains("Codes (as integer):\n["));
        assert!(listing.ends_with("Number of codes: 4\n"));
    }

    #[test]
    fn generate_surfaces_parameter_errors() {
        let err = generate(&RingCodeParams::with_ring_length(7)).unwrap_err();
        assert!(matches!(err, Error::Params(RingParamsError::OddRingLength(7))));
    }

    #[test]
    fn missing_catalog_file_is_a_ring_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = verify_catalog_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::RingIo(RingIoError::Io(_))));
    }

    #[test]
    fn verify_catalog_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("codes.json");
        let catalog = published_catalog().expect("catalog");
        catalog.write_json(&path).expect("write");
        assert_eq!(verify_catalog_file(&path).expect("verify"), catalog);
    }
}

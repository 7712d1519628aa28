//! JSON configuration and catalog export.

use crate::{
    generate_catalog, CatalogError, Codeword, De19733466Rule, RingCatalog, RingCodeParams,
    RingParamsError,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum RingIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Params(#[from] RingParamsError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Generation settings loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default)]
    pub params: RingCodeParams,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl GenerateConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RingIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RingIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the catalog output path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("ring_codes.json"))
    }

    /// Run the generator with the DE19733466A1 rule.
    pub fn build_catalog(&self) -> Result<RingCatalog, RingParamsError> {
        generate_catalog(&self.params, &De19733466Rule)
    }
}

/// On-disk form of a codeword. `bits` is informational and ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CodewordRecord {
    id: u32,
    pattern: u32,
    #[serde(default)]
    bits: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    params: RingCodeParams,
    codewords: Vec<CodewordRecord>,
}

impl RingCatalog {
    /// Serialize as pretty JSON: `{ params, codewords: [{ id, pattern, bits }] }`.
    pub fn to_json(&self) -> Result<String, RingIoError> {
        let n = self.ring_length();
        let file = CatalogFile {
            params: *self.params(),
            codewords: self
                .iter()
                .map(|c| CodewordRecord {
                    id: c.id,
                    pattern: c.pattern,
                    bits: c.bits(n),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Parse and validate a catalog produced by [`RingCatalog::to_json`].
    pub fn from_json(raw: &str) -> Result<Self, RingIoError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        file.params.validate()?;
        let codewords = file
            .codewords
            .into_iter()
            .map(|r| Codeword {
                id: r.id,
                pattern: r.pattern,
            })
            .collect();
        Ok(Self::from_codewords(file.params, codewords)?)
    }

    /// Write the catalog to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RingIoError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a catalog from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RingIoError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_de19733466;

    #[test]
    fn catalog_survives_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("codes.json");

        let catalog = generate_de19733466().expect("valid params");
        catalog.write_json(&path).expect("write");
        let loaded = RingCatalog::load_json(&path).expect("load");
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn json_lists_bits_for_humans() {
        let catalog = generate_de19733466().expect("valid params");
        let json = catalog.to_json().expect("json");
        assert!(json.contains("\"bits\": \"00000010000001\""));
    }

    #[test]
    fn rejects_tampered_catalog() {
        let raw = r#"{
            "params": { "ring_length": 14, "min_distance": 2, "transitions": null },
            "codewords": [ { "id": 0, "pattern": 258 } ]
        }"#;
        let err = RingCatalog::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            RingIoError::Catalog(CatalogError::NotCanonical { .. })
        ));
    }

    #[test]
    fn rejects_invalid_params() {
        let raw = r#"{ "params": { "ring_length": 40 }, "codewords": [] }"#;
        let err = RingCatalog::from_json(raw).unwrap_err();
        assert!(matches!(err, RingIoError::Params(_)));
    }

    #[test]
    fn config_defaults_and_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gen.json");

        let cfg: GenerateConfig = serde_json::from_str("{}").expect("json");
        assert_eq!(cfg.params, RingCodeParams::de19733466());
        assert_eq!(cfg.output_path(), PathBuf::from("ring_codes.json"));

        let cfg = GenerateConfig {
            params: RingCodeParams {
                transitions: Some(2),
                ..RingCodeParams::default()
            },
            output_path: Some("out.json".into()),
        };
        cfg.write_json(&path).expect("write");
        let loaded = GenerateConfig::load_json(&path).expect("load");
        assert_eq!(loaded.params, cfg.params);
        assert_eq!(loaded.output_path(), PathBuf::from("out.json"));
        assert_eq!(loaded.build_catalog().expect("catalog").len(), 57);
    }
}

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{CombineSpec, Result};

pub fn load_spec(path: impl AsRef<Path>) -> Result<CombineSpec> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let spec = if matches!(extension.as_str(), "yaml" | "yml") {
        serde_yaml::from_str::<CombineSpec>(&raw)?
    } else {
        serde_json::from_str::<CombineSpec>(&raw)?
    };
    spec.validate()?;
    Ok(spec)
}

pub fn save_report<R: Serialize>(path: impl AsRef<Path>, report: &R) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let serialized = if matches!(extension.as_str(), "yaml" | "yml") {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    fs::write(path, serialized)?;
    Ok(())
}

//! Preset data format
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "name": "Cardiac view",
//!   "presets": [
//!     { "name": "heart", "display": 1, "colorLut": { "R": 200, "G": 30, "B": 30, "A": 128 } }
//!   ]
//! }
//! ```
//!
//! `display` of `0` hides the part, anything else shows it. Channels are
//! clamped to `[0, 255]`. The whole document is parsed before anything is
//! applied, so bad data never causes a partial update.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::PresetError;
use crate::gfx::color::{clamp_channel, Rgba};
use crate::sync::names::{normalize, EntityKey};

/// Raw document as stored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct PresetFile {
    #[serde(default)]
    pub version: PresetVersion,
    #[serde(default)]
    pub name: String,
    pub presets: Vec<PresetEntry>,
}

/// Version field; written as either a string or a number in the wild
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PresetVersion {
    Text(String),
    Number(serde_json::Number),
}

impl Default for PresetVersion {
    fn default() -> Self {
        PresetVersion::Text(String::new())
    }
}

impl fmt::Display for PresetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetVersion::Text(text) => f.write_str(text),
            PresetVersion::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One raw record
#[derive(Debug, Clone, Deserialize)]
pub struct PresetEntry {
    pub name: String,
    pub display: i64,
    #[serde(rename = "colorLut")]
    pub color_lut: ColorLut,
}

/// Raw 8-bit channels, not yet clamped
///
/// Stored as `f64` so that `128.0` or out-of-range integers still parse.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ColorLut {
    #[serde(rename = "R")]
    pub r: f64,
    #[serde(rename = "G")]
    pub g: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "A")]
    pub a: f64,
}

/// Rounds and clamps a raw channel; `as` saturates and maps NaN to 0
fn lut_channel(value: f64) -> u8 {
    clamp_channel(value.round() as i64)
}

/// Visibility and color for one logical part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRecord {
    pub name: String,
    pub key: EntityKey,
    pub visible: bool,
    pub color: [u8; 3],
    pub alpha: u8,
}

impl PresetRecord {
    pub fn rgba(&self) -> Rgba {
        let [r, g, b] = self.color;
        Rgba::from_channels(r.into(), g.into(), b.into(), self.alpha.into())
    }
}

impl From<PresetEntry> for PresetRecord {
    fn from(entry: PresetEntry) -> Self {
        let lut = entry.color_lut;
        Self {
            key: normalize(&entry.name),
            name: entry.name,
            visible: entry.display != 0,
            color: [lut_channel(lut.r), lut_channel(lut.g), lut_channel(lut.b)],
            alpha: lut_channel(lut.a),
        }
    }
}

/// Ordered list of records plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub version: String,
    pub records: Vec<PresetRecord>,
}

impl Preset {
    /// Parses preset JSON
    pub fn from_json_str(content: &str) -> Result<Self, PresetError> {
        if content.trim().is_empty() {
            return Err(PresetError::Empty);
        }
        let file: PresetFile = serde_json::from_str(content)?;
        Ok(file.into())
    }

    /// Reads and parses a preset file
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl From<PresetFile> for Preset {
    fn from(file: PresetFile) -> Self {
        Self {
            name: file.name,
            version: file.version.to_string(),
            records: file.presets.into_iter().map(PresetRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_convert() {
        let preset = Preset::from_json_str(
            r#"{
                "version": 2,
                "name": "Thorax",
                "presets": [
                    { "name": "Left Lung", "display": 0, "colorLut": { "R": 10, "G": 20, "B": 30, "A": 40 } },
                    { "name": "heart", "display": 7, "colorLut": { "R": 300, "G": -4, "B": 30, "A": 999 } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(preset.name, "Thorax");
        assert_eq!(preset.version, "2");
        assert_eq!(preset.records.len(), 2);

        let lung = &preset.records[0];
        assert_eq!(lung.key.as_str(), "leftlung");
        assert!(!lung.visible);

        let heart = &preset.records[1];
        assert!(heart.visible);
        assert_eq!(heart.color, [255, 0, 30]);
        assert_eq!(heart.alpha, 255);
    }

    #[test]
    fn test_float_and_huge_channels_are_clamped() {
        let preset = Preset::from_json_str(
            r#"{ "presets": [
                { "name": "liver", "display": 1,
                  "colorLut": { "R": 127.6, "G": 1e30, "B": 99999999999999999999999, "A": -3.5 } }
            ] }"#,
        )
        .unwrap();

        let liver = &preset.records[0];
        assert_eq!(liver.color, [128, 255, 255]);
        assert_eq!(liver.alpha, 0);
    }

    #[test]
    fn test_version_is_optional() {
        let preset = Preset::from_json_str(r#"{ "presets": [] }"#).unwrap();
        assert_eq!(preset.version, "");
        assert!(preset.records.is_empty());
    }

    #[test]
    fn test_bad_data_is_rejected() {
        assert!(matches!(Preset::from_json_str("  "), Err(PresetError::Empty)));
        assert!(matches!(
            Preset::from_json_str(r#"{ "name": "no records" }"#),
            Err(PresetError::Parse(_))
        ));
        assert!(matches!(
            Preset::from_json_str(r#"{ "presets": [ { "name": "x", "display": 1 } ] }"#),
            Err(PresetError::Parse(_))
        ));
    }

    #[test]
    fn test_record_color() {
        let record = PresetRecord::from(PresetEntry {
            name: "Heart".to_string(),
            display: 1,
            color_lut: ColorLut {
                r: 200.0,
                g: 30.0,
                b: 30.0,
                a: 128.0,
            },
        });
        assert!(record
            .rgba()
            .approx_eq(Rgba::new(0.784, 0.118, 0.118, 0.502), 0.001));
    }
}

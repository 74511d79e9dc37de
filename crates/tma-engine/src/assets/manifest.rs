use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Asset manifest describing the texture atlases and named textures of a game.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub atlases: Vec<AtlasDescriptor>,
    /// Named texture lookup: name → atlas index + cell coordinates.
    #[serde(default)]
    pub textures: HashMap<String, TextureDescriptor>,
}

/// A single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "characters").
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    /// Relative path to the image (e.g., "characters.png").
    pub path: String,
}

/// A named texture within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    pub col: u32,
    pub row: u32,
    /// Number of cells this texture spans (default: 1).
    #[serde(default = "default_span")]
    pub span: u32,
}

fn default_span() -> u32 {
    1
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Names of textures pointing at an atlas index the manifest does not declare.
    pub fn dangling_textures(&self) -> Vec<&str> {
        let atlas_count = self.atlases.len() as u32;
        let mut names: Vec<&str> = self
            .textures
            .iter()
            .filter(|(_, t)| t.atlas >= atlas_count)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "tiles", "cols": 16, "rows": 8, "path": "tiles.png" }
            ],
            "textures": {
                "hero": { "atlas": 0, "col": 0, "row": 0 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.atlases[0].cols, 16);
        assert_eq!(manifest.textures["hero"].span, 1);
        assert!(manifest.dangling_textures().is_empty());
    }

    #[test]
    fn reports_textures_with_missing_atlas() {
        let json = r#"{
            "atlases": [],
            "textures": { "ghost": { "atlas": 2, "col": 0, "row": 0 } }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.dangling_textures(), vec!["ghost"]);
    }
}

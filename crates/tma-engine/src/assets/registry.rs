use std::collections::HashMap;
use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{AtlasId, TextureRef};

/// Named texture lookup built from an AssetManifest, so game code can write
/// `sprite.set_texture(registry.get("coin"))`.
pub struct TextureRegistry {
    textures: HashMap<String, TextureRef>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Textures pointing at an undeclared atlas are skipped.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let dangling = manifest.dangling_textures();
        for name in &dangling {
            log::warn!("assets: texture '{}' references a missing atlas", name);
        }
        let textures = manifest
            .textures
            .iter()
            .filter(|(name, _)| !dangling.contains(&name.as_str()))
            .map(|(name, desc)| {
                let tex = TextureRef::new(AtlasId(desc.atlas), desc.col as f32, desc.row as f32)
                    .with_span(desc.span as f32);
                (name.clone(), tex)
            })
            .collect();
        Self { textures }
    }

    /// Look up a texture by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<TextureRef> {
        self.textures.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, texture: TextureRef) {
        self.textures.insert(name.into(), texture);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "tiles", "cols": 16, "rows": 8, "path": "tiles.png" }
            ],
            "textures": {
                "hero": { "atlas": 0, "col": 3, "row": 5, "span": 2 }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let reg = TextureRegistry::from_manifest(&manifest);

        let hero = reg.get("hero").expect("hero should exist");
        assert_eq!(hero.atlas, AtlasId(0));
        assert_eq!((hero.col, hero.row, hero.cell_span), (3.0, 5.0, 2.0));
    }

    #[test]
    fn skips_textures_with_missing_atlas() {
        let json = r#"{
            "atlases": [{ "name": "tiles", "cols": 4, "rows": 4, "path": "tiles.png" }],
            "textures": {
                "ok": { "atlas": 0, "col": 0, "row": 0 },
                "ghost": { "atlas": 3, "col": 0, "row": 0 }
            }
        }"#;
        let reg = TextureRegistry::from_manifest(&AssetManifest::from_json(json).unwrap());
        assert!(reg.get("ok").is_some());
        assert!(reg.get("ghost").is_none());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unknown_returns_none() {
        let reg = TextureRegistry::new();
        assert!(reg.get("nonexistent").is_none());
        assert!(reg.is_empty());
    }
}

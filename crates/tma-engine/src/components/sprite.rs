use glam::Vec2;

/// Identifies which texture atlas a sprite belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// Blend mode for sprite rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Alpha,
    /// Additive blending for glow effects (src-alpha, one).
    Additive,
}

/// A cell (or block of cells) inside a texture atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRef {
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Number of cells this texture spans (1.0 = single cell, 2.0 = 2x2 block).
    pub cell_span: f32,
}

impl TextureRef {
    pub fn new(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            cell_span: 1.0,
        }
    }

    pub fn with_span(mut self, cell_span: f32) -> Self {
        self.cell_span = cell_span;
        self
    }
}

/// Packed 0xRRGGBB colour multiplied into the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tint(pub u32);

impl Tint {
    pub const WHITE: Tint = Tint(0xFF_FF_FF);

    /// Parse `#rrggbb` or `rrggbb`, the format Telegram theme params use.
    pub fn parse_hex(s: &str) -> Option<Tint> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Tint)
    }

    /// Normalized RGB channels in [0, 1].
    pub fn rgb(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xFF) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xFF) as f32 / 255.0;
        let b = (self.0 & 0xFF) as f32 / 255.0;
        [r, g, b]
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

/// Sprite component — defines how an entity appears visually.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Texture to draw. Sprites without a texture are skipped by the renderer.
    pub texture: Option<TextureRef>,
    pub tint: Tint,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub visible: bool,
    /// Pivot in normalized sprite space; (0.5, 0.5) is the centre.
    pub anchor: Vec2,
    pub blend: BlendMode,
}

impl Default for SpriteComponent {
    fn default() -> Self {
        Self {
            texture: None,
            tint: Tint::WHITE,
            alpha: 1.0,
            visible: true,
            anchor: Vec2::splat(0.5),
            blend: BlendMode::Alpha,
        }
    }
}

impl SpriteComponent {
    pub fn new(texture: TextureRef) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn set_texture(&mut self, texture: Option<TextureRef>) {
        self.texture = texture;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_tint(&mut self, tint: Tint) {
        self.tint = tint;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn set_anchor(&mut self, x: f32, y: f32) {
        self.anchor = Vec2::new(x, y);
    }

    /// Clear the texture and restore white tint, full opacity, visible, centred anchor.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -- Builder pattern --

    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

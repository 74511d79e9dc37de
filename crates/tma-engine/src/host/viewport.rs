use glam::Vec2;

/// Size of the Mini-App viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    /// Current visible height. Changes continuously while the user drags the sheet.
    pub height: f32,
    /// Height after the last settled resize. Lay out against this one.
    pub stable_height: f32,
    pub is_expanded: bool,
}

impl Viewport {
    /// A browser window with no host: fully expanded, height already stable.
    pub fn browser(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stable_height: height,
            is_expanded: true,
        }
    }

    /// Fit a world of `world_w × world_h` into the stable area, keeping aspect ratio.
    pub fn fit_world(&self, world_w: f32, world_h: f32) -> ViewportFit {
        ViewportFit::compute(Vec2::new(self.width, self.stable_height), Vec2::new(world_w, world_h))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::browser(0.0, 0.0)
    }
}

/// Uniform scale plus letterbox offsets mapping world units to viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFit {
    /// Pixels per world unit.
    pub scale: f32,
    /// Left/top margin in pixels.
    pub offset: Vec2,
}

impl ViewportFit {
    pub fn compute(viewport: Vec2, world: Vec2) -> Self {
        if viewport.x <= 0.0 || viewport.y <= 0.0 || world.x <= 0.0 || world.y <= 0.0 {
            return Self { scale: 1.0, offset: Vec2::ZERO };
        }
        let scale = (viewport.x / world.x).min(viewport.y / world.y);
        let offset = (viewport - world * scale) * 0.5;
        Self { scale, offset }
    }

    /// Convert a viewport pixel position (e.g. a pointer event) to world units.
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }
}

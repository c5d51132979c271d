use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn with_a(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::linear_rgba(c.r, c.g, c.b, c.a)
    }
}

/// Line style state of the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stroke {
    #[default]
    Solid,
    /// Stipple: bit `i` of `pattern` (LSB first) says whether the `i`-th run of `factor` pixels
    /// is drawn.
    Dashed { pattern: u16, factor: u8 },
    /// Anti-aliased solid lines.
    Smooth,
}

impl Stroke {
    /// One pixel on, three off.
    pub const GRID: Self = Self::Dashed {
        pattern: 0x8888,
        factor: 1,
    };
}

/// Square drawing area inside the host's client area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Viewport {
    /// Largest square centered in a `width × height` area.
    pub fn fit(width: u32, height: u32) -> Self {
        let max = width.max(height);
        let min = width.min(height);
        let space = (max - min) / 2;

        if min == height {
            Self { x: space, y: 0, size: min }
        } else {
            Self { x: 0, y: space, size: min }
        }
    }
}

/// Orthographic view volume the plot coordinates are drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl ViewBounds {
    pub const PLOT: Self = Self {
        left: -0.4,
        right: 2.0,
        bottom: -0.4,
        top: 2.0,
        near: -10.0,
        far: 10.0,
    };

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.left + self.right) / 2.0, (self.bottom + self.top) / 2.0)
    }
}

/// State set up once at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSetup {
    pub clear: Color,
    pub bounds: ViewBounds,
    /// `None` until the host reported a size.
    pub viewport: Option<Viewport>,
}

impl Default for FrameSetup {
    fn default() -> Self {
        Self {
            clear: Color::WHITE,
            bounds: ViewBounds::PLOT,
            viewport: None,
        }
    }
}

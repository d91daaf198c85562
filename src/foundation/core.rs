use crate::foundation::error::{DocmotionError, DocmotionResult};

pub use kurbo::{Point, Rect};

/// Points per inch, the fixed typographic conversion.
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Playback frame rate as a rational, carried through to the renderer.
pub struct Fps {
    /// Numerator, must be > 0.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    pub fn new(num: u32, den: u32) -> DocmotionResult<Self> {
        if den == 0 {
            return Err(DocmotionError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(DocmotionError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Target viewport dimensions in pixels.
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.width_px() / 2.0, self.height_px() / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Page dimensions in typographic points.
pub struct PageSize {
    /// Width in points.
    pub width_pt: f64,
    /// Height in points.
    pub height_pt: f64,
}

impl PageSize {
    pub fn new(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }

    pub fn from_inches(width_in: f64, height_in: f64) -> Self {
        Self {
            width_pt: width_in * POINTS_PER_INCH,
            height_pt: height_in * POINTS_PER_INCH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Physical unit a bounding region's polygon coordinates are expressed in.
pub enum RegionUnit {
    /// Fractions of the page in `[0, 1]`.
    Normalized,
    /// Inches.
    Inches,
    /// Typographic points (1/72 inch).
    Points,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Corner of the page that an analysis service measures Y from.
pub enum PageOrigin {
    /// Y grows downward from the top edge (canonical).
    #[default]
    TopLeft,
    /// Y grows upward from the bottom edge; flipped before normalization.
    BottomLeft,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Canonical axis-aligned pixel box inside a [`Viewport`].
///
/// All geometry downstream of the normalizer uses only this type; raw
/// bounding regions never escape the normalization pass.
pub struct PxBox {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels, >= 0.
    pub width: f64,
    /// Height in pixels, >= 0.
    pub height: f64,
}

impl PxBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_rect(r: Rect) -> Self {
        Self::new(r.x0, r.y0, r.width(), r.height())
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }

    pub fn union(self, other: Self) -> Self {
        Self::from_rect(self.to_rect().union(other.to_rect()))
    }

    /// Truncates the box to the viewport. Edges are cut, the surviving
    /// part keeps its position; a fully outside box collapses to zero area.
    pub fn clamp_to(self, viewport: Viewport) -> Self {
        let x0 = self.x.clamp(0.0, viewport.width_px());
        let y0 = self.y.clamp(0.0, viewport.height_px());
        let x1 = (self.x + self.width).clamp(0.0, viewport.width_px());
        let y1 = (self.y + self.height).clamp(0.0, viewport.height_px());
        Self::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

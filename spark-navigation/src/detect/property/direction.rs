use log::error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Horizontal band of the frame an object falls into, relative to the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Left,
    Center,
    Right,
}

impl Display for Band {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Left => write!(f, "a la izquierda"),
            Band::Center => write!(f, "directamente adelante"),
            Band::Right => write!(f, "a la derecha"),
        }
    }
}

impl Band {
    /// Assigns a horizontal position to exactly one band.
    ///
    /// The center band spans `center_band_ratio` of the frame width on each side of
    /// the midline; a point exactly on the band edge belongs to the center.
    ///
    /// Args:
    ///     x (f32): Horizontal position, usually the box center.
    ///     image_width (u32): Width of the frame in pixels.
    ///     center_band_ratio (f32): Half-width of the center band as a fraction of the frame.
    pub fn of(x: f32, image_width: u32, center_band_ratio: f32) -> Self {
        if image_width == 0 {
            error!("Image width cannot be zero for band assignment.");
            return Band::Center;
        }

        let midline = image_width as f32 / 2.0;
        let half_band = image_width as f32 * center_band_ratio;
        let offset = x - midline;

        if offset < -half_band {
            Band::Left
        } else if offset > half_band {
            Band::Right
        } else {
            Band::Center
        }
    }
}

/// Machine-readable side attached to an instruction, used for haptic patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Center,
    Both,
}

impl From<Band> for Direction {
    fn from(band: Band) -> Self {
        match band {
            Band::Left => Direction::Left,
            Band::Center => Direction::Center,
            Band::Right => Direction::Right,
        }
    }
}

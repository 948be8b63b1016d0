use crate::detect::{COLOR_VOTE_MIN_FRACTION, HSV_MIN_SATURATION, HSV_MIN_VALUE};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficLightState {
    Red,
    Yellow,
    Green,
}

impl Display for TrafficLightState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrafficLightState::Red => write!(f, "rojo"),
            TrafficLightState::Yellow => write!(f, "amarillo"),
            TrafficLightState::Green => write!(f, "verde"),
        }
    }
}

impl TrafficLightState {
    /// Votes the state of a traffic light from the RGB pixels inside its box.
    ///
    /// Each pixel is converted to HSV (hue on the 0-180 scale) and counted towards red,
    /// yellow or green when saturated and bright enough. A color must cover more than
    /// `COLOR_VOTE_MIN_FRACTION` of the pixels; red wins ties against the others and
    /// yellow wins ties against green.
    ///
    /// Meant for `ObjectDetector` implementations that locate lights without a
    /// state-aware model; see `RawDetection::traffic_light_from_pixels`.
    pub fn from_pixels(pixels: &[[u8; 3]]) -> Option<Self> {
        if pixels.is_empty() {
            return None;
        }

        let (mut red, mut yellow, mut green) = (0usize, 0usize, 0usize);
        for &[r, g, b] in pixels {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            if s < HSV_MIN_SATURATION || v < HSV_MIN_VALUE {
                continue;
            }
            match h {
                0..=10 | 170..=180 => red += 1,
                20..=30 => yellow += 1,
                40..=80 => green += 1,
                _ => {}
            }
        }

        let threshold = pixels.len() as f32 * COLOR_VOTE_MIN_FRACTION;
        let above = |count: usize| count as f32 > threshold;

        if above(red) && red > yellow && red > green {
            Some(TrafficLightState::Red)
        } else if above(yellow) && yellow > green {
            Some(TrafficLightState::Yellow)
        } else if above(green) {
            Some(TrafficLightState::Green)
        } else {
            None
        }
    }
}

/// 8-bit RGB to HSV with hue halved into 0..=180, saturation and value in 0..=255.
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let s = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    ((h / 2.0).round() as u8, s.round() as u8, max as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(color: [u8; 3], count: usize, background: usize) -> Vec<[u8; 3]> {
        let mut pixels = vec![color; count];
        pixels.extend(std::iter::repeat([20, 20, 20]).take(background));
        pixels
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(255, 255, 0), (30, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn votes_dominant_color() {
        assert_eq!(
            TrafficLightState::from_pixels(&patch([230, 20, 20], 20, 80)),
            Some(TrafficLightState::Red)
        );
        assert_eq!(
            TrafficLightState::from_pixels(&patch([240, 220, 10], 20, 80)),
            Some(TrafficLightState::Yellow)
        );
        assert_eq!(
            TrafficLightState::from_pixels(&patch([10, 220, 60], 20, 80)),
            Some(TrafficLightState::Green)
        );
    }

    #[test]
    fn small_patches_are_inconclusive() {
        // 5 of 100 pixels is not strictly above the 5% threshold
        assert_eq!(TrafficLightState::from_pixels(&patch([230, 20, 20], 5, 95)), None);
        assert_eq!(TrafficLightState::from_pixels(&[]), None);
    }

    #[test]
    fn dim_pixels_do_not_vote() {
        assert_eq!(TrafficLightState::from_pixels(&patch([90, 10, 10], 50, 50)), None);
    }
}

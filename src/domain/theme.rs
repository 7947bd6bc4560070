//! Color themes for charts and maps.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The sidebar's color choice. Purely presentational; never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Red,
    Green,
    Blue,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Red, Theme::Green, Theme::Blue];

    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Red => "Red",
            Theme::Green => "Green",
            Theme::Blue => "Blue",
        }
    }

    /// Base color for points and bars.
    ///
    /// Green is the darker web green; `0,255,0` reads as lime.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Theme::Red => [255, 0, 0],
            Theme::Green => [0, 128, 0],
            Theme::Blue => [0, 0, 255],
        }
    }

    /// Sequential color-scale name for choropleths.
    pub fn scale_name(self) -> &'static str {
        match self {
            Theme::Red => "Reds",
            Theme::Green => "Greens",
            Theme::Blue => "Blues",
        }
    }

    /// Color at `t` in `[0, 1]` along a light-to-base ramp.
    pub fn ramp(self, t: f64) -> [u8; 3] {
        const LIGHT: [u8; 3] = [235, 235, 235];
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let base = self.rgb();
        let mut out = [0u8; 3];
        for i in 0..3 {
            let v = LIGHT[i] as f64 + (base[i] as f64 - LIGHT[i] as f64) * t;
            out[i] = v.round() as u8;
        }
        out
    }

    pub fn next(self) -> Self {
        match self {
            Theme::Red => Theme::Green,
            Theme::Green => Theme::Blue,
            Theme::Blue => Theme::Red,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Theme::Red => Theme::Blue,
            Theme::Green => Theme::Red,
            Theme::Blue => Theme::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints() {
        assert_eq!(Theme::Blue.ramp(0.0), [235, 235, 235]);
        assert_eq!(Theme::Blue.ramp(1.0), [0, 0, 255]);
        assert_eq!(Theme::Green.ramp(2.0), Theme::Green.rgb());
        assert_eq!(Theme::Red.ramp(f64::NAN), [235, 235, 235]);
    }

    #[test]
    fn next_and_prev_cycle() {
        for theme in Theme::ALL {
            assert_eq!(theme.next().prev(), theme);
        }
        assert_eq!(Theme::Blue.next(), Theme::Red);
    }
}

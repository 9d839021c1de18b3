use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{EngineError, EngineResult};

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";
pub const FAR_GRAY: &str = "#AAAAAA";

// Distances (km) bounding the grayscale gradient
const NEAR_DISTANCE: f64 = 50.0;
const FAR_DISTANCE: f64 = 2000.0;
const MAX_GRAY: f64 = 170.0; // 0xAA

static HEX_COLOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
        .expect("valid hex colour regex")
});

static RGBA_COLOUR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[0-9.]+\s*)?\)$")
        .expect("valid rgba colour regex")
});

/// Where an event's display colour comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ColourSource {
    /// Series colour, or black when the event has no series
    Fixed(String),
    /// Grayscale by distance from the viewing club
    Gradient(f64),
}

impl ColourSource {
    pub fn resolve(&self) -> String {
        match self {
            ColourSource::Fixed(colour) => colour.clone(),
            ColourSource::Gradient(distance) => gradient_colour(*distance),
        }
    }
}

/// Black up close, fading linearly to `#AAAAAA` at 2000 km
pub fn gradient_colour(distance: f64) -> String {
    if distance < NEAR_DISTANCE {
        BLACK.to_string()
    } else if distance < FAR_DISTANCE {
        let fraction = (distance - NEAR_DISTANCE) / (FAR_DISTANCE - NEAR_DISTANCE);
        let gray = (MAX_GRAY * fraction).round() as u8;
        format!("#{gray:02X}{gray:02X}{gray:02X}")
    } else {
        FAR_GRAY.to_string()
    }
}

/// Readable text colour for the given background, by YIQ luminance
pub fn text_colour(colour: &str) -> EngineResult<&'static str> {
    let (r, g, b) = parse_rgb(colour)?;
    let yiq = (r * 299 + g * 587 + b * 114) / 1000;
    Ok(if yiq >= 128 { BLACK } else { WHITE })
}

/// Accepts `#RRGGBB` or `rgba(r,g,b,a)`
pub fn parse_rgb(colour: &str) -> EngineResult<(u32, u32, u32)> {
    let colour = colour.trim();
    let invalid = || EngineError::InvalidColorFormat(colour.to_string());

    if let Some(caps) = HEX_COLOUR.captures(colour) {
        let channel = |idx: usize| u32::from_str_radix(&caps[idx], 16).map_err(|_| invalid());
        return Ok((channel(1)?, channel(2)?, channel(3)?));
    }

    if let Some(caps) = RGBA_COLOUR.captures(colour) {
        let channel = |idx: usize| {
            caps[idx]
                .parse::<u32>()
                .ok()
                .filter(|value| *value <= 255)
                .ok_or_else(invalid)
        };
        return Ok((channel(1)?, channel(2)?, channel(3)?));
    }

    Err(invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_boundaries() {
        assert_eq!(gradient_colour(0.0), "#000000");
        assert_eq!(gradient_colour(49.99), "#000000");
        assert_eq!(gradient_colour(50.0), "#000000");
        assert_eq!(gradient_colour(1025.0), "#555555");
        assert_eq!(gradient_colour(2000.0), "#AAAAAA");
        assert_eq!(gradient_colour(12000.0), "#AAAAAA");
    }

    #[test]
    fn test_gradient_is_zero_padded() {
        // 0xAA * 100 / 1950 = 8.7 -> 9
        assert_eq!(gradient_colour(150.0), "#090909");
    }

    #[test]
    fn test_colour_source() {
        assert_eq!(ColourSource::Fixed("#FF8800".to_string()).resolve(), "#FF8800");
        assert_eq!(ColourSource::Gradient(1025.0).resolve(), "#555555");
    }

    #[test]
    fn test_text_colour() {
        assert_eq!(text_colour("#000000").unwrap(), "#FFFFFF");
        assert_eq!(text_colour("#FFFFFF").unwrap(), "#000000");
        assert_eq!(text_colour("#ffff00").unwrap(), "#000000");
        assert_eq!(text_colour("#0000FF").unwrap(), "#FFFFFF");
        assert_eq!(text_colour("rgba(0,0,0,0)").unwrap(), text_colour("#000000").unwrap());
        assert_eq!(text_colour("rgba(255, 255, 255, 0.5)").unwrap(), "#000000");
    }

    #[test]
    fn test_luminance_threshold() {
        // 0x80 gray gives yiq exactly 128
        assert_eq!(text_colour("#808080").unwrap(), "#000000");
        assert_eq!(text_colour("#7F7F7F").unwrap(), "#FFFFFF");
    }

    #[test]
    fn test_invalid_colours() {
        for colour in ["black", "#FFF", "#GGGGGG", "rgba(300,0,0,1)", "rgba(1,2)", ""] {
            assert_eq!(
                text_colour(colour),
                Err(EngineError::InvalidColorFormat(colour.to_string())),
                "{colour}"
            );
        }
    }
}

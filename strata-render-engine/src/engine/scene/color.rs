use bevy::prelude::*;
use constants::render_settings::FALLBACK_LAYER_COLOUR;

/// Parse a hex colour, falling back to neutral grey with a warning.
pub fn color_or_fallback(hex: &str) -> Srgba {
    match Srgba::hex(hex) {
        Ok(color) => color,
        Err(err) => {
            warn!("Invalid colour '{}' ({}), using {}", hex, err, FALLBACK_LAYER_COLOUR);
            fallback_color()
        }
    }
}

pub fn fallback_color() -> Srgba {
    Srgba::hex(FALLBACK_LAYER_COLOUR).unwrap_or(Srgba::new(0.8, 0.8, 0.8, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colours_fall_back() {
        assert_eq!(color_or_fallback("#5e4b37"), Srgba::rgb_u8(0x5e, 0x4b, 0x37));
        assert_eq!(color_or_fallback("dirt"), Srgba::rgb_u8(0xcc, 0xcc, 0xcc));
        assert_eq!(color_or_fallback(""), fallback_color());
    }
}

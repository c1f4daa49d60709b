use plotters::style::RGBColor;

/// Parse a CSS color string into an RGB color for plotters
/// Supported: `#RRGGBB`, `#RGB` and the named colors used by the chart style
pub fn parse_color(color: &str) -> Option<RGBColor> {
    let color = color.trim().to_lowercase();

    if let Some(hex) = color.strip_prefix('#') {
        return match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(RGBColor(r, g, b))
            }
            3 => {
                // #abc expands to #aabbcc
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    channels[i] = v * 16 + v;
                }
                Some(RGBColor(channels[0], channels[1], channels[2]))
            }
            _ => None,
        };
    }

    match color.as_str() {
        "gold" => Some(RGBColor(255, 215, 0)),
        "silver" => Some(RGBColor(192, 192, 192)),
        "white" => Some(RGBColor(255, 255, 255)),
        "black" => Some(RGBColor(0, 0, 0)),
        _ => None,
    }
}

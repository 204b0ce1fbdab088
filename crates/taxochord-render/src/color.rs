/// d3 `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal color of group `index`.
pub fn category_color(index: usize) -> &'static str {
    CATEGORY10[index % CATEGORY10.len()]
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.strip_prefix('#')?;
    if h.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some((r, g, b))
}

/// d3 `rgb(color).darker()`: every channel scaled by 0.7, emitted as `rgb(r, g, b)`.
///
/// Colors that are not `#rrggbb` are returned unchanged.
pub fn darker(hex: &str) -> String {
    let Some((r, g, b)) = parse_hex(hex) else {
        return hex.to_string();
    };
    let scale = |c: u8| (c as f64 * 0.7).round().clamp(0.0, 255.0) as u8;
    format!("rgb({}, {}, {})", scale(r), scale(g), scale(b))
}

//! Fixed-width sparkline rendering.

/// Sparkline characters (8 levels of height).
pub const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Glyph used for padding and for series without variation.
pub const FLAT_CHAR: char = '─';

/// Compute the ramp levels (0-7) for a series, oldest first.
///
/// Absent entries are dropped. Returns `None` when fewer than two values
/// remain or they are all equal. When more values remain than `width`, every
/// `ceil(len / width)`-th value is kept starting with the first, so the
/// result never holds more than `width` levels.
pub fn levels(series: &[Option<f64>], width: usize) -> Option<Vec<u8>> {
    assert!(width > 0, "sparkline width must be positive");

    let values: Vec<f64> = series.iter().flatten().copied().collect();
    if values.len() < 2 {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return None;
    }
    let range = max - min;

    let stride = values.len().div_ceil(width).max(1);

    Some(
        values
            .iter()
            .step_by(stride)
            .map(|&v| {
                let normalized = (v - min) / range;
                ((normalized * 7.0).floor() as u8).min(7)
            })
            .collect(),
    )
}

/// Render a series as exactly `width` glyphs.
///
/// Degenerate series render as all [`FLAT_CHAR`]; short series are padded on
/// the right with it.
///
/// # Panics
///
/// Panics if `width` is zero.
pub fn render(series: &[Option<f64>], width: usize) -> String {
    let Some(levels) = levels(series, width) else {
        return FLAT_CHAR.to_string().repeat(width);
    };

    let mut line: String = levels.iter().map(|&l| SPARKLINE_CHARS[l as usize]).collect();
    line.extend(std::iter::repeat(FLAT_CHAR).take(width - levels.len()));
    line
}

/// Teardrop outline on a 24×24 grid, tip at the bottom centre.
const PIN_PATH: &str = "M12 1C7.6 1 4 4.4 4 8.8 4 14.6 12 23 12 23s8-8.4 8-14.2C20 4.4 16.4 1 12 1z";

const PIN_FILL: &str = "#d94f3d";
const SELECTED_PIN_FILL: &str = "#f2b134";

/// Inline SVG for a marker pin drawn `size` pixels tall.
pub fn pin_svg(size: f64, selected: bool) -> String {
    let fill = if selected { SELECTED_PIN_FILL } else { PIN_FILL };
    let path = PIN_PATH;
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.1}" height="{size:.1}" viewBox="0 0 24 24"><path d="{path}" fill="{fill}" stroke="#ffffff" stroke-width="1.2"/><circle cx="12" cy="9" r="3" fill="#ffffff"/></svg>"##
    )
}

/// Pin size each marker is heading towards.
pub fn pin_targets(
    selection: Option<usize>,
    count: usize,
    pin_size: f64,
    selected_pin_size: f64,
) -> Vec<f64> {
    (0..count)
        .map(|i| {
            if selection == Some(i) {
                selected_pin_size
            } else {
                pin_size
            }
        })
        .collect()
}

/// Index of the marker nearest to `point` within `threshold` pixels.
pub fn nearest_marker(positions: &[(f64, f64)], point: (f64, f64), threshold: f64) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| (i, (p.0 - point.0).hypot(p.1 - point.1)))
        .filter(|(_, d)| *d <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

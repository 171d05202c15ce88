//! Label text helpers.

/// `value` with comma thousands separators and at most three decimals,
/// trailing zeros dropped.
#[must_use]
pub fn thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let frac = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && (whole > 0 || frac > 0) {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if frac > 0 {
        let decimals = format!("{frac:03}");
        out.push('.');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// Area label for `count` grid cells of `cell_area` km² each.
#[must_use]
pub fn area_km2(count: usize, cell_area: f64) -> String {
    format!("{}km²", thousands(count as f64 * cell_area))
}

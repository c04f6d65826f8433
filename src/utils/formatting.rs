//! Formatting helpers shared by the terminal and export renderers.

/// `8.5` → `"8.50"`; never prints `-0.00`.
pub fn hours2(value: f64) -> String {
    let v = if value == 0.0 { 0.0 } else { value };
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// `8.5` → `"08h 30m"`, rounding to the nearest minute.
pub fn hours2readable(hours: f64) -> String {
    let mins = (hours * 60.0).round() as i64;
    let sign = if mins < 0 { "-" } else { "" };
    let abs_m = mins.abs();
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

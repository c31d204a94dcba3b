/// Placeholder shown for undefined statistics.
pub const MISSING: &str = "–";

/// `$12,345` rounded to whole dollars, or `–` for `NaN`.
pub fn format_usd(v: f64) -> String {
    if !v.is_finite() {
        return MISSING.to_string();
    }
    let rounded = v.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Like [`format_usd`] for optional table cells.
pub fn format_usd_opt(v: Option<f64>) -> String {
    v.map_or_else(|| MISSING.to_string(), format_usd)
}

/// `+12.3%` / `-4.0%`, or `–` when undefined.
pub fn format_pct(v: Option<f64>) -> String {
    match v {
        Some(p) if p.is_finite() => format!("{p:+.1}%"),
        _ => MISSING.to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Dollar-figure extraction and formatting.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `$X unit`, `USD X unit`, or `X unit USD/dollars`, in one alternation so a
/// span is counted once even when it fits two surface forms.
static DOLLAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    let num = r"(\d[\d,]*(?:\.\d+)?)";
    let unit = r"(trillion|billion|million|t|b|m)\b";
    Regex::new(&format!(
        r"(?i)\$\s?{num}\s*{unit}(?:\s*(?:usd|dollars)\b)?|\busd\s*\$?\s?{num}\s*{unit}|{num}\s*{unit}\s*(?:usd|dollars)\b"
    ))
    .unwrap()
});

/// Every USD magnitude mentioned in `text`, in order of appearance.
///
/// Returns an empty list when nothing matches.
pub fn extract_dollar_figures(text: &str) -> Vec<f64> {
    DOLLAR_RE
        .captures_iter(text)
        .filter_map(|cap| figure_from(&cap))
        .collect()
}

fn figure_from(cap: &Captures<'_>) -> Option<f64> {
    // Each alternative has its own (number, unit) group pair.
    let (number, unit) = [(1, 2), (3, 4), (5, 6)]
        .into_iter()
        .find_map(|(n, u)| Some((cap.get(n)?.as_str(), cap.get(u)?.as_str())))?;

    let value: f64 = number.trim_end_matches(',').replace(',', "").parse().ok()?;
    let magnitude = unit_magnitude(unit)?;
    let figure = value * magnitude;
    (figure > 0.0 && figure.is_finite()).then_some(figure)
}

fn unit_magnitude(unit: &str) -> Option<f64> {
    match unit.chars().next()?.to_ascii_lowercase() {
        't' => Some(1e12),
        'b' => Some(1e9),
        'm' => Some(1e6),
        _ => None,
    }
}

/// Render a dollar amount as `$1.2T`, `$45.0B`, `$300.0M` or `$12,000`.
pub fn format_usd(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("${:.1}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.1}M", value / 1e6)
    } else {
        format!("${}", group_thousands(value.round() as i64))
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

//! Configuration files may give the size threshold as "5M" or "512KB" while the rolling
//! check works on raw bytes; these two functions bridge that gap.

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Parses "500", "64K", "5MB", "1.5G" into bytes. Binary multiples, case-insensitive.
#[must_use]
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier): (&str, u64) = if s.ends_with("GB") || s.ends_with('G') {
        (s.trim_end_matches("GB").trim_end_matches('G'), GIB)
    } else if s.ends_with("MB") || s.ends_with('M') {
        (s.trim_end_matches("MB").trim_end_matches('M'), MIB)
    } else if s.ends_with("KB") || s.ends_with('K') {
        (s.trim_end_matches("KB").trim_end_matches('K'), KIB)
    } else {
        (s.trim_end_matches('B'), 1)
    };

    let num_str = num_str.trim();
    if let Ok(n) = num_str.parse::<u64>() {
        return n.checked_mul(multiplier);
    }

    let n = num_str.parse::<f64>().ok()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let bytes = (n * multiplier as f64) as u64;
    Some(bytes)
}

/// Raw byte counts are unreadable in diagnostics.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let bytes_f = bytes as f64;

    if bytes >= GIB {
        format!("{:.2} GB", bytes_f / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MB", bytes_f / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KB", bytes_f / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

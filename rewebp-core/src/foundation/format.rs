//! Human-readable formatting for sizes, frame rates and durations.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with a 1024 ladder (`B`, `KB`, `MB`, `GB`).
///
/// Whole bytes print without decimals; everything above prints with two.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }
    let mut value = bytes;
    let mut idx = 0;
    while value >= 1024.0 && idx < UNITS.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }
    if idx == 0 {
        format!("{value:.0} {}", UNITS[idx])
    } else {
        format!("{value:.2} {}", UNITS[idx])
    }
}

/// Format a frame rate with one decimal, or `—` when unknown.
pub fn format_fps(fps: f64) -> String {
    if !fps.is_finite() || fps <= 0.0 {
        return "—".to_string();
    }
    format!("{fps:.1} fps")
}

/// Format a millisecond duration as seconds with two decimals, or `—` when unknown.
pub fn format_duration_ms(ms: f64) -> String {
    if !ms.is_finite() || ms <= 0.0 {
        return "—".to_string();
    }
    format!("{:.2} s", ms / 1000.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/format.rs"]
mod tests;

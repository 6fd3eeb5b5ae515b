//! Display formatting for byte counts and timestamps.

use chrono::{DateTime, Local};

/// Format a byte count with 1024-based units.
///
/// Plain bytes are printed as an integer; KB, MB and GB always carry two
/// decimals, with exact halves rounded up.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        scaled(bytes, KB, "KB")
    } else if bytes < GB {
        scaled(bytes, MB, "MB")
    } else {
        scaled(bytes, GB, "GB")
    }
}

fn scaled(bytes: u64, unit: u64, label: &str) -> String {
    let unit = u128::from(unit);
    let hundredths = (u128::from(bytes) * 100 + unit / 2) / unit;
    format!("{}.{:02} {label}", hundredths / 100, hundredths % 100)
}

/// Format an instant as `YYYY-MM-DD HH:mm:ss` in local time.
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

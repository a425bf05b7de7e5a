const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable byte count in binary units, e.g. `1.50 KB`.
pub fn format_size(bytes: u64) -> String {
    let scaled = UNITS
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find(|(exp, _)| bytes >= 1u64 << (10 * exp));

    match scaled {
        Some((exp, unit)) => format!("{:.2} {unit}", bytes as f64 / (1u64 << (10 * exp)) as f64),
        None => format!("{bytes} B"),
    }
}

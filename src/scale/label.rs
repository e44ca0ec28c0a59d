/// Abbreviated human-readable label for a breakpoint value.
///
/// Values below one thousand are printed as-is; larger values use `K`, `M` and `B` suffixes
/// with at most two decimals and trailing zeros trimmed (`1000 -> "1 K"`, `2.5e6 -> "2.5 M"`).
pub fn abbreviate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    let magnitude = value.abs();
    for (scale, suffix) in UNITS {
        if magnitude >= scale {
            return format!("{} {suffix}", trim_decimals(value / scale));
        }
    }
    trim_decimals(value)
}

fn trim_decimals(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

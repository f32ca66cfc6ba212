//! Pure display formatting for the dashboard tables.

use chrono::{DateTime, Local, NaiveDateTime};

/// Insert thousands separators into a plain decimal string, keeping any sign
/// and fractional part: `"-1234567.5"` becomes `"-1,234,567.5"`.
pub fn group_digits(number: &str) -> String {
    let (sign, rest) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// US-dollar amount with two decimals and thousands separators:
/// `63421.5` becomes `"$63,421.50"`.
pub fn usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", group_digits(&format!("{:.2}", -value)))
    } else {
        format!("${}", group_digits(&format!("{value:.2}")))
    }
}

/// Two-decimal percentage: `3.456` becomes `"3.46%"`.
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Abbreviated market capitalization: trillions, billions and millions get a
/// two-decimal suffix form, anything smaller the full separated integer.
pub fn market_cap(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${}", group_digits(&format!("{value:.0}")))
    }
}

/// Wall-clock time as `HH:MM:SS`.
pub fn clock_time(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// An upstream timestamp as wall-clock time, `"-"` when absent or unparsable.
///
/// TradingEconomics sends naive ISO timestamps (`2026-08-25T14:30:00`); those
/// are shown as-is. RFC 3339 timestamps are converted to local time first.
pub fn local_time_or_dash(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format("%H:%M:%S").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(ts) => ts.format("%H:%M:%S").to_string(),
        Err(_) => "-".to_string(),
    }
}

//! Display formatting shared by pages and printed reports.

use chrono::{DateTime, Utc};

/// US-dollar amount with thousands separators, e.g. `-$1,234.56`
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Integer with thousands separators
pub fn count(n: u64) -> String {
    group_thousands(n)
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

/// `90` → `1h 30m`, `45` → `45m`
pub fn duration_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, m) => format!("{}h {:02}m", h, m),
    }
}

/// Accumulated seconds rounded down to minutes
pub fn duration_seconds(seconds: u64) -> String {
    duration_minutes(u32::try_from(seconds / 60).unwrap_or(u32::MAX))
}

/// Whole percentage of `done` over `total`; zero total reads as 0%
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done.min(total) * 100) / total) as u8
}

pub fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

pub fn date_time(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %H:%M UTC").to_string()
}

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_currency() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(1234.5), "$1,234.50");
        assert_eq!(currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(currency(-1234.567), "-$1,234.57");
        assert_eq!(currency(0.994), "$0.99");
        assert_eq!(currency(f64::NAN), "$0.00");
    }

    #[test]
    fn test_count() {
        assert_eq!(count(999), "999");
        assert_eq!(count(12345), "12,345");
    }

    #[test]
    fn test_durations() {
        assert_eq!(duration_minutes(45), "45m");
        assert_eq!(duration_minutes(65), "1h 05m");
        assert_eq!(duration_seconds(7260), "2h 01m");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(5, 5), 100);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(9, 4), 100);
    }

    #[test]
    fn test_dates() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 0).unwrap();
        assert_eq!(date(&ts), "Mar 7, 2026");
        assert_eq!(date_time(&ts), "Mar 7, 2026 14:05 UTC");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }
}

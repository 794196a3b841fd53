//! Minute-granularity durations as written in `@elapsed`/`@est` payloads:
//! `1h30m`, `2h`, `45m`. Parsing is strict; formatting always emits the
//! shortest form.

pub fn parse_minutes(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (hours, rest) = match s.find('h') {
        Some(idx) => {
            let h: i64 = s[..idx].parse().ok()?;
            (h, &s[idx + 1..])
        }
        None => (0, s),
    };

    let minutes = if rest.is_empty() {
        0
    } else {
        let m: i64 = rest.strip_suffix('m')?.parse().ok()?;
        if m >= 60 && hours > 0 {
            return None;
        }
        m
    };

    if hours < 0 || minutes < 0 {
        return None;
    }
    Some(hours * 60 + minutes)
}

pub fn format_minutes(total: i64) -> String {
    let total = total.max(0);
    let hours = total / 60;
    let minutes = total % 60;
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{}m", h, m),
    }
}

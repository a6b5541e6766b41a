use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Kick-off used when the configured start time cannot be read
pub fn default_start() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

/// Formats a clock time as HH:MM
pub fn fmt_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn parse_clock_part(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parses "HH:MM" (or "HHhMM"), clamping hours to 0..=23 and minutes to 0..=59
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    let (hours, minutes) = value
        .split_once(':')
        .or_else(|| value.split_once(|c: char| c == 'h' || c == 'H'))?;

    let hours = parse_clock_part(hours)?.min(23);
    let minutes = if minutes.trim().is_empty() && !value.contains(':') {
        0
    } else {
        parse_clock_part(minutes)?.min(59)
    };
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Adds minutes to a clock time; wraps around midnight since plans are intraday
pub fn add_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    let base = (time.hour() * 60 + time.minute()) as i64;
    let total = (base + minutes).rem_euclid(MINUTES_PER_DAY);
    NaiveTime::from_hms_opt((total / 60) as u32, (total % 60) as u32, 0).unwrap_or(time)
}

/// Kick-off of slot `time_index` when every slot lasts one match plus one break
pub fn slot_start(start: NaiveTime, time_index: usize, match_min: u32, break_min: u32) -> NaiveTime {
    let step = match_min as i64 + break_min as i64;
    add_minutes(start, time_index as i64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_and_formats() {
        assert_eq!(parse_hhmm("09:05"), Some(hm(9, 5)));
        assert_eq!(parse_hhmm(" 9:30 "), Some(hm(9, 30)));
        assert_eq!(parse_hhmm("14h15"), Some(hm(14, 15)));
        assert_eq!(parse_hhmm("14h"), Some(hm(14, 0)));
        assert_eq!(fmt_time(hm(9, 5)), "09:05");
    }

    #[test]
    fn clamps_out_of_range_parts() {
        assert_eq!(parse_hhmm("25:70"), Some(hm(23, 59)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("ten"), None);
        assert_eq!(parse_hhmm("10:"), None);
        assert_eq!(parse_hhmm("1a:00"), None);
        assert_eq!(parse_hhmm("100:00"), None);
    }

    #[test]
    fn add_minutes_carries_and_wraps() {
        assert_eq!(add_minutes(hm(10, 50), 15), hm(11, 5));
        assert_eq!(add_minutes(hm(23, 50), 20), hm(0, 10));
        assert_eq!(add_minutes(hm(0, 10), -20), hm(23, 50));
    }

    #[test]
    fn slot_start_steps_by_match_and_break() {
        let start = hm(10, 0);
        assert_eq!(slot_start(start, 0, 10, 2), hm(10, 0));
        assert_eq!(slot_start(start, 5, 10, 2), hm(11, 0));
    }

    #[test]
    fn default_start_is_ten() {
        assert_eq!(fmt_time(default_start()), "10:00");
    }
}

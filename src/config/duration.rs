// src/config/duration.rs

//! Interval parsing.
//!
//! Accepted forms:
//! - plain integer seconds: `30`, `0`
//! - negative integers (or any `-` prefixed value): one-shot mode
//! - one or more `<n><unit>` segments: `500ms`, `45s`, `5m`, `1h30m`, `2d`

use std::time::Duration;

/// Parse an interval string.
///
/// Returns `Ok(None)` for negative intervals, which select one-shot mode.
pub fn parse_interval(s: &str) -> Result<Option<Duration>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty interval string".to_string());
    }

    if let Ok(secs) = s.parse::<i64>() {
        return Ok(u64::try_from(secs).ok().map(Duration::from_secs));
    }

    if let Some(rest) = s.strip_prefix('-') {
        // Validate the magnitude so `-abc` still reports a typo.
        parse_duration(rest)?;
        return Ok(None);
    }

    parse_duration(s).map(Some)
}

/// Parse a compound duration such as `1h30m`.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let mut total = Duration::ZERO;
    let mut rest = s.trim();

    if rest.is_empty() {
        return Err("empty duration string".to_string());
    }

    while !rest.is_empty() {
        // Find the boundary between digits and suffix.
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("duration '{s}' is missing a unit suffix"))?;
        if digits_end == 0 {
            return Err(format!("invalid duration '{s}': expected a number"));
        }
        let (num_part, tail) = rest.split_at(digits_end);
        let value: u64 = num_part
            .parse()
            .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit_part, next) = tail.split_at(unit_end);
        let unit = unit_part.trim().to_lowercase();

        let segment = match unit.as_str() {
            "ms" => Some(Duration::from_millis(value)),
            "s" => Some(Duration::from_secs(value)),
            "m" => value.checked_mul(60).map(Duration::from_secs),
            "h" => value.checked_mul(60 * 60).map(Duration::from_secs),
            "d" => value.checked_mul(60 * 60 * 24).map(Duration::from_secs),
            _ => {
                return Err(format!(
                    "unsupported duration unit '{}'; expected ms, s, m, h or d",
                    unit
                ))
            }
        };
        total = segment
            .and_then(|segment| total.checked_add(segment))
            .ok_or_else(|| format!("interval '{s}' overflows"))?;
        rest = next;
    }

    Ok(total)
}

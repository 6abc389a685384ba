//! FILENAME: core/summary-engine/src/period.rs
//! PURPOSE: Chronological ordering of period values.
//! CONTEXT: Period dimension values arrive as text (`2024`, `2024-02`,
//! `2024-02-15`, timestamps) or as plain numbers. Each distinct value is
//! parsed once into a `PeriodKey`; ranking only ever compares keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use gridvis_model::Value;

/// Sortable form of a period value. Unparseable values are the oldest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeriodKey {
    Unparsed,
    Number(f64),
    Instant(NaiveDateTime),
}

impl PeriodKey {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) if n.is_finite() => PeriodKey::Number(*n),
            Value::Text(s) => parse_period_text(s.trim()),
            _ => PeriodKey::Unparsed,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            PeriodKey::Unparsed => 0,
            PeriodKey::Number(_) => 1,
            PeriodKey::Instant(_) => 2,
        }
    }

    /// Total order: Unparsed < Number < Instant, then by value.
    pub fn chrono_cmp(&self, other: &PeriodKey) -> Ordering {
        match (self, other) {
            (PeriodKey::Number(a), PeriodKey::Number(b)) => a.total_cmp(b),
            (PeriodKey::Instant(a), PeriodKey::Instant(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn start_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

fn parse_period_text(s: &str) -> PeriodKey {
    if s.is_empty() {
        return PeriodKey::Unparsed;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return PeriodKey::Instant(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return PeriodKey::Instant(dt);
        }
    }

    let date = if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Some(d)
    } else if s.len() == 7 {
        // YYYY-MM
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").ok()
    } else if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse::<i32>().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    } else {
        None
    };
    if let Some(instant) = date.and_then(start_of_day) {
        return PeriodKey::Instant(instant);
    }

    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => PeriodKey::Number(n),
        _ => PeriodKey::Unparsed,
    }
}

/// Indices of `keys` from newest to oldest. Stable: equal keys keep their
/// input order.
pub fn newest_first(keys: &[PeriodKey]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[b].chrono_cmp(&keys[a]));
    order
}

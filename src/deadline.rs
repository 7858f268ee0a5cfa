use chrono::NaiveDate;

const DAY_MS: i64 = 86_400_000;

/// Urgency bucket for a task deadline relative to an injected "today".
///
/// The caller supplies `now` rather than reading the wall clock here, so the
/// classification is deterministic under test and there is exactly one code
/// path deciding what "today" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue(i64),
    Today,
    Urgent(i64),
    Normal(i64),
}

impl Urgency {
    pub fn text(&self) -> String {
        match self {
            Urgency::Overdue(n) => format!("Overdue {} days", n),
            Urgency::Today => "Today".to_string(),
            Urgency::Urgent(n) | Urgency::Normal(n) => format!("In {} days", n),
        }
    }

    /// Whether the badge warrants visual emphasis.
    pub fn is_emphasized(&self) -> bool {
        !matches!(self, Urgency::Normal(_))
    }
}

/// Classifies a due date against `now` using millisecond math rounded up to
/// whole days, so the result matches regardless of calendar quirks.
pub fn classify(due: NaiveDate, now: NaiveDate) -> Urgency {
    let diff_ms = due
        .signed_duration_since(now)
        .num_milliseconds();
    let days = div_ceil(diff_ms, DAY_MS);
    if days < 0 {
        Urgency::Overdue(days.abs())
    } else if days == 0 {
        Urgency::Today
    } else if days <= 3 {
        Urgency::Urgent(days)
    } else {
        Urgency::Normal(days)
    }
}

/// Human display form of a due date, e.g. "Nov 04, 2025".
pub fn format_display(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn three_days_past_is_overdue() {
        let urgency = classify(date("2025-11-01"), date("2025-11-04"));
        assert_eq!(urgency, Urgency::Overdue(3));
        assert_eq!(urgency.text(), "Overdue 3 days");
    }

    #[test]
    fn same_day_is_today() {
        let urgency = classify(date("2025-11-04"), date("2025-11-04"));
        assert_eq!(urgency, Urgency::Today);
        assert_eq!(urgency.text(), "Today");
    }

    #[test]
    fn two_days_out_is_urgent() {
        let urgency = classify(date("2025-11-06"), date("2025-11-04"));
        assert_eq!(urgency, Urgency::Urgent(2));
        assert_eq!(urgency.text(), "In 2 days");
    }

    #[test]
    fn urgent_window_ends_at_three_days() {
        assert_eq!(
            classify(date("2025-11-07"), date("2025-11-04")),
            Urgency::Urgent(3)
        );
        assert_eq!(
            classify(date("2025-11-08"), date("2025-11-04")),
            Urgency::Normal(4)
        );
    }

    #[test]
    fn normal_badge_is_not_emphasized() {
        assert!(!classify(date("2025-12-01"), date("2025-11-04")).is_emphasized());
        assert!(classify(date("2025-11-01"), date("2025-11-04")).is_emphasized());
        assert!(classify(date("2025-11-04"), date("2025-11-04")).is_emphasized());
    }

    #[test]
    fn display_format_is_stable() {
        assert_eq!(format_display(date("2025-11-04")), "Nov 04, 2025");
    }
}

use chrono::prelude::*;

pub(crate) fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Time left until the event starts, zero once it has.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Countdown {
    pub days: i64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    pub(crate) fn until<Tz: TimeZone>(now: DateTime<Utc>, start: &DateTime<Tz>) -> Self {
        let total = (start.with_timezone(&Utc) - now).num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400 / 3_600) as u8,
            minutes: (total % 3_600 / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub(crate) fn is_over(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn units(&self) -> [(String, &'static str); 4] {
        [
            (self.days.to_string(), "days"),
            (format!("{:02}", self.hours), "hours"),
            (format!("{:02}", self.minutes), "minutes"),
            (format!("{:02}", self.seconds), "seconds"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn splits_remaining_time() {
        let now = at("2026-11-12T22:58:30+00:00").with_timezone(&Utc);
        let countdown = Countdown::until(now, &at("2026-11-14T09:00:00+08:00"));

        assert_eq!(
            countdown,
            Countdown {
                days: 1,
                hours: 2,
                minutes: 1,
                seconds: 30
            }
        );
        assert!(!countdown.is_over());
        assert_eq!(countdown.units()[1].0, "02");
    }

    #[test]
    fn saturates_after_start() {
        let now = at("2026-11-15T00:00:00+00:00").with_timezone(&Utc);
        let countdown = Countdown::until(now, &at("2026-11-14T09:00:00+08:00"));

        assert!(countdown.is_over());
    }
}

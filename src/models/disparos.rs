//! Weekly outreach ("disparo") counters.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::{require_at_most, require_non_negative, Salesperson};
use crate::errors::AppError;

/// Largest value accepted for a single day or for the daily count.
pub const MAX_BUCKET: i64 = 1_000_000;

/// Monday-first week order used for every bucket iteration.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Local bucket name for a weekday.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda",
        Weekday::Tue => "terca",
        Weekday::Wed => "quarta",
        Weekday::Thu => "quinta",
        Weekday::Fri => "sexta",
        Weekday::Sat => "sabado",
        Weekday::Sun => "domingo",
    }
}

/// Seven named weekday buckets.
///
/// Missing keys in a request body default to zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WeekCounts {
    pub segunda: i64,
    pub terca: i64,
    pub quarta: i64,
    pub quinta: i64,
    pub sexta: i64,
    pub sabado: i64,
    pub domingo: i64,
}

impl WeekCounts {
    /// Build the buckets by asking `f` for each weekday in week order.
    pub fn from_fn(mut f: impl FnMut(Weekday) -> i64) -> Self {
        Self {
            segunda: f(Weekday::Mon),
            terca: f(Weekday::Tue),
            quarta: f(Weekday::Wed),
            quinta: f(Weekday::Thu),
            sexta: f(Weekday::Fri),
            sabado: f(Weekday::Sat),
            domingo: f(Weekday::Sun),
        }
    }

    pub fn get(&self, day: Weekday) -> i64 {
        match day {
            Weekday::Mon => self.segunda,
            Weekday::Tue => self.terca,
            Weekday::Wed => self.quarta,
            Weekday::Thu => self.quinta,
            Weekday::Fri => self.sexta,
            Weekday::Sat => self.sabado,
            Weekday::Sun => self.domingo,
        }
    }

    /// `(weekday, value)` pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, i64)> + '_ {
        WEEK.iter().map(move |day| (*day, self.get(*day)))
    }

    /// Sum of the seven buckets, saturating instead of overflowing.
    pub fn total(&self) -> i64 {
        self.iter()
            .fold(0i64, |total, (_, value)| total.saturating_add(value))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (day, value) in self.iter() {
            require_non_negative(weekday_label(day), value)?;
            require_at_most(weekday_label(day), value, MAX_BUCKET)?;
        }
        Ok(())
    }
}

/// Persisted weekly counters of one salesperson.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyDisparos {
    pub salesperson_id: i64,
    #[serde(flatten)]
    pub counts: WeekCounts,
}

/// Where the counters attached to a salesperson came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DisparoSource {
    /// Stored weekly record
    Recorded,
    /// Randomized placeholder, regenerated on every call
    Simulated,
    /// Zero buckets, used only by the plain listing view
    ZeroFilled,
}

/// A salesperson joined with the weekly counters used for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonWithDisparos {
    #[serde(flatten)]
    pub salesperson: Salesperson,
    pub disparos_semanais: WeekCounts,
    pub source: DisparoSource,
}

impl SalespersonWithDisparos {
    pub fn weekly_total(&self) -> i64 {
        self.disparos_semanais.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_order_is_monday_first() {
        let labels: Vec<_> = WEEK.iter().map(|d| weekday_label(*d)).collect();
        assert_eq!(
            labels,
            ["segunda", "terca", "quarta", "quinta", "sexta", "sabado", "domingo"]
        );
    }

    #[test]
    fn test_total_and_get() {
        let counts = WeekCounts::from_fn(|day| day.num_days_from_monday() as i64 + 1);
        assert_eq!(counts.get(Weekday::Mon), 1);
        assert_eq!(counts.get(Weekday::Sun), 7);
        assert_eq!(counts.total(), 28);
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let counts: WeekCounts = serde_json::from_str(r#"{"segunda": 5, "sexta": 2}"#).unwrap();
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.domingo, 0);
    }

    #[test]
    fn test_negative_bucket_is_rejected() {
        let counts = WeekCounts {
            quarta: -3,
            ..WeekCounts::default()
        };
        assert!(matches!(counts.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_oversized_bucket_is_rejected() {
        let counts = WeekCounts {
            segunda: i64::MAX,
            terca: 1,
            ..WeekCounts::default()
        };
        assert!(matches!(counts.validate(), Err(AppError::Validation(_))));

        let at_limit = WeekCounts::from_fn(|_| MAX_BUCKET);
        assert!(at_limit.validate().is_ok());
        assert_eq!(at_limit.total(), 7 * MAX_BUCKET);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let counts = WeekCounts {
            segunda: i64::MAX,
            terca: 1,
            ..WeekCounts::default()
        };
        assert_eq!(counts.total(), i64::MAX);
    }
}

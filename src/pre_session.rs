//! Pre-session advice
//!
//! Buckets the lead time before a scheduled session into tiers and returns a
//! filtered slice of the catalog for that tier. Unlike the post-session path
//! there is no scoring: items are filtered and truncated in catalog order.

use crate::catalog::FoodCatalog;
use crate::clock::Clock;
use crate::error::RecommendError;
use crate::message::pre_session_message;
use crate::recovery::round_half_up;
use crate::types::{FoodItem, LeadTimeTier, MealType, PreSessionReport};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Number of suggestions returned per tier
pub const MAX_SUGGESTIONS: usize = 3;

/// Naive date-time layouts, read as wall-clock time in the clock's zone
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a scheduled start time.
///
/// RFC 3339 timestamps keep their own offset. Naive date-times are resolved
/// by [`Clock::localize`], which for the system clock applies the zone rules of
/// the scheduled date. A bare date is midnight UTC.
pub fn parse_scheduled_time(
    input: &str,
    clock: &dyn Clock,
) -> Result<DateTime<FixedOffset>, RecommendError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RecommendError::MissingField("scheduledTime".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }

    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return clock
                .localize(&naive)
                .ok_or_else(|| RecommendError::InvalidScheduledTime(trimmed.to_string()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| RecommendError::InvalidScheduledTime(trimmed.to_string()))?;
        return Ok(Utc.from_utc_datetime(&midnight).fixed_offset());
    }

    Err(RecommendError::InvalidScheduledTime(trimmed.to_string()))
}

/// Classify signed minutes-until-session into a tier
pub fn lead_time_tier(minutes_until: f64) -> LeadTimeTier {
    if minutes_until > 120.0 {
        LeadTimeTier::FullMeal
    } else if minutes_until > 60.0 {
        LeadTimeTier::LightMeal
    } else {
        LeadTimeTier::VeryLight
    }
}

/// Advisor for meals ahead of a scheduled session
pub struct PreSessionAdvisor;

impl PreSessionAdvisor {
    /// Build the pre-session report for a parsed start time
    pub fn advise(
        catalog: &FoodCatalog,
        scheduled: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> PreSessionReport {
        let minutes_until = (scheduled - now).num_milliseconds() as f64 / 60_000.0;
        let tier = lead_time_tier(minutes_until);

        let recommendations = Self::candidates(catalog, tier);

        tracing::debug!(
            minutes_until,
            ?tier,
            suggestions = recommendations.len(),
            "pre-session advice"
        );

        PreSessionReport {
            minutes_until: round_half_up(minutes_until),
            tier,
            message: pre_session_message(minutes_until),
            recommendations,
        }
    }

    /// Tier-specific catalog slice, first three matches in catalog order
    pub fn candidates(catalog: &FoodCatalog, tier: LeadTimeTier) -> Vec<FoodItem> {
        let (meal_type, keep): (MealType, fn(&FoodItem) -> bool) = match tier {
            LeadTimeTier::FullMeal => (MealType::Breakfast, |f: &FoodItem| {
                f.best_for == "pre-yoga" || f.calories < 300.0
            }),
            LeadTimeTier::LightMeal => (MealType::Snacks, |f: &FoodItem| f.calories < 250.0),
            LeadTimeTier::VeryLight => (MealType::Snacks, |f: &FoodItem| f.calories < 150.0),
        };

        catalog
            .bucket(meal_type)
            .iter()
            .filter(|f| keep(*f))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Datelike, Duration};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-05-01T08:00:00+05:45").unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(now())
    }

    /// Clock on standard time (+01:00) whose zone moves to +02:00 from April on
    struct DstClock;

    impl Clock for DstClock {
        fn now(&self) -> DateTime<FixedOffset> {
            DateTime::parse_from_rfc3339("2024-03-20T08:00:00+01:00").unwrap()
        }

        fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
            let hours = if naive.month() >= 4 { 2 } else { 1 };
            FixedOffset::east_opt(hours * 3600)?
                .from_local_datetime(naive)
                .single()
        }
    }

    fn food(name: &str, calories: f64, best_for: &str) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            local_name: String::new(),
            calories,
            protein: 5.0,
            carbs: None,
            fat: None,
            fiber: None,
            best_for: best_for.to_string(),
            benefits: vec![],
        }
    }

    fn fixture() -> FoodCatalog {
        FoodCatalog {
            breakfast: vec![
                food("heavy", 500.0, "energy"),
                food("primer", 450.0, "pre-yoga"),
                food("light", 200.0, ""),
                food("porridge", 299.0, ""),
                food("extra", 100.0, "pre-yoga"),
            ],
            lunch: vec![food("lunch", 100.0, "pre-yoga")],
            dinner: vec![],
            snacks: vec![
                food("nuts", 280.0, ""),
                food("lassi", 180.0, ""),
                food("banana", 105.0, ""),
                food("fruit", 120.0, ""),
                food("yogurt", 140.0, ""),
                food("chana", 160.0, ""),
            ],
        }
    }

    fn names(items: &[FoodItem]) -> Vec<&str> {
        items.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(lead_time_tier(121.0), LeadTimeTier::FullMeal);
        assert_eq!(lead_time_tier(120.0), LeadTimeTier::LightMeal);
        assert_eq!(lead_time_tier(60.5), LeadTimeTier::LightMeal);
        assert_eq!(lead_time_tier(60.0), LeadTimeTier::VeryLight);
        assert_eq!(lead_time_tier(-30.0), LeadTimeTier::VeryLight);
    }

    #[test]
    fn test_full_meal_tier_uses_breakfast() {
        let report = PreSessionAdvisor::advise(&fixture(), now() + Duration::minutes(180), now());

        assert_eq!(report.minutes_until, 180);
        assert_eq!(report.tier, LeadTimeTier::FullMeal);
        assert_eq!(names(&report.recommendations), vec!["primer", "light", "porridge"]);
    }

    #[test]
    fn test_ninety_minutes_out_gets_light_snacks() {
        let report = PreSessionAdvisor::advise(&fixture(), now() + Duration::minutes(90), now());

        assert_eq!(report.minutes_until, 90);
        assert_eq!(report.tier, LeadTimeTier::LightMeal);
        assert_eq!(names(&report.recommendations), vec!["lassi", "banana", "fruit"]);
        assert!(report.recommendations.iter().all(|f| f.calories < 250.0));
    }

    #[test]
    fn test_imminent_session_gets_very_light_snacks() {
        let report = PreSessionAdvisor::advise(&fixture(), now() + Duration::minutes(20), now());

        assert_eq!(report.tier, LeadTimeTier::VeryLight);
        assert_eq!(names(&report.recommendations), vec!["banana", "fruit", "yogurt"]);
    }

    #[test]
    fn test_past_session_is_negative_and_very_light() {
        let report = PreSessionAdvisor::advise(&fixture(), now() - Duration::minutes(45), now());

        assert_eq!(report.minutes_until, -45);
        assert_eq!(report.tier, LeadTimeTier::VeryLight);
    }

    #[test]
    fn test_minutes_round_half_up() {
        let scheduled = now() + Duration::seconds(90 * 60 + 30);
        let report = PreSessionAdvisor::advise(&fixture(), scheduled, now());
        assert_eq!(report.minutes_until, 91);
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let parsed = parse_scheduled_time("2024-05-01T03:30:00Z", &clock()).unwrap();
        assert_eq!(parsed, now() + Duration::minutes(75));
    }

    #[test]
    fn test_parse_naive_is_local_to_clock() {
        let parsed = parse_scheduled_time("2024-05-01T10:00", &clock()).unwrap();
        assert_eq!(parsed - now(), Duration::hours(2));

        let parsed = parse_scheduled_time("2024-05-01 09:15:00", &clock()).unwrap();
        assert_eq!(parsed - now(), Duration::minutes(75));
    }

    #[test]
    fn test_parse_naive_uses_offset_of_scheduled_date() {
        let parsed = parse_scheduled_time("2024-04-02T08:00", &DstClock).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        // 13 days of wall time, one hour shorter across the change
        assert_eq!(parsed - DstClock.now(), Duration::days(13) - Duration::hours(1));

        let parsed = parse_scheduled_time("2024-03-25T08:00", &DstClock).unwrap();
        assert_eq!(parsed - DstClock.now(), Duration::days(5));
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let parsed = parse_scheduled_time("2024-05-02", &clock()).unwrap();
        assert_eq!(
            parsed,
            DateTime::parse_from_rfc3339("2024-05-02T00:00:00Z").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_scheduled_time("tomorrow-ish", &clock()),
            Err(RecommendError::InvalidScheduledTime(_))
        ));
        assert!(matches!(
            parse_scheduled_time("   ", &clock()),
            Err(RecommendError::MissingField(_))
        ));
    }
}

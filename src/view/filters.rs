use std::str::FromStr;

use chrono::{Duration, Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{ImpactLevel, InternalEvent, VenueType};
use crate::error::IntelError;

/// Date window relative to "now".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
    Custom {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl DateRange {
    /// Inclusive `[start, end]`, or `None` when the stage is off.
    pub fn window(&self, now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match *self {
            DateRange::All => None,
            DateRange::Today => Some((now, now + Duration::hours(24))),
            DateRange::Week => Some((now, now + Duration::days(7))),
            DateRange::Month => Some((now, midnight_months_ahead(now, 1))),
            DateRange::Year => Some((now, midnight_months_ahead(now, 12))),
            DateRange::Custom { start, end } => Some((start, end)),
        }
    }
}

/// Midnight on the same calendar day `months` ahead, clamped to the month's last day.
fn midnight_months_ahead(now: NaiveDateTime, months: u32) -> NaiveDateTime {
    now.date()
        .checked_add_months(Months::new(months))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(now)
}

impl FromStr for DateRange {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "year" => Ok(DateRange::Year),
            other => Err(IntelError::InvalidArgument(format!("unknown date range '{}'", other))),
        }
    }
}

/// Filter stages; each is off when unset. Stages compose with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewFilters {
    pub date_range: DateRange,
    pub impact_level: Option<ImpactLevel>,
    pub venue_type: Option<VenueType>,
    pub max_distance: Option<f64>,
    pub search: String,
}

impl ViewFilters {
    /// The events page defaults: next month, within 25 miles.
    pub fn dashboard_defaults() -> Self {
        Self {
            date_range: DateRange::Month,
            max_distance: Some(25.0),
            ..Default::default()
        }
    }

    pub fn matches(&self, event: &InternalEvent, now: NaiveDateTime) -> bool {
        self.matches_date(event, now)
            && self.impact_level.map_or(true, |level| event.impact_level == level)
            && self.venue_type.map_or(true, |kind| event.venue_type == kind)
            && self.matches_distance(event)
            && self.matches_search(event)
    }

    fn matches_date(&self, event: &InternalEvent, now: NaiveDateTime) -> bool {
        match self.date_range.window(now) {
            None => true,
            Some((start, end)) => event
                .starts_at()
                .map(|at| at >= start && at <= end)
                .unwrap_or(false),
        }
    }

    fn matches_distance(&self, event: &InternalEvent) -> bool {
        match (self.max_distance, event.distance_miles) {
            (Some(max), Some(distance)) => distance <= max,
            _ => true,
        }
    }

    fn matches_search(&self, event: &InternalEvent) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&event.name, &event.venue_name, &event.category, &event.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Events passing every active stage, in their original relative order.
pub fn filter_events(events: &[InternalEvent], filters: &ViewFilters, now: NaiveDateTime) -> Vec<InternalEvent> {
    events
        .iter()
        .filter(|e| filters.matches(e, now))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::test_support::{event, now};
    use chrono::NaiveDate;

    #[test]
    fn test_date_windows() {
        let now = now();
        let (start, end) = DateRange::Week.window(now).unwrap();
        assert_eq!(start, now);
        assert_eq!(end - start, Duration::days(7));

        let (_, month_end) = DateRange::Month.window(now).unwrap();
        assert_eq!(month_end.to_string(), "2026-11-19 00:00:00");
        let (_, year_end) = DateRange::Year.window(now).unwrap();
        assert_eq!(year_end.to_string(), "2027-10-19 00:00:00");
        assert!(DateRange::All.window(now).is_none());
    }

    #[test]
    fn test_month_window_drops_time_of_day() {
        let late = NaiveDate::from_ymd_opt(2027, 1, 31)
            .and_then(|d| d.and_hms_opt(22, 45, 0))
            .unwrap();
        let (start, end) = DateRange::Month.window(late).unwrap();
        assert_eq!(start, late);
        assert_eq!(end.to_string(), "2027-02-28 00:00:00");

        // Late on the 28th falls after the window's midnight end.
        let mut edge = event("Edge", 60);
        edge.date = Some("2027-02-28".into());
        edge.time = Some("22:45:00".into());
        let filters = ViewFilters { date_range: DateRange::Month, ..Default::default() };
        assert!(!filters.matches(&edge, late));
    }

    #[test]
    fn test_date_filter_excludes_undated_events_only_when_active() {
        let mut undated = event("Undated", 60);
        undated.date = None;
        let filters = ViewFilters { date_range: DateRange::Week, ..Default::default() };
        assert!(!filters.matches(&undated, now()));
        assert!(ViewFilters::default().matches(&undated, now()));
    }

    #[test]
    fn test_today_window_is_next_24_hours() {
        let mut tonight = event("Tonight", 60);
        tonight.date = Some("2026-10-19".into());
        tonight.time = Some("20:00:00".into());
        let mut tomorrow_late = event("Late", 60);
        tomorrow_late.date = Some("2026-10-20".into());
        tomorrow_late.time = Some("22:00".into());
        let filters = ViewFilters { date_range: DateRange::Today, ..Default::default() };
        assert!(filters.matches(&tonight, now()));
        assert!(!filters.matches(&tomorrow_late, now()));
    }

    #[test]
    fn test_search_covers_name_venue_category_description() {
        let e = event("Titans vs Colts", 80);
        for q in ["titans", "VENUE", "sports", "at venue"] {
            let filters = ViewFilters { search: q.into(), ..Default::default() };
            assert!(filters.matches(&e, now()), "query {}", q);
        }
        let filters = ViewFilters { search: "opera".into(), ..Default::default() };
        assert!(!filters.matches(&e, now()));
    }

    #[test]
    fn test_distance_filter_passes_unknown_distances() {
        let mut near = event("Near", 60);
        near.distance_miles = Some(3.0);
        let mut far = event("Far", 60);
        far.distance_miles = Some(40.0);
        let mut unknown = event("Unknown", 60);
        unknown.distance_miles = None;
        let filters = ViewFilters { max_distance: Some(25.0), ..Default::default() };
        let kept = filter_events(&[near, far, unknown], &filters, now());
        let names: Vec<_> = kept.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Unknown"]);
    }

    #[test]
    fn test_parse_date_range() {
        assert_eq!("Week".parse::<DateRange>().unwrap(), DateRange::Week);
        assert_eq!("".parse::<DateRange>().unwrap(), DateRange::All);
        assert!("fortnight".parse::<DateRange>().is_err());
    }
}

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{HotelConfig, InternalEvent, VenueType};

const VENUE_LABEL_CHARS: usize = 15;
const SUMMARY_TIMELINE_DAYS: u32 = 7;
const SUMMARY_TOP: usize = 5;

fn within(event: &InternalEvent, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    event.starts_at().map(|at| at >= start && at <= end).unwrap_or(false)
}

pub fn todays_events(events: &[InternalEvent], today: NaiveDate) -> Vec<&InternalEvent> {
    events.iter().filter(|e| e.event_date() == Some(today)).collect()
}

/// HIGH or CRITICAL events in the coming week.
pub fn high_impact_this_week(events: &[InternalEvent], now: NaiveDateTime) -> Vec<&InternalEvent> {
    let end = now + Duration::days(7);
    events
        .iter()
        .filter(|e| e.impact_level.is_high_or_above() && within(e, now, end))
        .collect()
}

/// Distinct venues hosting events in the next 30 days.
pub fn active_venue_count(events: &[InternalEvent], now: NaiveDateTime) -> usize {
    let end = now + Duration::days(30);
    events
        .iter()
        .filter(|e| within(e, now, end))
        .map(|e| e.venue_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn total_impact_today(events: &[InternalEvent], today: NaiveDate) -> u32 {
    todays_events(events, today)
        .iter()
        .map(|e| e.impact_score as u32)
        .sum()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub impact: u32,
    pub events: usize,
}

/// One point per day for the `days` days ending `today`, oldest first.
pub fn impact_timeline(events: &[InternalEvent], today: NaiveDate, days: u32) -> Vec<TimelinePoint> {
    let mut by_day: HashMap<NaiveDate, (u32, usize)> = HashMap::new();
    for event in events {
        if let Some(day) = event.event_date() {
            let entry = by_day.entry(day).or_default();
            entry.0 += event.impact_score as u32;
            entry.1 += 1;
        }
    }

    (0..days as i64)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let (impact, count) = by_day.get(&date).copied().unwrap_or_default();
            TimelinePoint { date, impact, events: count }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VenueUtilization {
    pub venue: String,
    pub label: String,
    pub events: usize,
    pub total_impact: u32,
    pub capacity: u32,
}

fn short_label(name: &str) -> String {
    if name.chars().count() > VENUE_LABEL_CHARS {
        format!("{}...", name.chars().take(VENUE_LABEL_CHARS).collect::<String>())
    } else {
        name.to_string()
    }
}

/// Busiest venues by event count; ties keep first-seen order.
pub fn venue_utilization(events: &[InternalEvent], top: usize) -> Vec<VenueUtilization> {
    let mut rows: Vec<VenueUtilization> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let i = *index.entry(event.venue_name.as_str()).or_insert_with(|| {
            rows.push(VenueUtilization {
                venue: event.venue_name.clone(),
                label: short_label(&event.venue_name),
                events: 0,
                total_impact: 0,
                capacity: event.venue_capacity,
            });
            rows.len() - 1
        });
        let row = &mut rows[i];
        row.events += 1;
        row.total_impact += event.impact_score as u32;
        row.capacity = row.capacity.max(event.venue_capacity);
    }

    rows.sort_by(|a, b| b.events.cmp(&a.events));
    rows.truncate(top);
    rows
}

pub fn category_distribution(events: &[InternalEvent]) -> BTreeMap<VenueType, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.venue_type).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub generated_at: NaiveDateTime,
    pub todays_events: usize,
    pub high_impact_this_week: usize,
    pub active_venues: usize,
    pub total_impact_today: u32,
    pub upcoming_high_impact: Vec<InternalEvent>,
    pub impact_timeline: Vec<TimelinePoint>,
    pub top_venues: Vec<VenueUtilization>,
    pub categories: BTreeMap<VenueType, usize>,
    pub hotel: Option<HotelConfig>,
}

impl DashboardSummary {
    pub fn build(events: &[InternalEvent], hotel: Option<HotelConfig>, now: NaiveDateTime) -> Self {
        let today = now.date();
        let mut upcoming: Vec<InternalEvent> = high_impact_this_week(events, now).into_iter().cloned().collect();
        upcoming.sort_by(|a, b| b.impact_score.cmp(&a.impact_score));
        upcoming.truncate(SUMMARY_TOP);

        Self {
            generated_at: now,
            todays_events: todays_events(events, today).len(),
            high_impact_this_week: high_impact_this_week(events, now).len(),
            active_venues: active_venue_count(events, now),
            total_impact_today: total_impact_today(events, today),
            upcoming_high_impact: upcoming,
            impact_timeline: impact_timeline(events, today, SUMMARY_TIMELINE_DAYS),
            top_venues: venue_utilization(events, SUMMARY_TOP),
            categories: category_distribution(events),
            hotel,
        }
    }
}

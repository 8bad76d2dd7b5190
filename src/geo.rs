use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{IntelError, Result};

const EARTH_RADIUS_MILES: f64 = 3959.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Parses `"lat,lon"`.
    pub fn parse(coordinates: &str) -> Result<Self> {
        let mut parts = coordinates.split(',').map(str::trim);
        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat, lon),
            _ => {
                return Err(IntelError::InvalidArgument(format!(
                    "coordinates must be 'lat,lon', got '{}'",
                    coordinates
                )))
            }
        };
        let parse = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| IntelError::InvalidArgument(format!("invalid coordinate '{}'", v)))
        };
        let point = GeoPoint::new(parse(lat)?, parse(lon)?);
        if !(-90.0..=90.0).contains(&point.latitude) || !(-180.0..=180.0).contains(&point.longitude) {
            return Err(IntelError::InvalidArgument(format!("coordinates out of range: '{}'", coordinates)));
        }
        Ok(point)
    }

    /// `"lat,lon"` as the backend query string expects it.
    pub fn as_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Great-circle distance in miles, rounded to one decimal.
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos() * to.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_MILES * c * 10.0).round() / 10.0
}

/// Named search period for backend date parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    Next30Days,
}

impl Period {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("today") => Period::Today,
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            _ => Period::Next30Days,
        }
    }

    /// Whole-day `[start, end]` range starting at `today`.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = today.and_time(NaiveTime::MIN);
        let end_day = match self {
            Period::Today => today,
            Period::Week => today + Duration::days(6),
            Period::Month => last_day_of_month(today),
            Period::Next30Days => today + Duration::days(30),
        };
        (start, end_of_day(end_day))
    }
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(23, 59, 59).unwrap_or_else(|| day.and_time(NaiveTime::MIN))
}

fn last_day_of_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 { (day.year() + 1, 1) } else { (day.year(), day.month() + 1) };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(day)
}

/// Backend timestamp format, `yyyy-MM-ddTHH:mm:ssZ`.
pub fn format_api_datetime(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Expands a bare `yyyy-MM-dd` to start or end of day; other values pass through.
pub fn ensure_datetime(value: &str, end_of: bool) -> String {
    let value = value.trim();
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(day) if end_of => format_api_datetime(end_of_day(day)),
        Ok(day) => format_api_datetime(day.and_time(NaiveTime::MIN)),
        Err(_) => value.to_string(),
    }
}

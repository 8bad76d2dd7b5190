use chrono::NaiveDateTime;

use crate::geo::{format_api_datetime, GeoPoint};
use crate::view::{SortKey, ViewFilters};

/// Query parameters for `GET /events`. Unset fields are left off the URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub radius: Option<f64>,
    pub location: Option<GeoPoint>,
    pub sort: Option<SortKey>,
    pub keyword: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl EventQuery {
    /// Backend query covering the view's date window and radius; the view does the rest locally.
    pub fn for_view(
        filters: &ViewFilters,
        sort: Option<SortKey>,
        hotel: GeoPoint,
        default_radius: f64,
        fetch_size: u32,
        now: NaiveDateTime,
    ) -> Self {
        let window = filters.date_range.window(now);
        Self {
            start_date: window.map(|(start, _)| format_api_datetime(start)),
            end_date: window.map(|(_, end)| format_api_datetime(end)),
            radius: Some(filters.max_distance.unwrap_or(default_radius)),
            location: Some(hotel),
            sort,
            keyword: None,
            page: None,
            size: Some(fetch_size),
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = &self.start_date {
            params.push(("startDate", start.clone()));
        }
        if let Some(end) = &self.end_date {
            params.push(("endDate", end.clone()));
        }
        if let Some(radius) = self.radius.filter(|r| *r > 0.0) {
            params.push(("radius", radius.to_string()));
        }
        if let Some(location) = self.location {
            params.push(("lat", location.latitude.to_string()));
            params.push(("lon", location.longitude.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sortBy", sort.backend_field().to_string()));
            params.push(("sortDir", sort.backend_direction().to_string()));
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            params.push(("keyword", keyword.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        params
    }
}

/// Query parameters for `GET /venues`.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueQuery {
    pub location: GeoPoint,
    pub radius: f64,
    pub unit: DistanceUnit,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Miles => "miles",
            DistanceUnit::Kilometers => "km",
        }
    }
}

impl VenueQuery {
    pub fn around(location: GeoPoint, radius: f64) -> Self {
        Self { location, radius, unit: DistanceUnit::Miles, limit: 50 }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("lat", self.location.latitude.to_string()),
            ("lon", self.location.longitude.to_string()),
            ("radius", self.radius.to_string()),
            ("unit", self.unit.as_str().to_string()),
            ("limit", self.limit.to_string()),
            ("size", self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::DateRange;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn test_view_query_carries_window_and_radius() {
        let filters = ViewFilters { date_range: DateRange::Week, max_distance: Some(15.0), ..Default::default() };
        let query = EventQuery::for_view(
            &filters,
            Some(SortKey::ImpactScore),
            GeoPoint::new(36.1656, -86.7781),
            25.0,
            1000,
            now(),
        );
        let params = query.to_params();
        assert!(params.contains(&("startDate", "2026-10-19T10:00:00Z".to_string())));
        assert!(params.contains(&("endDate", "2026-10-26T10:00:00Z".to_string())));
        assert!(params.contains(&("radius", "15".to_string())));
        assert!(params.contains(&("lat", "36.1656".to_string())));
        assert!(params.contains(&("sortBy", "impactScore".to_string())));
        assert!(params.contains(&("sortDir", "desc".to_string())));
        assert!(params.contains(&("size", "1000".to_string())));
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let params = EventQuery { keyword: Some("  ".into()), page: Some(0), ..Default::default() }.to_params();
        assert!(params.is_empty());
    }

    #[test]
    fn test_all_range_has_no_dates_and_uses_default_radius() {
        let query = EventQuery::for_view(
            &ViewFilters::default(),
            None,
            GeoPoint::new(36.0, -86.0),
            10.0,
            200,
            now(),
        );
        assert!(query.start_date.is_none());
        assert_eq!(query.radius, Some(10.0));
    }

    #[test]
    fn test_venue_query_params() {
        let params = VenueQuery::around(GeoPoint::new(36.1656, -86.7781), 10.0).to_params();
        assert_eq!(params[3], ("unit", "miles".to_string()));
        assert_eq!(params[4], ("limit", "50".to_string()));
    }
}

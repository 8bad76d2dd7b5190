use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IntelError;

/// Impact band derived from a 0-100 impact score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 4] = [
        ImpactLevel::Low,
        ImpactLevel::Medium,
        ImpactLevel::High,
        ImpactLevel::Critical,
    ];

    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 90 => ImpactLevel::Critical,
            s if s >= 75 => ImpactLevel::High,
            s if s >= 50 => ImpactLevel::Medium,
            _ => ImpactLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "LOW",
            ImpactLevel::Medium => "MEDIUM",
            ImpactLevel::High => "HIGH",
            ImpactLevel::Critical => "CRITICAL",
        }
    }

    pub fn is_high_or_above(&self) -> bool {
        matches!(self, ImpactLevel::High | ImpactLevel::Critical)
    }
}

/// Capacity bucket. Each tier's lower bound is inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum VenueTier {
    Small,
    Medium,
    Large,
    Major,
    Mega,
}

impl VenueTier {
    pub fn from_capacity(capacity: u32) -> Self {
        match capacity {
            c if c >= 50_000 => VenueTier::Mega,
            c if c >= 10_000 => VenueTier::Major,
            c if c >= 5_000 => VenueTier::Large,
            c if c >= 1_000 => VenueTier::Medium,
            _ => VenueTier::Small,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueTier::Small => "SMALL",
            VenueTier::Medium => "MEDIUM",
            VenueTier::Large => "LARGE",
            VenueTier::Major => "MAJOR",
            VenueTier::Mega => "MEGA",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Available,
    #[serde(rename = "Sold Out")]
    SoldOut,
    Limited,
    #[serde(rename = "Not On Sale")]
    NotOnSale,
}

impl TicketStatus {
    /// Maps a discovery-provider sale status code (`onsale`, `offsale`, ...).
    pub fn from_status_code(code: Option<&str>) -> Self {
        match code {
            Some("offsale") => TicketStatus::SoldOut,
            Some("presale") => TicketStatus::Limited,
            Some("cancelled") => TicketStatus::NotOnSale,
            _ => TicketStatus::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Available => "Available",
            TicketStatus::SoldOut => "Sold Out",
            TicketStatus::Limited => "Limited",
            TicketStatus::NotOnSale => "Not On Sale",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VenueType {
    Music,
    Sports,
    Theater,
    Other,
}

impl VenueType {
    pub const ALL: [VenueType; 4] = [
        VenueType::Music,
        VenueType::Sports,
        VenueType::Theater,
        VenueType::Other,
    ];

    /// Maps a classification segment name from the discovery provider.
    pub fn from_segment(segment: Option<&str>) -> Self {
        match segment {
            Some("Music") => VenueType::Music,
            Some("Sports") => VenueType::Sports,
            Some("Arts & Theatre") => VenueType::Theater,
            _ => VenueType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueType::Music => "Music",
            VenueType::Sports => "Sports",
            VenueType::Theater => "Theater",
            VenueType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ImageQuality {
    High,
    Medium,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
    Unknown,
    Placeholder,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::High => "High",
            ImageQuality::Medium => "Medium",
            ImageQuality::Low => "Low",
            ImageQuality::VeryLow => "Very Low",
            ImageQuality::Unknown => "Unknown",
            ImageQuality::Placeholder => "Placeholder",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_as_str!(ImpactLevel, VenueTier, TicketStatus, VenueType, ImageQuality);

fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .to_ascii_lowercase()
}

impl FromStr for ImpactLevel {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "low" => Ok(ImpactLevel::Low),
            "medium" => Ok(ImpactLevel::Medium),
            "high" => Ok(ImpactLevel::High),
            "critical" => Ok(ImpactLevel::Critical),
            _ => Err(IntelError::InvalidArgument(format!("unknown impact level '{}'", s))),
        }
    }
}

impl FromStr for VenueType {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "music" => Ok(VenueType::Music),
            "sports" => Ok(VenueType::Sports),
            "theater" | "theatre" | "arts&theatre" => Ok(VenueType::Theater),
            "other" | "miscellaneous" => Ok(VenueType::Other),
            _ => Err(IntelError::InvalidArgument(format!("unknown venue type '{}'", s))),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "available" | "onsale" => Ok(TicketStatus::Available),
            "soldout" | "offsale" => Ok(TicketStatus::SoldOut),
            "limited" | "presale" => Ok(TicketStatus::Limited),
            "notonsale" | "cancelled" => Ok(TicketStatus::NotOnSale),
            _ => Err(IntelError::InvalidArgument(format!("unknown ticket status '{}'", s))),
        }
    }
}

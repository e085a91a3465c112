use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weather condition tags used by the forecast provider to pick an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    ClearDay,
    ClearNight,
    Cloudy,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Rain,
    Snow,
    Fog,
    Wind,
}

impl IconKind {
    /// Every tag the provider is known to send
    pub const ALL: [IconKind; 9] = [
        IconKind::ClearDay,
        IconKind::ClearNight,
        IconKind::Cloudy,
        IconKind::PartlyCloudyDay,
        IconKind::PartlyCloudyNight,
        IconKind::Rain,
        IconKind::Snow,
        IconKind::Fog,
        IconKind::Wind,
    ];

    /// Parse a provider tag; unknown tags yield `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        tag.parse().ok()
    }

    /// The provider's tag for this icon
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::Cloudy => "cloudy",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::Wind => "wind",
        }
    }
}

impl FromStr for IconKind {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A tag outside the known icon set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown icon tag: {0}")]
pub struct UnknownIcon(pub String);

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Conditions at fetch time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub icon: String,
}

/// One hour of forecast; `datetime` is "HH:MM:SS"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub datetime: String,
    pub temp: f64,
    pub icon: String,
}

/// One calendar day of forecast; `hours[i]` is hour-of-day `i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// ISO calendar date, YYYY-MM-DD
    pub datetime: String,
    pub conditions: String,
    pub icon: String,
    pub tempmin: f64,
    pub tempmax: f64,
    #[serde(default)]
    pub hours: Vec<HourForecast>,
}

/// Forecast payload as returned by the timeline endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPayload {
    /// IANA zone of the forecast location, e.g. "Europe/Kyiv"
    pub timezone: String,
    pub current_conditions: CurrentConditions,
    pub days: Vec<DayForecast>,
}

/// One candidate from a place-name search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeocodeResult {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("No timezone known for {0}")]
    UnknownTimezone(String),
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

//! Air-quality record returned for a state query

use serde::Serialize;

use super::weather::WeatherSnapshot;
use crate::classify::{self, AqiCategory};

/// Pollutants the service reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollutantKind {
    Pm25,
    Pm10,
    Ozone,
    No2,
}

impl PollutantKind {
    pub const ALL: [PollutantKind; 4] = [Self::Pm25, Self::Pm10, Self::Ozone, Self::No2];

    /// Pollutants that drive a state's headline AQI. PM10 is reported but
    /// never sets the headline.
    pub const HEADLINE: [PollutantKind; 3] = [Self::Pm25, Self::Ozone, Self::No2];

    /// Whether a provider `ParameterName` denotes this pollutant
    #[must_use]
    pub fn matches(self, parameter_name: &str) -> bool {
        match self {
            Self::Pm25 => parameter_name == "PM2.5",
            Self::Pm10 => parameter_name == "PM10",
            Self::Ozone => parameter_name == "O3" || parameter_name == "OZONE",
            Self::No2 => parameter_name == "NO2",
        }
    }
}

/// One pollutant's provider-computed reading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantReading {
    pub aqi: u32,
    pub category: String,
    pub category_number: u8,
    /// Display color for `category_number`
    pub color: &'static str,
}

impl PollutantReading {
    #[must_use]
    pub fn new(aqi: u32, category: impl Into<String>, category_number: u8) -> Self {
        Self {
            aqi,
            category: category.into(),
            category_number,
            color: classify::color_for_number(category_number),
        }
    }
}

/// Reading per recognized pollutant; every key is always serialized
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pollutants {
    pub pm25: Option<PollutantReading>,
    pub pm10: Option<PollutantReading>,
    pub ozone: Option<PollutantReading>,
    pub no2: Option<PollutantReading>,
}

impl Pollutants {
    #[must_use]
    pub fn get(&self, kind: PollutantKind) -> Option<&PollutantReading> {
        match kind {
            PollutantKind::Pm25 => self.pm25.as_ref(),
            PollutantKind::Pm10 => self.pm10.as_ref(),
            PollutantKind::Ozone => self.ozone.as_ref(),
            PollutantKind::No2 => self.no2.as_ref(),
        }
    }

    pub fn set(&mut self, kind: PollutantKind, reading: Option<PollutantReading>) {
        let slot = match kind {
            PollutantKind::Pm25 => &mut self.pm25,
            PollutantKind::Pm10 => &mut self.pm10,
            PollutantKind::Ozone => &mut self.ozone,
            PollutantKind::No2 => &mut self.no2,
        };
        *slot = reading;
    }

    /// Highest AQI among the present headline pollutants
    #[must_use]
    pub fn headline_aqi(&self) -> Option<u32> {
        PollutantKind::HEADLINE
            .iter()
            .filter_map(|kind| self.get(*kind).map(|r| r.aqi))
            .max()
    }
}

/// Fields present only on an available record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub state_code: String,
    pub reporting_area: String,
    pub date_observed: Option<String>,
    pub hour_observed: Option<u32>,
    pub pollutants: Pollutants,
    pub weather: Option<WeatherSnapshot>,
    pub headline_aqi: Option<u32>,
    pub headline_category: Option<AqiCategory>,
    pub headline_color: Option<&'static str>,
}

impl Observation {
    /// Build an observation, deriving the headline from the pollutants
    #[must_use]
    pub fn new(
        state_code: String,
        reporting_area: String,
        date_observed: Option<String>,
        hour_observed: Option<u32>,
        pollutants: Pollutants,
        weather: Option<WeatherSnapshot>,
    ) -> Self {
        let headline_aqi = pollutants.headline_aqi();
        let headline_category = headline_aqi.map(AqiCategory::from_aqi);
        Self {
            state_code,
            reporting_area,
            date_observed,
            hour_observed,
            pollutants,
            weather,
            headline_aqi,
            headline_category,
            headline_color: headline_category.map(AqiCategory::color),
        }
    }
}

/// Unified per-query response. Unavailable records carry only a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityRecord {
    pub available: bool,
    #[serde(flatten)]
    observation: Option<Observation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl AirQualityRecord {
    #[must_use]
    pub fn available(observation: Observation) -> Self {
        Self {
            available: true,
            observation: Some(observation),
            message: None,
        }
    }

    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            observation: None,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn pollutants(&self) -> Option<&Pollutants> {
        self.observation.as_ref().map(|o| &o.pollutants)
    }

    #[must_use]
    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.observation.as_ref().and_then(|o| o.weather.as_ref())
    }
}

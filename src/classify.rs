//! AQI severity classification
//!
//! Breakpoints are checked in descending order with strict greater-than
//! comparisons, so each boundary value (50, 100, 150, 200, 300) belongs to
//! the lower tier.

use serde::{Serialize, Serializer};

/// Neutral color for values outside the six-tier table
pub const NEUTRAL_COLOR: &str = "#6B7280";

/// The six EPA severity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Classify a numeric AQI value
    #[must_use]
    pub fn from_aqi(aqi: u32) -> Self {
        if aqi > 300 {
            Self::Hazardous
        } else if aqi > 200 {
            Self::VeryUnhealthy
        } else if aqi > 150 {
            Self::Unhealthy
        } else if aqi > 100 {
            Self::UnhealthyForSensitiveGroups
        } else if aqi > 50 {
            Self::Moderate
        } else {
            Self::Good
        }
    }

    /// Map the provider's 1-6 category number to a tier
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Good),
            2 => Some(Self::Moderate),
            3 => Some(Self::UnhealthyForSensitiveGroups),
            4 => Some(Self::Unhealthy),
            5 => Some(Self::VeryUnhealthy),
            6 => Some(Self::Hazardous),
            _ => None,
        }
    }

    /// Human-readable category label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Display color (EPA palette, hex)
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "#00E400",
            Self::Moderate => "#FFFF00",
            Self::UnhealthyForSensitiveGroups => "#FF7E00",
            Self::Unhealthy => "#FF0000",
            Self::VeryUnhealthy => "#8F3F97",
            Self::Hazardous => "#7E0023",
        }
    }
}

impl Serialize for AqiCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Display color for a provider category number
#[must_use]
pub fn color_for_number(number: u8) -> &'static str {
    AqiCategory::from_number(number).map_or(NEUTRAL_COLOR, AqiCategory::color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Good")]
    #[case(50, "Good")]
    #[case(51, "Moderate")]
    #[case(100, "Moderate")]
    #[case(101, "Unhealthy for Sensitive Groups")]
    #[case(150, "Unhealthy for Sensitive Groups")]
    #[case(151, "Unhealthy")]
    #[case(200, "Unhealthy")]
    #[case(201, "Very Unhealthy")]
    #[case(300, "Very Unhealthy")]
    #[case(301, "Hazardous")]
    #[case(999, "Hazardous")]
    fn test_category_breakpoints(#[case] aqi: u32, #[case] expected: &str) {
        assert_eq!(AqiCategory::from_aqi(aqi).label(), expected);
    }

    #[rstest]
    #[case(50, "#00E400")]
    #[case(51, "#FFFF00")]
    #[case(150, "#FF7E00")]
    #[case(200, "#FF0000")]
    #[case(300, "#8F3F97")]
    #[case(301, "#7E0023")]
    fn test_color_shares_breakpoints(#[case] aqi: u32, #[case] expected: &str) {
        assert_eq!(AqiCategory::from_aqi(aqi).color(), expected);
    }

    #[rstest]
    #[case(1, Some(AqiCategory::Good))]
    #[case(3, Some(AqiCategory::UnhealthyForSensitiveGroups))]
    #[case(6, Some(AqiCategory::Hazardous))]
    #[case(0, None)]
    #[case(7, None)]
    fn test_category_numbers(#[case] number: u8, #[case] expected: Option<AqiCategory>) {
        assert_eq!(AqiCategory::from_number(number), expected);
    }

    #[test]
    fn test_out_of_range_number_gets_neutral_color() {
        assert_eq!(color_for_number(0), NEUTRAL_COLOR);
        assert_eq!(color_for_number(7), NEUTRAL_COLOR);
        assert_eq!(color_for_number(3), "#FF7E00");
    }

    #[test]
    fn test_serializes_as_label() {
        let value = serde_json::to_value(AqiCategory::VeryUnhealthy).unwrap();
        assert_eq!(value, "Very Unhealthy");
    }
}

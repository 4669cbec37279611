//! Static catalogue of the 50 U.S. states

use serde::Serialize;

/// A state's postal abbreviation and display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateIdentity {
    pub code: &'static str,
    pub name: &'static str,
}

const fn state(code: &'static str, name: &'static str) -> StateIdentity {
    StateIdentity { code, name }
}

pub static STATES: [StateIdentity; 50] = [
    state("AL", "Alabama"),
    state("AK", "Alaska"),
    state("AZ", "Arizona"),
    state("AR", "Arkansas"),
    state("CA", "California"),
    state("CO", "Colorado"),
    state("CT", "Connecticut"),
    state("DE", "Delaware"),
    state("FL", "Florida"),
    state("GA", "Georgia"),
    state("HI", "Hawaii"),
    state("ID", "Idaho"),
    state("IL", "Illinois"),
    state("IN", "Indiana"),
    state("IA", "Iowa"),
    state("KS", "Kansas"),
    state("KY", "Kentucky"),
    state("LA", "Louisiana"),
    state("ME", "Maine"),
    state("MD", "Maryland"),
    state("MA", "Massachusetts"),
    state("MI", "Michigan"),
    state("MN", "Minnesota"),
    state("MS", "Mississippi"),
    state("MO", "Missouri"),
    state("MT", "Montana"),
    state("NE", "Nebraska"),
    state("NV", "Nevada"),
    state("NH", "New Hampshire"),
    state("NJ", "New Jersey"),
    state("NM", "New Mexico"),
    state("NY", "New York"),
    state("NC", "North Carolina"),
    state("ND", "North Dakota"),
    state("OH", "Ohio"),
    state("OK", "Oklahoma"),
    state("OR", "Oregon"),
    state("PA", "Pennsylvania"),
    state("RI", "Rhode Island"),
    state("SC", "South Carolina"),
    state("SD", "South Dakota"),
    state("TN", "Tennessee"),
    state("TX", "Texas"),
    state("UT", "Utah"),
    state("VT", "Vermont"),
    state("VA", "Virginia"),
    state("WA", "Washington"),
    state("WV", "West Virginia"),
    state("WI", "Wisconsin"),
    state("WY", "Wyoming"),
];

impl StateIdentity {
    /// Case-insensitive lookup by postal abbreviation
    #[must_use]
    pub fn from_code(code: &str) -> Option<&'static StateIdentity> {
        let code = code.trim();
        STATES.iter().find(|s| s.code.eq_ignore_ascii_case(code))
    }

    /// Case-insensitive lookup by display name
    #[must_use]
    pub fn from_name(name: &str) -> Option<&'static StateIdentity> {
        let name = name.trim();
        STATES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Trim and upper-case a user-supplied state code
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OptimizationLevel {
    #[default]
    High,
    Medium,
    Low,
}

/// Effective connection type as reported by the host.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum NetworkClass {
    #[serde(rename = "slow-2g")]
    #[strum(serialize = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    #[strum(serialize = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    #[strum(serialize = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    #[strum(serialize = "4g")]
    FourG,
}

impl NetworkClass {
    /// Parse a host-reported effective type; anything unrecognised is
    /// treated as unknown.
    pub fn from_effective_type(s: &str) -> Option<Self> {
        s.trim().parse().ok()
    }

    pub fn is_slow(self) -> bool {
        matches!(self, NetworkClass::Slow2g | NetworkClass::TwoG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_type_parsing() {
        assert_eq!(NetworkClass::from_effective_type("slow-2g"), Some(NetworkClass::Slow2g));
        assert_eq!(NetworkClass::from_effective_type(" 2G "), Some(NetworkClass::TwoG));
        assert_eq!(NetworkClass::from_effective_type("wifi"), None);
        assert!(NetworkClass::TwoG.is_slow());
        assert!(!NetworkClass::ThreeG.is_slow());
    }
}

//! Indicator types accepted for safelist submission.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of indicator types with a local validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorType {
    Ipv4,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported indicator type `{0}`")]
pub struct UnsupportedIndicatorType(pub String);

impl IndicatorType {
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorType::Ipv4 => "ipv4",
        }
    }

    /// True if `candidate` is a well-formed indicator of this type.
    pub fn validate(self, candidate: &str) -> bool {
        match self {
            IndicatorType::Ipv4 => candidate.parse::<Ipv4Addr>().is_ok(),
        }
    }
}

impl FromStr for IndicatorType {
    type Err = UnsupportedIndicatorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ipv4" => Ok(IndicatorType::Ipv4),
            _ => Err(UnsupportedIndicatorType(s.to_string())),
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!("ipv4".parse::<IndicatorType>(), Ok(IndicatorType::Ipv4));
        assert_eq!("IPv4".parse::<IndicatorType>(), Ok(IndicatorType::Ipv4));
        assert_eq!(
            "fqdn".parse::<IndicatorType>(),
            Err(UnsupportedIndicatorType("fqdn".into()))
        );
    }

    #[test]
    fn ipv4_validation() {
        let t = IndicatorType::Ipv4;
        assert!(t.validate("192.0.2.10"));
        assert!(t.validate("0.0.0.0"));
        assert!(!t.validate("256.1.1.1"));
        assert!(!t.validate("192.0.2"));
        assert!(!t.validate("example.com"));
        assert!(!t.validate("2001:db8::1"));
        assert!(!t.validate(""));
        assert!(!t.validate(" 192.0.2.10"));
    }
}

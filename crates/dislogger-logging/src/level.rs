//! Severity levels.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered severity scale.
///
/// Numeric values follow the usual `10/20/30/40/50` convention so configs can
/// name a level either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl Level {
    /// Numeric value of the level.
    pub fn as_number(self) -> u64 {
        self as u64
    }

    /// Map a number to the highest named level not above it.
    ///
    /// Anything below 10 maps to `Debug`.
    pub fn from_number(value: u64) -> Self {
        match value {
            v if v >= 50 => Level::Critical,
            v if v >= 40 => Level::Error,
            v if v >= 30 => Level::Warning,
            v if v >= 20 => Level::Info,
            _ => Level::Debug,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" | "FATAL" => Ok(Level::Critical),
            other => other
                .parse::<u64>()
                .map(Level::from_number)
                .map_err(|_| format!("unknown log level '{}'", s)),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.as_number())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Level::from_number(n)),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_from_number_rounds_down() {
        assert_eq!(Level::from_number(20), Level::Info);
        assert_eq!(Level::from_number(25), Level::Info);
        assert_eq!(Level::from_number(0), Level::Debug);
        assert_eq!(Level::from_number(99), Level::Critical);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("40".parse::<Level>().unwrap(), Level::Error);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn test_deserialize_number_or_name() {
        let from_number: Level = serde_json::from_str("30").unwrap();
        let from_name: Level = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(from_number, Level::Warning);
        assert_eq!(from_name, Level::Critical);
        assert!(serde_json::from_str::<Level>("\"verbose\"").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::Warning.to_string(), "WARNING");
        assert_eq!(Level::Critical.as_number(), 50);
    }
}

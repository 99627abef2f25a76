//! Scheduling discipline selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// The four supported CPU scheduling disciplines.
///
/// Serialized as the upper-case code; deserialized through [`FromStr`], so
/// scenario files accept the same names as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Algorithm {
    /// First-Come-First-Served (non-preemptive).
    #[default]
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest-Job-First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest-Remaining-Time-First (preemptive SJF).
    #[serde(rename = "SRTF")]
    Srtf,
    /// Round-Robin with a fixed quantum.
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// All disciplines, in declaration order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
    ];

    /// Short upper-case code (`"FCFS"`, `"SJF"`, `"SRTF"`, `"RR"`).
    pub fn code(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin => "RR",
        }
    }

    /// Whether the running process may be displaced by a ready one mid-run.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Algorithm::Srtf | Algorithm::RoundRobin)
    }

    /// Whether the quantum has any effect.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FCFS" | "FIFO" => Ok(Algorithm::Fcfs),
            "SJF" => Ok(Algorithm::Sjf),
            "SRTF" => Ok(Algorithm::Srtf),
            "RR" | "ROUND-ROBIN" | "ROUND_ROBIN" | "ROUNDROBIN" => Ok(Algorithm::RoundRobin),
            _ => Err(SimError::InvalidConfiguration(format!(
                "unknown scheduling algorithm '{s}' (expected FCFS, SJF, SRTF or RR)"
            ))),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.code().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("rr".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!(" srtf ".parse::<Algorithm>().unwrap(), Algorithm::Srtf);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "lottery".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Algorithm::RoundRobin).unwrap();
        assert_eq!(json, "\"RR\"");
        let back: Algorithm = serde_json::from_str("\"SJF\"").unwrap();
        assert_eq!(back, Algorithm::Sjf);
        let alias: Algorithm = serde_json::from_str("\"round-robin\"").unwrap();
        assert_eq!(alias, Algorithm::RoundRobin);
        assert!(serde_json::from_str::<Algorithm>("\"MLFQ\"").is_err());
    }

    #[test]
    fn test_flags() {
        assert!(!Algorithm::Fcfs.is_preemptive());
        assert!(!Algorithm::Sjf.is_preemptive());
        assert!(Algorithm::Srtf.is_preemptive());
        assert!(Algorithm::RoundRobin.uses_quantum());
        assert!(!Algorithm::Srtf.uses_quantum());
    }
}

//! Address family definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AddrFamily identifies the address space an entry belongs to.
///
/// Entries and queries are never compared across families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddrFamily {
    /// IPv4 address space
    #[serde(rename = "v4")]
    V4,
    /// IPv6 address space
    #[serde(rename = "v6")]
    V6,
}

impl AddrFamily {
    /// Parse an address family from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "v4" | "ipv4" | "4" => Some(AddrFamily::V4),
            "v6" | "ipv6" | "6" => Some(AddrFamily::V6),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddrFamily::V4 => "v4",
            AddrFamily::V6 => "v6",
        }
    }

    /// Maximum prefix length for this family (32 for v4, 128 for v6).
    pub fn max_prefix_len(&self) -> u8 {
        match self {
            AddrFamily::V4 => 32,
            AddrFamily::V6 => 128,
        }
    }
}

impl fmt::Display for AddrFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

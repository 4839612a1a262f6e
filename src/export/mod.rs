//! Rendering entry sets into target textual formats.

mod apache;
mod firewall;
mod nginx;
mod plain;
pub mod structured;

use std::fmt;

use crate::error::{Error, Result};
use crate::list::EntrySet;

/// Target format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// One raw token per line with per-list comment headers
    Plain,
    /// iptables/ip6tables DROP rules, one per entry
    FirewallRules,
    /// nginx geo block suitable for an include
    WebServerConfig,
    /// Apache RequireAll blocklist
    Apache,
    /// Machine-readable JSON, lossless for the data model
    Structured,
}

impl ExportFormat {
    /// Parse a format name.
    ///
    /// Unknown names are a hard [`Error::UnsupportedFormat`]; no partial
    /// output is ever written for them.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(ExportFormat::Plain),
            "firewall-rules" | "firewallrules" | "iptables" => Ok(ExportFormat::FirewallRules),
            "web-server-config" | "webserverconfig" | "nginx" => Ok(ExportFormat::WebServerConfig),
            "apache" => Ok(ExportFormat::Apache),
            "structured" | "json" => Ok(ExportFormat::Structured),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }

    /// Get the canonical format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Plain => "plain",
            ExportFormat::FirewallRules => "firewall-rules",
            ExportFormat::WebServerConfig => "web-server-config",
            ExportFormat::Apache => "apache",
            ExportFormat::Structured => "structured",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render entry sets into the requested format.
///
/// Output is byte-deterministic for a given input: sets are rendered in the
/// order given, entries in insertion order.
pub fn export(sets: &[EntrySet], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Plain => Ok(plain::render(sets)),
        ExportFormat::FirewallRules => Ok(firewall::render(sets)),
        ExportFormat::WebServerConfig => Ok(nginx::render(sets)),
        ExportFormat::Apache => Ok(apache::render(sets)),
        ExportFormat::Structured => structured::render(sets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse("plain").unwrap(), ExportFormat::Plain);
        assert_eq!(
            ExportFormat::parse("firewall-rules").unwrap(),
            ExportFormat::FirewallRules
        );
        assert_eq!(
            ExportFormat::parse("firewallRules").unwrap(),
            ExportFormat::FirewallRules
        );
        assert_eq!(
            ExportFormat::parse("webServerConfig").unwrap(),
            ExportFormat::WebServerConfig
        );
        assert_eq!(ExportFormat::parse("apache").unwrap(), ExportFormat::Apache);
        assert_eq!(
            ExportFormat::parse("structured").unwrap(),
            ExportFormat::Structured
        );
        assert!(matches!(
            ExportFormat::parse("xml"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_format_roundtrip_names() {
        for format in [
            ExportFormat::Plain,
            ExportFormat::FirewallRules,
            ExportFormat::WebServerConfig,
            ExportFormat::Apache,
            ExportFormat::Structured,
        ] {
            assert_eq!(ExportFormat::parse(format.as_str()).unwrap(), format);
        }
    }
}

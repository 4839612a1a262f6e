//! Entry parsing and normalization.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{Error, Result};
use crate::family::AddrFamily;

/// Entry is one validated network specification from a list file.
///
/// The network is stored in canonical form: the parsed address masked by the
/// prefix length, so `192.0.2.5/24` is held as `192.0.2.0/24`. The original
/// token is kept verbatim for diagnostics and round-trip export. Two entries
/// are duplicates iff their family, network address, and prefix length are
/// all equal.
///
/// # Examples
/// ```
/// use netfence::Entry;
///
/// let entry = Entry::parse("192.0.2.5/24", "malware", 3).unwrap();
/// assert_eq!(entry.network().to_string(), "192.0.2.0/24");
/// assert_eq!(entry.raw(), "192.0.2.5/24");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    family: AddrFamily,
    network: IpNet,
    raw: String,
    source_list: String,
    line_number: u32,
}

impl Entry {
    /// Create an Entry from an already-parsed network.
    ///
    /// The network is truncated to its canonical form (host bits zeroed).
    pub fn new(
        network: IpNet,
        raw: impl Into<String>,
        source_list: impl Into<String>,
        line_number: u32,
    ) -> Self {
        let family = match network {
            IpNet::V4(_) => AddrFamily::V4,
            IpNet::V6(_) => AddrFamily::V6,
        };
        Self {
            family,
            network: network.trunc(),
            raw: raw.into(),
            source_list: source_list.into(),
            line_number,
        }
    }

    /// Parse a single textual token into an Entry.
    ///
    /// Accepts a bare IPv4 or IPv6 address (normalized to /32 or /128) or a
    /// CIDR in `addr/prefix` form. Surrounding whitespace is trimmed; any
    /// other trailing text, including an inline `# comment`, makes the token
    /// invalid. Comment handling is line-level and belongs to the Loader.
    /// Non-zero host bits are masked away, never rejected.
    pub fn parse(token: &str, source_list: &str, line_number: u32) -> Result<Self> {
        let token = token.trim();

        if token.is_empty() {
            return Err(Error::InvalidAddress(token.to_string()));
        }

        let network =
            parse_network(token).ok_or_else(|| Error::InvalidAddress(token.to_string()))?;

        Ok(Self::new(network, token, source_list, line_number))
    }

    /// The address family of this entry.
    pub fn family(&self) -> AddrFamily {
        self.family
    }

    /// The canonical network (host bits zeroed).
    pub fn network(&self) -> IpNet {
        self.network
    }

    /// The normalized base address of the network.
    pub fn network_addr(&self) -> IpAddr {
        self.network.addr()
    }

    /// The prefix length (32 for a bare IPv4 host, 128 for bare IPv6).
    pub fn prefix_len(&self) -> u8 {
        self.network.prefix_len()
    }

    /// The original token as it appeared in the source file.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Name of the list this entry came from.
    pub fn source_list(&self) -> &str {
        &self.source_list
    }

    /// Line number of the token in its source file (0 when not meaningful,
    /// e.g. after a structured re-import).
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Check whether this entry covers a single address.
    ///
    /// True iff the address is of the same family and, masked by this
    /// entry's prefix length, equals the entry's network address.
    pub fn covers_addr(&self, addr: IpAddr) -> bool {
        self.network.contains(&addr)
    }

    /// Check whether this entry covers an entire queried network.
    pub fn covers_net(&self, net: &IpNet) -> bool {
        self.network.contains(net)
    }
}

/// Parse a trimmed token as a bare address or CIDR.
///
/// Returns `None` on malformed addresses, out-of-range prefixes, trailing
/// garbage after the prefix, or more than one `/`.
fn parse_network(token: &str) -> Option<IpNet> {
    if token.contains('/') {
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() != 2 {
            return None;
        }
        // u8::from_str would also take a leading '+'
        if !parts[1].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let prefix_len: u8 = parts[1].parse().ok()?;

        if let Ok(addr) = parts[0].parse::<Ipv4Addr>() {
            return Ipv4Net::new(addr, prefix_len).ok().map(IpNet::V4);
        }
        if let Ok(addr) = parts[0].parse::<Ipv6Addr>() {
            return Ipv6Net::new(addr, prefix_len).ok().map(IpNet::V6);
        }
        return None;
    }

    let addr: IpAddr = token.parse().ok()?;
    Some(IpNet::from(addr))
}

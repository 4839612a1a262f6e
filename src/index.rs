//! Membership queries over loaded entry sets.

use ipnet::IpNet;
use std::net::IpAddr;

use crate::entry::Entry;
use crate::error::Result;
use crate::family::AddrFamily;

/// MembershipIndex answers "which entries cover address A" across one or
/// more entry sets.
///
/// Entries are partitioned per family; a query only ever scans its own
/// family. All covering entries are returned, not just the most specific:
/// the lists are block/allow decisions, and callers want full provenance.
/// Result order is insertion order (set order, then entry order within a
/// set), so output is deterministic.
pub struct MembershipIndex<'a> {
    v4: Vec<&'a Entry>,
    v6: Vec<&'a Entry>,
}

impl<'a> MembershipIndex<'a> {
    /// Build an index over the given entry sets.
    pub fn build(sets: &'a [crate::EntrySet]) -> Self {
        let mut v4 = Vec::new();
        let mut v6 = Vec::new();
        for set in sets {
            for entry in set.iter() {
                match entry.family() {
                    AddrFamily::V4 => v4.push(entry),
                    AddrFamily::V6 => v6.push(entry),
                }
            }
        }
        Self { v4, v6 }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// Check if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    /// Find every entry covering the queried address or range.
    ///
    /// The query must itself be a valid bare address or CIDR; a malformed
    /// query is a hard [`crate::Error::InvalidAddress`], unlike invalid lines during
    /// loading. A range query matches entries that contain the entire range.
    pub fn covers(&self, query: &str) -> Result<Vec<&'a Entry>> {
        let entry = Entry::parse(query, "", 0)?;
        Ok(self.covers_net(&entry.network()))
    }

    /// Find every entry covering a single address.
    pub fn covers_addr(&self, addr: IpAddr) -> Vec<&'a Entry> {
        let candidates = match addr {
            IpAddr::V4(_) => &self.v4,
            IpAddr::V6(_) => &self.v6,
        };
        candidates
            .iter()
            .filter(|e| e.covers_addr(addr))
            .copied()
            .collect()
    }

    /// Find every entry containing the entire queried network.
    pub fn covers_net(&self, net: &IpNet) -> Vec<&'a Entry> {
        let candidates = match net {
            IpNet::V4(_) => &self.v4,
            IpNet::V6(_) => &self.v6,
        };
        candidates
            .iter()
            .filter(|e| e.covers_net(net))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::EntrySet;

    fn set(name: &str, tokens: &[&str]) -> EntrySet {
        let mut set = EntrySet::new(name);
        for (i, token) in tokens.iter().enumerate() {
            set.push(Entry::parse(token, name, (i + 1) as u32).unwrap());
        }
        set
    }

    #[test]
    fn test_covers_returns_all_matches_in_order() {
        let sets = vec![
            set("alpha", &["10.0.0.0/8", "10.1.0.0/16"]),
            set("beta", &["10.1.2.0/24"]),
        ];
        let index = MembershipIndex::build(&sets);

        let matches = index.covers("10.1.2.3").unwrap();
        let raws: Vec<&str> = matches.iter().map(|e| e.raw()).collect();
        assert_eq!(raws, vec!["10.0.0.0/8", "10.1.0.0/16", "10.1.2.0/24"]);

        assert!(index.covers("192.0.2.1").unwrap().is_empty());
    }

    #[test]
    fn test_zero_prefix_covers_whole_family() {
        let sets = vec![set("all", &["0.0.0.0/0", "::/0"])];
        let index = MembershipIndex::build(&sets);

        assert_eq!(index.covers("0.0.0.0").unwrap().len(), 1);
        assert_eq!(index.covers("255.255.255.255").unwrap().len(), 1);
        assert_eq!(index.covers("::").unwrap().len(), 1);
        assert_eq!(
            index
                .covers("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff")
                .unwrap()
                .len(),
            1
        );
        // Never across families: the /0 entries match their own family only
        assert_eq!(index.covers("8.8.8.8").unwrap().len(), 1);
    }

    #[test]
    fn test_full_prefix_matches_exact_address_only() {
        let sets = vec![set("hosts", &["192.0.2.10/32", "2001:db8::1/128"])];
        let index = MembershipIndex::build(&sets);

        assert_eq!(index.covers("192.0.2.10").unwrap().len(), 1);
        assert!(index.covers("192.0.2.11").unwrap().is_empty());
        assert_eq!(index.covers("2001:db8::1").unwrap().len(), 1);
        assert!(index.covers("2001:db8::2").unwrap().is_empty());
    }

    #[test]
    fn test_range_query_requires_full_containment() {
        let sets = vec![set("nets", &["10.1.0.0/16"])];
        let index = MembershipIndex::build(&sets);

        assert_eq!(index.covers("10.1.2.0/24").unwrap().len(), 1);
        assert_eq!(index.covers("10.1.0.0/16").unwrap().len(), 1);
        // Wider than the entry: not contained
        assert!(index.covers("10.0.0.0/8").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_query_is_hard_error() {
        let sets = vec![set("nets", &["10.0.0.0/8"])];
        let index = MembershipIndex::build(&sets);

        assert!(matches!(
            index.covers("not-an-ip"),
            Err(Error::InvalidAddress(_))
        ));
    }
}

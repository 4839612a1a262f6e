//! Firewall rule format: iptables/ip6tables DROP rules.

use std::fmt::Write;

use crate::family::AddrFamily;
use crate::list::EntrySet;

/// Render one DROP rule per entry, IPv4 entries through `iptables` and IPv6
/// entries through `ip6tables`, with the canonical network embedded.
pub fn render(sets: &[EntrySet]) -> String {
    let mut out = String::from("#!/bin/sh\n# Generated firewall rules\n");
    for set in sets {
        let _ = writeln!(out, "\n# {}", set.name());
        for entry in set.iter() {
            let command = match entry.family() {
                AddrFamily::V4 => "iptables",
                AddrFamily::V6 => "ip6tables",
            };
            let _ = writeln!(out, "{} -A INPUT -s {} -j DROP", command, entry.network());
        }
    }
    out
}

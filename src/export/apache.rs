//! Apache config format: RequireAll blocklist.

use std::fmt::Write;

use crate::list::EntrySet;

/// Render a `<RequireAll>` block that grants everything except the listed
/// networks, one `Require not ip` directive per entry.
pub fn render(sets: &[EntrySet]) -> String {
    let mut out = String::from("# Generated Apache blocklist\n<RequireAll>\n    Require all granted\n");
    for set in sets {
        let _ = writeln!(out, "    # {}", set.name());
        for entry in set.iter() {
            let _ = writeln!(out, "    Require not ip {}", entry.network());
        }
    }
    out.push_str("</RequireAll>\n");
    out
}

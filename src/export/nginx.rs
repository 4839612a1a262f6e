//! Web server config format: nginx geo block.

use std::fmt::Write;

use crate::list::EntrySet;

/// Render a `geo $blocked_ip` mapping block with a deny marker per entry,
/// suitable for an nginx `include`.
pub fn render(sets: &[EntrySet]) -> String {
    let mut out = String::from("# Generated nginx geo block\ngeo $blocked_ip {\n    default 0;\n");
    for set in sets {
        let _ = writeln!(out, "    # {}", set.name());
        for entry in set.iter() {
            let _ = writeln!(out, "    {} 1;", entry.network());
        }
    }
    out.push_str("}\n");
    out
}

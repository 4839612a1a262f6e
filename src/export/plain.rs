//! Plain list format: original tokens with per-list headers.

use std::fmt::Write;

use crate::list::EntrySet;

/// Render each set as a `# <name>` header followed by one raw token per
/// line, blank line between sets.
pub fn render(sets: &[EntrySet]) -> String {
    let mut out = String::new();
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "# {}", set.name());
        for entry in set.iter() {
            let _ = writeln!(out, "{}", entry.raw());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entry;

    #[test]
    fn test_plain_render() {
        let mut a = EntrySet::new("alpha");
        a.push(Entry::parse("192.0.2.5/24", "alpha", 1).unwrap());
        a.push(Entry::parse("10.0.0.1", "alpha", 2).unwrap());
        let mut b = EntrySet::new("beta");
        b.push(Entry::parse("2001:db8::/32", "beta", 1).unwrap());

        let out = render(&[a, b]);
        assert_eq!(
            out,
            "# alpha\n192.0.2.5/24\n10.0.0.1\n\n# beta\n2001:db8::/32\n"
        );
    }
}

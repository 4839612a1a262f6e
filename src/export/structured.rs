//! Structured format: lossless JSON encoding of the data model.

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::family::AddrFamily;
use crate::list::EntrySet;

/// Top-level structured document.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    lists: Vec<ListRecord>,
}

/// One named list.
#[derive(Debug, Serialize, Deserialize)]
struct ListRecord {
    name: String,
    entries: Vec<EntryRecord>,
}

/// One entry, field-labeled. Line numbers are not carried: they are not
/// semantically meaningful after export.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    family: AddrFamily,
    network: String,
    prefix_length: u8,
    source_list: String,
    raw_text: String,
}

/// Render entry sets as a JSON document.
pub fn render(sets: &[EntrySet]) -> Result<String> {
    let document = Document {
        lists: sets
            .iter()
            .map(|set| ListRecord {
                name: set.name().to_string(),
                entries: set
                    .iter()
                    .map(|entry| EntryRecord {
                        family: entry.family(),
                        network: entry.network_addr().to_string(),
                        prefix_length: entry.prefix_len(),
                        source_list: entry.source_list().to_string(),
                        raw_text: entry.raw().to_string(),
                    })
                    .collect(),
            })
            .collect(),
    };

    let mut text = serde_json::to_string_pretty(&document)
        .map_err(|e| Error::Structured(e.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Re-load a structured export into entry sets.
///
/// Produces sets equivalent to the exported ones, modulo line numbers
/// (reset to 0). Malformed documents or records are a hard
/// [`Error::Structured`] / [`Error::InvalidAddress`].
pub fn import(text: &str) -> Result<Vec<EntrySet>> {
    let document: Document =
        serde_json::from_str(text).map_err(|e| Error::Structured(e.to_string()))?;

    let mut sets = Vec::with_capacity(document.lists.len());
    for list in document.lists {
        let mut set = EntrySet::new(&list.name);
        for record in list.entries {
            let network = record_network(&record)?;
            set.push(Entry::new(network, record.raw_text, record.source_list, 0));
        }
        sets.push(set);
    }
    Ok(sets)
}

fn record_network(record: &EntryRecord) -> Result<IpNet> {
    let spec = format!("{}/{}", record.network, record.prefix_length);
    let network = match record.family {
        AddrFamily::V4 => {
            let addr: Ipv4Addr = record
                .network
                .parse()
                .map_err(|_| Error::InvalidAddress(spec.clone()))?;
            Ipv4Net::new(addr, record.prefix_length)
                .map(IpNet::V4)
                .map_err(|_| Error::InvalidAddress(spec.clone()))?
        }
        AddrFamily::V6 => {
            let addr: Ipv6Addr = record
                .network
                .parse()
                .map_err(|_| Error::InvalidAddress(spec.clone()))?;
            Ipv6Net::new(addr, record.prefix_length)
                .map(IpNet::V6)
                .map_err(|_| Error::InvalidAddress(spec.clone()))?
        }
    };
    Ok(network)
}

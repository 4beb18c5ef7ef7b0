//! Contact Record Parsing Module
//!
//! Parses the delimited-text output of the bridge's fallback enumeration:
//! one contact per line, `name|number,number,...`. The format comes from an
//! external process, so it is parsed defensively: lines are trimmed, and
//! anything malformed is skipped rather than failing the whole enumeration.

use tracing::debug;

use crate::cache::ContactsSnapshot;

// == Parser ==
/// Parses a fallback enumeration dump into a snapshot.
///
/// A record that cannot be read (no delimiter, empty name) is skipped. A
/// repeated name replaces the earlier record. Contacts without numbers are
/// kept with an empty list.
pub fn parse_records(input: &str) -> ContactsSnapshot {
    let mut snapshot = ContactsSnapshot::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, numbers)) = line.split_once('|') else {
            debug!(record = line, "skipping malformed contact record");
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            debug!(record = line, "skipping contact record without a name");
            continue;
        }

        let phones: Vec<String> = numbers
            .split(',')
            .map(str::trim)
            .filter(|number| !number.is_empty())
            .map(String::from)
            .collect();

        snapshot.insert(name.to_string(), phones);
    }

    snapshot
}

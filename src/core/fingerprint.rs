//! Content fingerprints for the immediate children of a metadata document.
//!
//! Each top-level child element is cut out of the document text exactly as
//! written (delimited by its parse events) and hashed (BLAKE3) over that
//! text, producing a `name|digest` composite key. The index answers one
//! question for the differential: does this exact content already exist
//! under this element name?

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One fingerprinted top-level element.
#[derive(Debug, Clone)]
pub struct FingerprintEntry {
    /// Local element name.
    pub name: String,
    /// Hex BLAKE3 digest of the element text.
    pub digest: String,
    /// The element text, carried through to the differential verbatim.
    pub xml: String,
}

impl FingerprintEntry {
    fn new(name: String, xml: String) -> Self {
        let digest = blake3::hash(xml.as_bytes()).to_hex().to_string();
        Self { name, digest, xml }
    }

    /// Composite identity: element name plus content digest.
    pub fn key(&self) -> String {
        format!("{}|{}", self.name, self.digest)
    }
}

/// Mapping from `name|digest` to entry, sorted by key.
///
/// Duplicate keys (same-name siblings with identical content) collapse,
/// last write wins; the differential only needs membership, not cardinality.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    entries: BTreeMap<String, FingerprintEntry>,
}

impl FingerprintIndex {
    /// Parse a document and fingerprint every immediate child of its root.
    ///
    /// Fails on malformed markup; a document that cannot be parsed cannot be
    /// diffed. Empty input yields an empty index.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        // Mismatched end tags must fail the parse, not silently rebalance.
        reader.config_mut().check_end_names = true;
        let mut entries = BTreeMap::new();
        let mut depth = 0usize;

        loop {
            let event_start = reader.buffer_position() as usize;
            match reader
                .read_event()
                .context("malformed metadata document")?
            {
                Event::Start(start) => {
                    if depth == 1 {
                        let name = local_name(&start)?;
                        // Consume events through the child's matching end tag.
                        let mut child_depth = 1usize;
                        while child_depth > 0 {
                            match reader
                                .read_event()
                                .context("malformed metadata document")?
                            {
                                Event::Start(_) => child_depth += 1,
                                Event::End(_) => child_depth -= 1,
                                Event::Eof => {
                                    bail!("unexpected end of document inside <{name}>")
                                }
                                _ => {}
                            }
                        }
                        let event_end = reader.buffer_position() as usize;
                        let entry =
                            FingerprintEntry::new(name, content[event_start..event_end].to_owned());
                        entries.insert(entry.key(), entry);
                    } else {
                        depth += 1;
                    }
                }
                Event::Empty(start) if depth == 1 => {
                    let name = local_name(&start)?;
                    let event_end = reader.buffer_position() as usize;
                    let entry =
                        FingerprintEntry::new(name, content[event_start..event_end].to_owned());
                    entries.insert(entry.key(), entry);
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { entries })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FingerprintEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn local_name(start: &BytesStart<'_>) -> Result<String> {
    let name = start.local_name();
    Ok(std::str::from_utf8(name.as_ref())
        .context("element name is not valid UTF-8")?
        .to_owned())
}

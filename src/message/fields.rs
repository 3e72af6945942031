//! An insertion-ordered collection of named byte-string fields.
//!
//! Both parsed requests and built responses are, at the wire level, just an
//! ordered sequence of `(name, bytes)` pairs: order matters for
//! serialization (responses are built by concatenating fields in insertion
//! order) but is never consulted semantically once a command handler has
//! pulled out the fields it needs by name.

/// An ordered list of named byte-string fields, as they appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    entries: Vec<(String, Vec<u8>)>,
}

impl FieldList {
    pub fn new() -> Self {
        FieldList { entries: Vec::new() }
    }

    /// Append a field, preserving insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Look up a field's raw bytes by name.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Concatenate every field's bytes in insertion order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (_, v) in &self.entries {
            out.extend_from_slice(v);
        }
        out
    }

    /// Render a human-readable dump, one field per line, names padded to a
    /// common width. Used for debug-level tracing, never for wire framing.
    pub fn trace(&self) -> String {
        let width = self.entries.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        let mut dump = String::new();
        for (name, value) in &self.entries {
            dump.push_str(&format!(
                "\t[{:width$}]: [{}]\n",
                name,
                String::from_utf8_lossy(value),
                width = width
            ));
        }
        dump
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }
}

/// Scheme tags that, when any of `tags` matches the field's leading byte,
/// expand a key field from 32 to 33 bytes (the tag byte plus 32 hex chars).
pub const ANY_TAG: &[u8] = b"UTS";
/// Only the `U` tag expands the field; `T`/`S` leave it at 32 bytes, a
/// quirk preserved from the command set this simulator imitates (see
/// spec.md's DC `PVK Pair` and CA `Destination Key` field notes).
pub const U_ONLY: &[u8] = b"U";

/// Consume up to `n` bytes from the front of `data`, Python-slice style:
/// if fewer than `n` bytes remain, take what's there instead of panicking.
pub fn take(data: &[u8], n: usize) -> (&[u8], &[u8]) {
    let n = n.min(data.len());
    data.split_at(n)
}

/// Consume a key field whose length depends on a leading scheme-tag byte.
pub fn take_key_field<'a>(data: &'a [u8], tags: &[u8]) -> (&'a [u8], &'a [u8]) {
    let size = if data.first().is_some_and(|b| tags.contains(b)) {
        33
    } else {
        32
    };
    take(data, size)
}

/// Consume bytes up to (and dropping) the first `;` delimiter, or all
/// remaining bytes if none is found.
pub fn take_until_semicolon(data: &[u8]) -> (&[u8], &[u8]) {
    match data.iter().position(|&b| b == b';') {
        Some(idx) => (&data[..idx], &data[idx + 1..]),
        None => (data, &data[data.len()..]),
    }
}

//! Interned string lookup.

use super::schema::TableIndex;

/// Read-only view over the string array a thread resolves names against
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    strings: &'a [String],
}

impl<'a> StringTable<'a> {
    pub fn new(strings: &'a [String]) -> Self {
        Self { strings }
    }

    /// Resolve an index; unknown or out-of-range indices yield ""
    pub fn get(&self, index: TableIndex) -> &'a str {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.strings.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Resolve an optional index column entry
    pub fn get_opt(&self, index: Option<TableIndex>) -> &'a str {
        index.map(|i| self.get(i)).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

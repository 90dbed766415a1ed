use serde::{Deserialize, Serialize};

/// One entry of a record's audit history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub action: String,
    pub user: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HistoryEntry {
    pub fn new(id: u64, action: &str, user: &str, timestamp: &str) -> Self {
        Self {
            id,
            action: action.to_string(),
            user: user.to_string(),
            timestamp: timestamp.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

/// Filter applied when browsing a record's history
///
/// Every set criterion must match; matching is case-insensitive.
/// `text` looks into action, user and details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub action: Option<String>,
    pub user: Option<String>,
    pub text: Option<String>,
}

impl HistoryFilter {
    fn matches(&self, entry: &HistoryEntry) -> bool {
        let eq = |want: &Option<String>, have: &str| match want {
            Some(w) if !w.trim().is_empty() => w.trim().eq_ignore_ascii_case(have),
            _ => true,
        };
        if !eq(&self.action, &entry.action) || !eq(&self.user, &entry.user) {
            return false;
        }
        match &self.text {
            Some(t) if !t.trim().is_empty() => {
                let needle = t.trim().to_lowercase();
                entry.action.to_lowercase().contains(&needle)
                    || entry.user.to_lowercase().contains(&needle)
                    || entry
                        .details
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

/// Append-only, ordered history of a record (oldest first in storage)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditHistory(Vec<HistoryEntry>);

impl AuditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end. Existing entries are never touched.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.0.push(entry);
    }

    /// Next free entry id
    pub fn next_id(&self) -> u64 {
        self.0.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
    }

    /// Entries in display order (newest first)
    pub fn newest_first(&self) -> Vec<&HistoryEntry> {
        self.0.iter().rev().collect()
    }

    /// Entries matching `filter`, newest first
    pub fn filter(&self, filter: &HistoryFilter) -> Vec<&HistoryEntry> {
        self.0.iter().rev().filter(|e| filter.matches(e)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<HistoryEntry>> for AuditHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self(entries)
    }
}

//! Mood journal.
//!
//! Entries are kept in write order. Readers wanting newest-first reverse at
//! read time ([`Journal::recent`]).

mod trash;

pub use trash::{Trash, DEFAULT_TTL_SECS};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const MIN_MOOD: u8 = 1;
pub const MAX_MOOD: u8 = 5;
pub const MAX_TEXT_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub mood: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
}

impl JournalEntry {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(self.mood, &self.text)
    }
}

fn validate_fields(mood: u8, text: &str) -> Result<(), ValidationError> {
    if !(MIN_MOOD..=MAX_MOOD).contains(&mood) {
        return Err(ValidationError::InvalidMood { mood });
    }
    let len = text.chars().count();
    if len == 0 || len > MAX_TEXT_LEN {
        return Err(ValidationError::InvalidJournalText { len });
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries, dropping any that fail validation.
    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        let total = entries.len();
        let entries: Vec<JournalEntry> = entries
            .into_iter()
            .filter(|e| e.validate().is_ok())
            .collect();
        if entries.len() != total {
            tracing::warn!(
                "dropped {} invalid journal entries from snapshot",
                total - entries.len()
            );
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().rev().take(limit)
    }

    /// Whether any entry was written on `date` (UTC calendar day).
    pub fn has_entry_on(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|e| e.created_at.date_naive() == date)
    }

    /// Append a new entry. The caller trims `text` first.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a mood outside `1..=5` or text that
    /// is empty or longer than 1000 characters.
    pub fn add(
        &mut self,
        mood: u8,
        text: &str,
        triggers: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> Result<&JournalEntry, ValidationError> {
        validate_fields(mood, text)?;
        self.entries.push(JournalEntry {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            mood,
            text: text.to_string(),
            triggers: triggers.filter(|t| !t.is_empty()),
        });
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Remove the entry with `id`. `None` if there was no such entry.
    pub fn delete(&mut self, id: &str) -> Option<JournalEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Put a previously deleted entry back, keeping its id and timestamp.
    ///
    /// The entry lands at its chronological position among the others.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateEntry`] if the id is still
    /// present, or a field validation error for a malformed entry.
    pub fn restore(&mut self, entry: JournalEntry) -> Result<(), ValidationError> {
        if self.get(&entry.id).is_some() {
            return Err(ValidationError::DuplicateEntry { id: entry.id });
        }
        entry.validate()?;
        let index = self
            .entries
            .partition_point(|e| e.created_at <= entry.created_at);
        self.entries.insert(index, entry);
        Ok(())
    }
}

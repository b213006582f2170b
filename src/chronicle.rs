//! Append-only narrative log of the run.

use std::slice;

use serde::Serialize;

use crate::world::{Date, Season};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Significance {
    Notable,
    Major,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChronicleEntry {
    pub year: u32,
    pub day: u32,
    pub season: Season,
    pub text: String,
    pub significance: Significance,
}

impl ChronicleEntry {
    pub fn is_major(&self) -> bool {
        self.significance == Significance::Major
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Chronicle {
    entries: Vec<ChronicleEntry>,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. The only way the log grows.
    pub fn record(&mut self, date: Date, significance: Significance, text: impl Into<String>) {
        self.entries.push(ChronicleEntry {
            year: date.year,
            day: date.day,
            season: date.season,
            text: text.into(),
            significance,
        });
    }

    /// Entries in append order. Call again to start over.
    pub fn entries(&self) -> slice::Iter<'_, ChronicleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn in_year(&self, year: u32) -> impl Iterator<Item = &ChronicleEntry> {
        self.entries.iter().filter(move |entry| entry.year == year)
    }

    pub fn major(&self) -> impl Iterator<Item = &ChronicleEntry> {
        self.entries.iter().filter(|entry| entry.is_major())
    }
}

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use tracing::info;

use crate::error::ExportError;
use crate::util::mean;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoodLevel {
    VeryLow = 1,
    Low = 2,
    Neutral = 3,
    Good = 4,
    Excellent = 5,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::VeryLow,
        MoodLevel::Low,
        MoodLevel::Neutral,
        MoodLevel::Good,
        MoodLevel::Excellent,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "Very Low",
            MoodLevel::Low => "Low",
            MoodLevel::Neutral => "Neutral",
            MoodLevel::Good => "Good",
            MoodLevel::Excellent => "Excellent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "😢",
            MoodLevel::Low => "😕",
            MoodLevel::Neutral => "😐",
            MoodLevel::Good => "😊",
            MoodLevel::Excellent => "😄",
        }
    }

    pub fn next(self) -> Self {
        Self::from_value(self.value() + 1).unwrap_or(self)
    }

    pub fn prev(self) -> Self {
        Self::from_value(self.value().saturating_sub(1)).unwrap_or(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: u64,
    pub date: NaiveDate,
    pub mood: MoodLevel,
    pub notes: String,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    date: String,
    mood: u8,
    label: &'a str,
    notes: &'a str,
}

/// In-memory mood history, newest entry first
#[derive(Debug, Clone, Default)]
pub struct MoodJournal {
    entries: Vec<MoodEntry>,
    next_id: u64,
}

impl MoodJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, mood: MoodLevel, notes: &str, date: NaiveDate) -> &MoodEntry {
        self.next_id += 1;
        self.entries.insert(
            0,
            MoodEntry {
                id: self.next_id,
                date,
                mood,
                notes: notes.trim().to_string(),
            },
        );
        &self.entries[0]
    }

    pub fn average(&self) -> Option<f64> {
        let values: Vec<f64> = self.entries.iter().map(|e| e.mood.value() as f64).collect();
        mean(&values)
    }

    /// Average rounded to one decimal, "0" when there are no entries
    pub fn average_label(&self) -> String {
        self.average()
            .map_or_else(|| "0".to_string(), |avg| format!("{avg:.1}"))
    }

    /// Consecutive days with an entry, ending today (or yesterday if today has none yet)
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let days: Vec<NaiveDate> = self
            .entries
            .iter()
            .map(|e| e.date)
            .filter(|d| *d <= today)
            .sorted_by(|a, b| b.cmp(a))
            .dedup()
            .collect();

        let Some(&latest) = days.first() else {
            return 0;
        };
        if latest != today && Some(latest) != today.pred_opt() {
            return 0;
        }

        let mut expected = latest;
        let mut streak = 0;
        for day in days {
            if day != expected {
                break;
            }
            streak += 1;
            match expected.pred_opt() {
                Some(prev) => expected = prev,
                None => break,
            }
        }
        streak
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            wtr.serialize(CsvRow {
                date: entry.date.format("%Y-%m-%d").to_string(),
                mood: entry.mood.value(),
                label: entry.mood.label(),
                notes: &entry.notes,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes `mood_journal.csv` into `dir` and returns its path
    pub fn export_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join("mood_journal.csv");
        self.write_csv(File::create(&path)?)?;
        info!(entries = self.entries.len(), path = %path.display(), "exported mood journal");
        Ok(path)
    }
}

/// The entry form on the mood screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodForm {
    pub selected: Option<MoodLevel>,
    pub notes: String,
}

impl MoodForm {
    pub fn select_next(&mut self) {
        self.selected = Some(self.selected.map_or(MoodLevel::Neutral, MoodLevel::next));
    }

    pub fn select_prev(&mut self) {
        self.selected = Some(self.selected.map_or(MoodLevel::Neutral, MoodLevel::prev));
    }

    /// Saves into the journal and clears the form; nothing happens without a selection
    pub fn save(&mut self, journal: &mut MoodJournal, today: NaiveDate) -> bool {
        let Some(mood) = self.selected else {
            return false;
        };
        journal.record(mood, &self.notes, today);
        *self = Self::default();
        true
    }
}

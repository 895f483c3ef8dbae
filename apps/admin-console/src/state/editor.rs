//! # Beat Editor State
//!
//! The beats on the pricing page and their current, unsaved field values.
//!
//! ## Editor Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Editor State Operations                              │
//! │                                                                         │
//! │  Admin Action             Command               Editor Change           │
//! │  ────────────             ───────               ─────────────           │
//! │                                                                         │
//! │  Open page ──────────────► load() ─────────────► beats replaced        │
//! │                                                                         │
//! │  Type a price ───────────► edit_field() ───────► PricedItem::apply     │
//! │                                                                         │
//! │  Tick "Exclusive" ───────► set_exclusive() ────► beat.is_exclusive     │
//! │                                                                         │
//! │  Click "Save all" ───────► save_all() ─────────► validate_all (read)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use beat_core::validation::{validate_beat_id, validate_beats, BulkReport};
use beat_core::{Beat, CoreError, CoreResult, EditOutcome, ErrorKind, FieldEdit};

/// Beats in page order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct BeatEditor {
    beats: Vec<Beat>,
    index: HashMap<i64, usize>,
}

impl BeatEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the page contents. Returns how many beats were loaded.
    ///
    /// Nothing changes if any id is invalid or repeated.
    pub fn load(&mut self, beats: Vec<Beat>) -> CoreResult<usize> {
        let mut seen = HashSet::with_capacity(beats.len());
        for beat in &beats {
            validate_beat_id(beat.id)?;
            if !seen.insert(beat.id) {
                return Err(CoreError::DuplicateBeat(beat.id));
            }
        }

        self.index = beats.iter().enumerate().map(|(i, b)| (b.id, i)).collect();
        self.beats = beats;
        Ok(self.beats.len())
    }

    pub fn get(&self, id: i64) -> Option<&Beat> {
        self.index.get(&id).map(|&i| &self.beats[i])
    }

    fn get_mut(&mut self, id: i64) -> CoreResult<&mut Beat> {
        let i = *self.index.get(&id).ok_or(CoreError::BeatNotFound(id))?;
        Ok(&mut self.beats[i])
    }

    /// Applies one field edit to a beat's pricing.
    pub fn edit(&mut self, id: i64, edit: FieldEdit) -> CoreResult<EditOutcome> {
        Ok(self.get_mut(id)?.pricing.apply(edit))
    }

    pub fn set_exclusive(&mut self, id: i64, exclusive: bool) -> CoreResult<()> {
        self.get_mut(id)?.is_exclusive = exclusive;
        Ok(())
    }

    /// Pricing rules one beat currently breaks.
    pub fn validate(&self, id: i64) -> CoreResult<Vec<ErrorKind>> {
        self.get(id)
            .map(|b| b.pricing.validate())
            .ok_or(CoreError::BeatNotFound(id))
    }

    pub fn validate_all(&self) -> BulkReport {
        validate_beats(&self.beats)
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}

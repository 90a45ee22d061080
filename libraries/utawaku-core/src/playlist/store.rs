//! Playlist store
//!
//! Owns the ordered list of segments. Every mutator returns the
//! [`PlaylistChange`] it caused so callers can forward it to the playback
//! engine, which keeps its current index in step.

use crate::error::{CoreError, Result};
use crate::playlist::csv::{csv_to_playlist, playlist_to_csv};
use crate::traits::SegmentSource;
use crate::types::{Segment, VideoId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// A structural change to the playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistChange {
    /// A segment was inserted at this index
    Inserted(usize),

    /// The segment at this index was edited in place
    Updated(usize),

    /// The segment at this index was removed
    Removed(usize),

    /// A segment was moved; indices between shift by one
    Moved { from: usize, to: usize },

    /// The whole playlist was replaced (import, reset)
    Replaced,
}

/// Ordered, persistable list of segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistStore {
    segments: Vec<Segment>,
}

impl PlaylistStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given segments
    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Create a store holding the built-in demo playlist
    pub fn with_defaults() -> Self {
        Self::with_segments(default_playlist())
    }

    // ===== Queries =====

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    // ===== Mutation =====

    /// Append a segment
    pub fn push(&mut self, segment: Segment) -> PlaylistChange {
        self.segments.push(segment);
        PlaylistChange::Inserted(self.segments.len() - 1)
    }

    /// Insert a segment at `index` (`index == len` appends)
    pub fn insert(&mut self, index: usize, segment: Segment) -> Result<PlaylistChange> {
        if index > self.segments.len() {
            return Err(CoreError::out_of_bounds(index, self.segments.len()));
        }
        self.segments.insert(index, segment);
        Ok(PlaylistChange::Inserted(index))
    }

    /// Replace the segment at `index`
    pub fn update(&mut self, index: usize, segment: Segment) -> Result<PlaylistChange> {
        let len = self.segments.len();
        let slot = self
            .segments
            .get_mut(index)
            .ok_or(CoreError::out_of_bounds(index, len))?;
        *slot = segment;
        Ok(PlaylistChange::Updated(index))
    }

    /// Save an edit started from the segment at `index`
    ///
    /// If the title was changed during the edit the result is appended as a
    /// new segment and the original is left alone; otherwise it replaces the
    /// original in place.
    pub fn commit_edit(
        &mut self,
        index: usize,
        original_title: &str,
        segment: Segment,
    ) -> Result<PlaylistChange> {
        if index >= self.segments.len() {
            return Err(CoreError::out_of_bounds(index, self.segments.len()));
        }
        if segment.title == original_title {
            self.update(index, segment)
        } else {
            debug!(index, "title changed during edit, appending as new segment");
            Ok(self.push(segment))
        }
    }

    /// Remove and return the segment at `index`
    pub fn remove(&mut self, index: usize) -> Result<(Segment, PlaylistChange)> {
        if index >= self.segments.len() {
            return Err(CoreError::out_of_bounds(index, self.segments.len()));
        }
        let segment = self.segments.remove(index);
        Ok((segment, PlaylistChange::Removed(index)))
    }

    /// Move the segment at `from` so that it ends up at `to`
    pub fn move_segment(&mut self, from: usize, to: usize) -> Result<PlaylistChange> {
        let len = self.segments.len();
        if from >= len {
            return Err(CoreError::out_of_bounds(from, len));
        }
        if to >= len {
            return Err(CoreError::out_of_bounds(to, len));
        }
        if from != to {
            let segment = self.segments.remove(from);
            self.segments.insert(to, segment);
        }
        Ok(PlaylistChange::Moved { from, to })
    }

    /// Replace every segment
    pub fn replace_all(&mut self, segments: Vec<Segment>) -> PlaylistChange {
        self.segments = segments;
        PlaylistChange::Replaced
    }

    /// Restore the built-in demo playlist
    pub fn reset_to_default(&mut self) -> PlaylistChange {
        self.replace_all(default_playlist())
    }

    // ===== CSV =====

    /// Replace the playlist with the contents of a CSV document
    ///
    /// On error the store is left untouched.
    pub fn import_csv(&mut self, text: &str) -> Result<PlaylistChange> {
        let segments = csv_to_playlist(text)?;
        info!(count = segments.len(), "Imported playlist from CSV");
        Ok(self.replace_all(segments))
    }

    /// Render the playlist as CSV
    pub fn export_csv(&self) -> String {
        playlist_to_csv(&self.segments)
    }

    // ===== Persistence =====

    /// Load a store saved with [`PlaylistStore::save`]
    ///
    /// A missing file yields the default playlist. An empty saved playlist
    /// also falls back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No saved playlist, using defaults");
            return Ok(Self::with_defaults());
        }

        let text = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&text)?;
        if store.is_empty() {
            warn!(path = %path.display(), "Saved playlist is empty, using defaults");
            return Ok(Self::with_defaults());
        }

        debug!(path = %path.display(), count = store.len(), "Loaded playlist");
        Ok(store)
    }

    /// Write the store as JSON, replacing the file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        debug!(path = %path.display(), count = self.len(), "Saved playlist");
        Ok(())
    }
}

impl SegmentSource for PlaylistStore {
    fn segment(&self, index: usize) -> Option<&Segment> {
        self.get(index)
    }

    fn len(&self) -> usize {
        self.segments.len()
    }
}

impl<'a> IntoIterator for &'a PlaylistStore {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// The demo playlist shipped with the application
pub fn default_playlist() -> Vec<Segment> {
    let demo = |id: &str, title: &str, start, end, rating: u8, article: &str| {
        VideoId::parse(id).map(|video_id| {
            Segment::new(video_id, title, start, end)
                .with_rating(rating)
                .with_article(article)
        })
    };

    [
        demo("dQw4w9WgXcQ", "Never Gonna Give You Up", 0, 60, 5, "Rick Astley"),
        demo("kJQP7kiw5Fk", "Despacito", 30, 90, 4, "Luis Fonsi ft. Daddy Yankee"),
        demo("fJ9rUzIMcZQ", "Bohemian Rhapsody", 60, 180, 6, "Queen"),
        demo("JGwWNGJdvx8", "Shape of You", 15, 75, 4, "Ed Sheeran"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

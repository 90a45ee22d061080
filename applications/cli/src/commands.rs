//! Playlist editing operations behind the CLI subcommands
//!
//! Positions are 1-based at this layer and converted to store indices here.

use crate::error::{CliError, Result};
use tracing::info;
use utawaku_core::{
    extract_video_id, format_time, PlaylistChange, PlaylistStore, Segment, SegmentDraft,
};
use utawaku_oembed::TitleLookup;

/// Convert a 1-based position into a store index
pub fn to_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        return Err(CliError::InvalidPosition(position));
    }
    Ok(position - 1)
}

/// Render the playlist as a numbered table
pub fn render_list(store: &PlaylistStore) -> String {
    if store.is_empty() {
        return "Playlist is empty".to_string();
    }

    store
        .iter()
        .enumerate()
        .map(|(i, segment)| render_row(i + 1, segment))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(position: usize, segment: &Segment) -> String {
    let range = match segment.end_boundary() {
        Some(end) => format!("{}-{}", format_time(segment.start_sec), format_time(end)),
        None => format!("{}-end", format_time(segment.start_sec)),
    };
    let stars = "*".repeat(usize::from(segment.rating.stars()));
    let mut row = format!(
        "{position:>3}. {title}  [{id}] {range} {stars}",
        title = segment.title,
        id = segment.video_id,
    );
    if !segment.article.is_empty() {
        row.push_str(&format!("\n     {}", segment.article.replace('\n', "\n     ")));
    }
    row
}

/// Validate a draft and add it to the playlist
///
/// A draft without a title is named through `lookup` first. `at` is a
/// 1-based insert position; `None` appends. Returns the new 1-based position.
pub async fn add_segment(
    store: &mut PlaylistStore,
    mut draft: SegmentDraft,
    at: Option<usize>,
    lookup: &dyn TitleLookup,
) -> Result<usize> {
    if draft.title.trim().is_empty() {
        if let Some(video_id) = extract_video_id(&draft.video) {
            draft.title = lookup.lookup_title(&video_id).await;
        }
    }

    let segment = draft.validate()?;
    let title = segment.title.clone();

    let change = match at {
        Some(position) if position == 0 || position > store.len() + 1 => {
            return Err(CliError::InvalidPosition(position));
        }
        Some(position) => store.insert(position - 1, segment)?,
        None => store.push(segment),
    };

    let PlaylistChange::Inserted(index) = change else {
        return Ok(store.len());
    };
    info!(position = index + 1, title = %title, "Added segment");
    Ok(index + 1)
}

/// Field overrides for an existing segment; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct SegmentEdit {
    pub video: Option<String>,
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub rating: Option<u8>,
    pub article: Option<String>,
}

impl SegmentEdit {
    /// Build the editor form for `segment` with these overrides applied
    pub fn apply(&self, segment: &Segment) -> SegmentDraft {
        SegmentDraft {
            video: self
                .video
                .clone()
                .unwrap_or_else(|| segment.video_id.to_string()),
            title: self.title.clone().unwrap_or_else(|| segment.title.clone()),
            start: self
                .start
                .clone()
                .unwrap_or_else(|| segment.start_sec.to_string()),
            end: self
                .end
                .clone()
                .unwrap_or_else(|| segment.end_sec.to_string()),
            rating: self.rating.unwrap_or_else(|| segment.rating.stars()),
            article: self
                .article
                .clone()
                .unwrap_or_else(|| segment.article.clone()),
        }
    }
}

/// Edit the segment at a 1-based position
///
/// Renaming keeps the original and appends the edited copy, matching the
/// editor's "save as new" behavior.
pub fn edit_segment(
    store: &mut PlaylistStore,
    position: usize,
    edit: &SegmentEdit,
) -> Result<PlaylistChange> {
    let index = to_index(position, store.len())?;
    let (original_title, draft) = match store.get(index) {
        Some(segment) => (segment.title.clone(), edit.apply(segment)),
        None => return Err(CliError::InvalidPosition(position)),
    };

    let segment = draft.validate()?;
    Ok(store.commit_edit(index, &original_title, segment)?)
}

/// Remove the segment at a 1-based position
pub fn remove_segment(store: &mut PlaylistStore, position: usize) -> Result<Segment> {
    let index = to_index(position, store.len())?;
    let (segment, _) = store.remove(index)?;
    info!(position, title = %segment.title, "Removed segment");
    Ok(segment)
}

/// Move a segment between 1-based positions
pub fn move_segment(store: &mut PlaylistStore, from: usize, to: usize) -> Result<()> {
    let len = store.len();
    let from = to_index(from, len)?;
    let to = to_index(to, len)?;
    store.move_segment(from, to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use utawaku_core::VideoId;

    struct FixedTitle(&'static str);

    #[async_trait]
    impl TitleLookup for FixedTitle {
        async fn lookup_title(&self, _video_id: &VideoId) -> String {
            self.0.to_string()
        }
    }

    fn draft(video: &str, title: &str) -> SegmentDraft {
        SegmentDraft {
            video: video.to_string(),
            title: title.to_string(),
            start: "0:10".to_string(),
            end: "0:40".to_string(),
            rating: 3,
            article: String::new(),
        }
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(to_index(1, 3).unwrap(), 0);
        assert_eq!(to_index(3, 3).unwrap(), 2);
        assert!(matches!(to_index(0, 3), Err(CliError::InvalidPosition(0))));
        assert!(matches!(to_index(4, 3), Err(CliError::InvalidPosition(4))));
    }

    #[tokio::test]
    async fn add_looks_up_missing_title() {
        let mut store = PlaylistStore::new();
        let lookup = FixedTitle("Looked Up");
        let position = add_segment(&mut store, draft("https://youtu.be/dQw4w9WgXcQ", ""), None, &lookup)
            .await
            .unwrap();

        assert_eq!(position, 1);
        assert_eq!(store.get(0).unwrap().title, "Looked Up");
        assert_eq!(store.get(0).unwrap().start_sec, 10);
    }

    #[tokio::test]
    async fn add_without_any_title_fails() {
        let mut store = PlaylistStore::new();
        let err = add_segment(&mut store, draft("dQw4w9WgXcQ", " "), None, &FixedTitle(""))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn add_inserts_at_position() {
        let mut store = PlaylistStore::with_defaults();
        let lookup = FixedTitle("unused");
        let position = add_segment(&mut store, draft("kJQP7kiw5Fk", "First"), Some(1), &lookup)
            .await
            .unwrap();
        assert_eq!(position, 1);
        assert_eq!(store.get(0).unwrap().title, "First");

        let err = add_segment(&mut store, draft("kJQP7kiw5Fk", "Far"), Some(99), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidPosition(99)));
    }

    #[test]
    fn edit_in_place_or_append_on_rename() {
        let mut store = PlaylistStore::with_defaults();
        let len = store.len();

        let trim = SegmentEdit {
            end: Some("0:45".to_string()),
            ..SegmentEdit::default()
        };
        assert_eq!(
            edit_segment(&mut store, 1, &trim).unwrap(),
            PlaylistChange::Updated(0)
        );
        assert_eq!(store.get(0).unwrap().end_sec, 45);

        let rename = SegmentEdit {
            title: Some("Renamed".to_string()),
            ..SegmentEdit::default()
        };
        assert_eq!(
            edit_segment(&mut store, 1, &rename).unwrap(),
            PlaylistChange::Inserted(len)
        );
        assert_eq!(store.len(), len + 1);
        assert_eq!(store.get(len).unwrap().title, "Renamed");
    }

    #[test]
    fn list_shows_ranges_and_stars() {
        let store = PlaylistStore::with_defaults();
        let listing = render_list(&store);
        assert!(listing.contains("  1. Never Gonna Give You Up  [dQw4w9WgXcQ] 0:00-1:00 *****"));
        assert!(listing.contains("3:00"));
        assert_eq!(render_list(&PlaylistStore::new()), "Playlist is empty");
    }

    #[test]
    fn move_and_remove_use_positions() {
        let mut store = PlaylistStore::with_defaults();
        move_segment(&mut store, 1, 4).unwrap();
        assert_eq!(store.get(3).unwrap().video_id.as_str(), "dQw4w9WgXcQ");

        let removed = remove_segment(&mut store, 4).unwrap();
        assert_eq!(removed.video_id.as_str(), "dQw4w9WgXcQ");
        assert!(remove_segment(&mut store, 4).is_err());
    }
}

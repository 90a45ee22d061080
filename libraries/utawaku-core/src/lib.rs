//! Utawaku Core
//!
//! Data model and playlist handling for the Utawaku segment player.
//!
//! This crate provides:
//! - **Domain Types**: `Segment`, `VideoId`, `Rating`, and the `SegmentDraft` form model
//! - **Time codec**: `parse_time` / `format_time`
//! - **Playlist Store**: ordered segments with change notifications, CSV and JSON persistence
//! - **Error Handling**: `CoreError` and friends
//!
//! # Example
//!
//! ```rust
//! use utawaku_core::{PlaylistStore, SegmentDraft};
//!
//! let mut store = PlaylistStore::new();
//! let segment = SegmentDraft {
//!     video: "https://youtu.be/dQw4w9WgXcQ".into(),
//!     title: "Chorus".into(),
//!     start: "0:43".into(),
//!     end: "1:05".into(),
//!     rating: 5,
//!     article: String::new(),
//! }
//! .validate()
//! .unwrap();
//!
//! store.push(segment);
//! assert!(store.export_csv().starts_with("videoId,title"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod playlist;
pub mod time;
pub mod traits;
pub mod types;

pub use error::{CoreError, CsvError, Result, TimeParseError, ValidationError};
pub use playlist::{
    csv_to_playlist, default_playlist, playlist_to_csv, PlaylistChange, PlaylistStore, CSV_HEADER,
};
pub use time::{format_time, parse_time};
pub use traits::SegmentSource;
pub use types::{extract_video_id, Rating, Segment, SegmentDraft, VideoId};

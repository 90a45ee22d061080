//! Playlist store and its CSV representation

mod csv;
mod store;

pub use csv::{csv_to_playlist, playlist_to_csv, CSV_HEADER};
pub use store::{default_playlist, PlaylistChange, PlaylistStore};

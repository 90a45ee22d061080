mod ids;
mod segment;

pub use ids::{extract_video_id, Rating, VideoId, VIDEO_ID_LEN};
pub use segment::{Segment, SegmentDraft};

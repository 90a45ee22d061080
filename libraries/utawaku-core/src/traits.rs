/// Core traits for Utawaku
use crate::types::Segment;

/// Read-only, index-addressed view of an ordered playlist
///
/// The playback engine only ever holds an index into this view and looks
/// the segment up again whenever it needs it.
pub trait SegmentSource {
    /// Segment at `index`, if present
    fn segment(&self, index: usize) -> Option<&Segment>;

    /// Number of segments
    fn len(&self) -> usize;

    /// Whether there are no segments
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SegmentSource for [Segment] {
    fn segment(&self, index: usize) -> Option<&Segment> {
        self.get(index)
    }

    fn len(&self) -> usize {
        <[Segment]>::len(self)
    }
}

impl SegmentSource for Vec<Segment> {
    fn segment(&self, index: usize) -> Option<&Segment> {
        self.get(index)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

//! Property-based tests for the CSV codec and time codec

use proptest::prelude::*;
use utawaku_core::{
    csv_to_playlist, format_time, parse_time, playlist_to_csv, Rating, Segment, VideoId,
};

fn arbitrary_segment() -> impl Strategy<Value = Segment> {
    (
        "[A-Za-z0-9_-]{11}",
        // Text fields may contain the characters the codec has to quote
        "[A-Za-z0-9 ,\"\n\r\u{3042}-\u{3093}]{0,30}",
        0u32..100_000,
        0u32..100_000,
        1u8..=6,
        "[A-Za-z0-9 ,\"\n.]{0,40}",
    )
        .prop_map(|(id, title, start, end, rating, article)| Segment {
            video_id: VideoId::parse(&id).unwrap(),
            title,
            start_sec: start,
            end_sec: end,
            rating: Rating::new(rating),
            article,
        })
}

proptest! {
    /// Property: parse(serialize(P)) == P
    #[test]
    fn csv_round_trip(segments in prop::collection::vec(arbitrary_segment(), 0..20)) {
        let text = playlist_to_csv(&segments);
        let parsed = csv_to_playlist(&text).unwrap();
        prop_assert_eq!(parsed, segments);
    }

    /// Property: formatting then parsing a time is lossless
    #[test]
    fn time_round_trip(secs in 0u32..1_000_000) {
        prop_assert_eq!(parse_time(&format_time(secs)).unwrap(), secs);
    }
}

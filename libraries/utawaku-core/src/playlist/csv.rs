//! Playlist CSV codec
//!
//! Format: header `videoId,title,start,end,rating,article`, one segment per
//! row. Fields containing a comma, quote, CR or LF are wrapped in quotes with
//! internal quotes doubled. Quoted fields may span lines.

use crate::error::CsvError;
use crate::time::truncate_seconds;
use crate::types::{Rating, Segment, VideoId};

/// Header row written on export
pub const CSV_HEADER: &str = "videoId,title,start,end,rating,article";

/// Serialize segments to CSV text (no trailing newline)
pub fn playlist_to_csv(segments: &[Segment]) -> String {
    let mut lines = Vec::with_capacity(segments.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for segment in segments {
        lines.push(
            [
                escape_field(segment.video_id.as_str()),
                escape_field(&segment.title),
                segment.start_sec.to_string(),
                segment.end_sec.to_string(),
                segment.rating.to_string(),
                escape_field(&segment.article),
            ]
            .join(","),
        );
    }

    lines.join("\n")
}

/// Parse CSV text into segments
///
/// Fails as a whole on the first malformed row. Blank lines are skipped,
/// missing trailing columns default to empty/zero, an unparseable rating
/// falls back to one star.
pub fn csv_to_playlist(text: &str) -> Result<Vec<Segment>, CsvError> {
    let mut records = parse_records(text)?.into_iter();

    let header = records.next().ok_or(CsvError::MissingHeader)?;
    let first = header.fields.first().map(|f| f.trim().to_ascii_lowercase());
    if !first.is_some_and(|f| f.starts_with("videoid")) {
        return Err(CsvError::MissingHeader);
    }

    records.map(|record| record.into_segment()).collect()
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }

    fn seconds(&self, index: usize, name: &'static str) -> Result<u32, CsvError> {
        let raw = self.field(index);
        if raw.trim().is_empty() {
            return Ok(0);
        }
        truncate_seconds(raw).ok_or_else(|| CsvError::InvalidField {
            line: self.line,
            field: name,
            value: raw.to_string(),
        })
    }

    fn into_segment(self) -> Result<Segment, CsvError> {
        let raw_id = self.field(0).trim();
        let video_id = VideoId::parse(raw_id).ok_or_else(|| CsvError::InvalidField {
            line: self.line,
            field: "videoId",
            value: raw_id.to_string(),
        })?;
        let start_sec = self.seconds(2, "start")?;
        let end_sec = self.seconds(3, "end")?;
        let rating = self
            .field(4)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r >= 1.0)
            .map_or_else(Rating::default, |r| Rating::new(r.min(255.0) as u8));

        Ok(Segment {
            video_id,
            title: self.field(1).to_string(),
            start_sec,
            end_sec,
            rating,
            article: self.field(5).to_string(),
        })
    }
}

fn parse_records(text: &str) -> Result<Vec<Record>, CsvError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted_any = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    let mut finish = |fields: &mut Vec<String>, quoted_any: bool, record_line: usize| {
        let blank = !quoted_any && fields.len() == 1 && fields[0].trim().is_empty();
        if !blank {
            records.push(Record {
                line: record_line,
                fields: std::mem::take(fields),
            });
        }
        fields.clear();
    };

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quoted_any = true;
                quote_line = line;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                finish(&mut fields, quoted_any, record_line);
                quoted_any = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: quote_line });
    }

    if !field.is_empty() || !fields.is_empty() || quoted_any {
        fields.push(field);
        finish(&mut fields, quoted_any, record_line);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: &str, title: &str, start: u32, end: u32) -> Segment {
        Segment::new(VideoId::parse(id).unwrap(), title, start, end)
    }

    #[test]
    fn export_quotes_only_when_needed() {
        let segments = vec![
            segment("dQw4w9WgXcQ", "Plain", 0, 60).with_rating(5),
            segment("kJQP7kiw5Fk", "Comma, \"quoted\"", 30, 90).with_article("line1\nline2"),
        ];
        let csv = playlist_to_csv(&segments);
        assert_eq!(
            csv,
            "videoId,title,start,end,rating,article\n\
             dQw4w9WgXcQ,Plain,0,60,5,\n\
             kJQP7kiw5Fk,\"Comma, \"\"quoted\"\"\",30,90,1,\"line1\nline2\""
        );
    }

    #[test]
    fn import_round_trips_export() {
        let segments = vec![
            segment("dQw4w9WgXcQ", "A, B", 0, 60).with_rating(6),
            segment("kJQP7kiw5Fk", "\"Q\"", 30, 30).with_article("multi\r\nline"),
            segment("fJ9rUzIMcZQ", "", 60, 0),
        ];
        let parsed = csv_to_playlist(&playlist_to_csv(&segments)).unwrap();
        assert_eq!(parsed, segments);
    }

    #[test]
    fn import_is_lenient_about_numbers_and_blank_lines() {
        let text = "VideoID,title,start,end,rating,article\r\n\
                    \r\n\
                    dQw4w9WgXcQ,Song,12.9,61.2,x\r\n\
                    kJQP7kiw5Fk,Other\n";
        let parsed = csv_to_playlist(text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].start_sec, 12);
        assert_eq!(parsed[0].end_sec, 61);
        assert_eq!(parsed[0].rating.stars(), 1);
        assert_eq!(parsed[0].article, "");
        assert_eq!(parsed[1].start_sec, 0);
        assert_eq!(parsed[1].end_sec, 0);
    }

    #[test]
    fn missing_header_rejected() {
        assert_eq!(csv_to_playlist(""), Err(CsvError::MissingHeader));
        assert_eq!(
            csv_to_playlist("title,start\nfoo,1"),
            Err(CsvError::MissingHeader)
        );
    }

    #[test]
    fn unterminated_quote_rejected() {
        let text = "videoId,title\ndQw4w9WgXcQ,\"never closed";
        assert_eq!(
            csv_to_playlist(text),
            Err(CsvError::UnterminatedQuote { line: 2 })
        );
    }

    #[test]
    fn bad_rows_report_line() {
        let text = "videoId,title,start\ndQw4w9WgXcQ,ok,1\nbad,oops,2";
        assert!(matches!(
            csv_to_playlist(text),
            Err(CsvError::InvalidField { line: 3, field: "videoId", .. })
        ));

        let text = "videoId,title,start\ndQw4w9WgXcQ,ok,soon";
        assert!(matches!(
            csv_to_playlist(text),
            Err(CsvError::InvalidField { line: 2, field: "start", .. })
        ));
    }
}

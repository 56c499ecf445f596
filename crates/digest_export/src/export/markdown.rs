use crate::Content;

/// Renders the fixed-section Markdown document: `TLTR`, `Detailed summary`,
/// a collapsible `Full transcript`, and a `Timestamped transcript` when the
/// segments carry timing information.
pub fn to_markdown(content: &Content) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", content.title));
    md.push_str(&format!("Source: {}\n\n", content.url));

    md.push_str("## TLTR\n\n");
    md.push_str(content.summary.tldr.trim());
    md.push_str("\n\n");

    md.push_str("## Detailed summary\n\n");
    md.push_str(content.summary.detailed.trim());
    md.push_str("\n\n");

    md.push_str("## Full transcript\n\n");
    md.push_str("<details>\n<summary>Show transcript</summary>\n\n");
    md.push_str(content.transcript.trim());
    md.push_str("\n\n</details>\n");

    if !content.segments.is_empty() {
        md.push_str("\n## Timestamped transcript\n\n");
        md.push_str("<details>\n<summary>Show timestamped transcript</summary>\n\n");
        for seg in &content.segments {
            let speaker = seg
                .speaker
                .as_deref()
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            md.push_str(&format!(
                "**{}{}:** {}\n",
                format_timestamp(seg.start),
                speaker,
                seg.text.trim()
            ));
        }
        md.push_str("\n</details>\n");
    }

    md
}

/// `MM:SS.ss` stamp, minutes not wrapped at the hour
pub fn format_timestamp(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    format!("{minutes:02}:{:05.2}", seconds % 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Segment, Summary};

    #[test]
    fn timestamps_are_minute_second_stamps() {
        assert_eq!(format_timestamp(0.0), "00:00.00");
        assert_eq!(format_timestamp(65.5), "01:05.50");
        assert_eq!(format_timestamp(3725.25), "62:05.25");
    }

    #[test]
    fn markdown_has_fixed_sections() {
        let mut segments = vec![Segment::new(0.0, 2.0, "Hello"), Segment::new(2.0, 4.0, "World")];
        segments[0].speaker = Some("SPEAKER_01".into());
        let content = Content::assemble(
            "Title",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            Summary {
                tldr: "Short.".into(),
                detailed: "Long.".into(),
            },
            segments,
        );

        let md = to_markdown(&content);
        assert!(md.starts_with("# Title\n"));
        assert!(md.contains("Source: https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(md.contains("## TLTR"));
        assert!(md.contains("## Detailed summary"));
        assert!(md.contains("## Full transcript"));
        assert!(md.contains("## Timestamped transcript"));
        assert!(md.contains("**00:00.00 [SPEAKER_01]:** Hello"));
        assert!(md.contains("**00:02.00:** World"));
    }

    #[test]
    fn timestamped_section_omitted_without_segments() {
        let content = Content::assemble(
            "Title",
            "https://example.invalid",
            Summary {
                tldr: "t".into(),
                detailed: "d".into(),
            },
            vec![],
        );
        assert!(!to_markdown(&content).contains("Timestamped transcript"));
    }
}

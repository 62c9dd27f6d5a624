use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `s` to at most `max_width` terminal columns, ending in an ellipsis when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Command-line record as one display line: NUL separators become spaces.
pub fn display_command(raw: &str, max_width: usize) -> String {
    let joined = raw.trim_end_matches('\0').replace('\0', " ");
    truncate_to_width(&joined, max_width)
}

/// `HH:MM:SS`; hours keep growing past 99.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn format_percent(ratio: f32) -> String {
    format!("{:.1}%", ratio * 100.0)
}

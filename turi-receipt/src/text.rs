//! Text metrics for the built-in sans font
//!
//! Widths are estimated from an average glyph advance of half an em, which
//! is close enough for Helvetica-like faces and keeps layout independent of
//! any font file.

/// Points to millimetres
pub const PT_TO_MM: f64 = 0.352778;

/// Average glyph advance, in ems
const AVG_ADVANCE_EM: f64 = 0.5;

/// Baseline-to-baseline distance, in font sizes
const LINE_SPACING: f64 = 1.15;

const ELLIPSIS: char = '…';

/// Estimated width of `text` at `size` points, in mm
pub fn text_width(text: &str, size: f64) -> f64 {
    char_width(size) * text.chars().count() as f64
}

/// Line height at `size` points, in mm
pub fn line_height(size: f64) -> f64 {
    size * PT_TO_MM * LINE_SPACING
}

fn char_width(size: f64) -> f64 {
    size * PT_TO_MM * AVG_ADVANCE_EM
}

/// How many characters fit in `max_width` (always at least one)
fn chars_per_line(max_width: f64, size: f64) -> usize {
    ((max_width / char_width(size)).floor() as usize).max(1)
}

/// Truncate to `max_width`, marking the cut with an ellipsis
pub fn truncate(text: &str, max_width: f64, size: f64) -> String {
    let limit = chars_per_line(max_width, size);
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Greedy word wrap to `max_width`
///
/// Words longer than a line are split. Always returns at least one line.
pub fn wrap(text: &str, max_width: f64, size: f64) -> Vec<String> {
    let limit = chars_per_line(max_width, size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Hard-split words that can never fit
        while word.len() > limit {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(limit);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > limit && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Keep at most `max_lines`, ellipsizing the last kept line
pub fn clamp_lines(mut lines: Vec<String>, max_lines: usize, max_width: f64, size: f64) -> Vec<String> {
    let max_lines = max_lines.max(1);
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let limit = chars_per_line(max_width, size);
        let mut kept: String = last.chars().take(limit.saturating_sub(1)).collect();
        kept.push(ELLIPSIS);
        *last = kept;
    }
    lines
}

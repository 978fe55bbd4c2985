//! Width-heuristic text wrapping for the reveal face.

use crate::font::FaceFont;

/// Safety margin against proportional-font width variance: the character
/// budget derived from the average glyph width is scaled down by this
/// factor before wrapping.
const WIDTH_SAFETY: f32 = 0.85;

/// Never wrap below this many characters per line.
const MIN_CHARS_PER_LINE: usize = 10;

/// Fit a string into `max_width` pixels, wrapping onto multiple lines
/// (joined with `\n`) when the single-line measurement overflows.
///
/// The wrap estimates an average glyph width from the whole-string
/// measurement and word-wraps greedily to the resulting character budget.
/// This is a heuristic, not a per-line measured guarantee: a pathological
/// run of wide glyphs can still overflow and will clip cosmetically.
pub fn fit_text(text: &str, font: &FaceFont, px: f32, max_width: f32) -> String {
    let width = font.measure_width(text, px);
    if width <= max_width {
        return text.to_string();
    }

    let char_count = text.chars().count();
    if char_count == 0 {
        return text.to_string();
    }

    let avg_char_width = width / char_count as f32;
    let budget = ((max_width / avg_char_width * WIDTH_SAFETY) as usize).max(MIN_CHARS_PER_LINE);
    wrap_words(text, budget).join("\n")
}

/// Greedy word wrap at whitespace boundaries. Words longer than the budget
/// are broken at the budget.
fn wrap_words(text: &str, budget: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut push_current = |current: &mut String, lines: &mut Vec<String>| {
        if !current.is_empty() {
            lines.push(std::mem::take(current));
        }
    };

    for word in text.split_whitespace() {
        let mut word = word;

        // Break over-long words into budget-sized chunks
        while word.chars().count() > budget {
            push_current(&mut current, &mut lines);
            let split_at = word
                .char_indices()
                .nth(budget)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > budget {
            push_current(&mut current, &mut lines);
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    push_current(&mut current, &mut lines);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FaceFont;

    #[test]
    fn short_text_is_unchanged() {
        let font = FaceFont::Builtin;
        // 5 chars at px 8 measure 30 px, far under the limit
        assert_eq!(fit_text("AAAAA", &font, 8.0, 1000.0), "AAAAA");
    }

    #[test]
    fn long_text_wraps_within_budget() {
        let font = FaceFont::Builtin;
        let text = "WORD ".repeat(40);
        let text = text.trim();

        // 200 chars at px 8 measure 1200 px; budget = 100/6 * 0.85 = 14
        let fitted = fit_text(text, &font, 8.0, 100.0);
        assert!(fitted.contains('\n'));
        for line in fitted.split('\n') {
            assert!(line.chars().count() <= 14, "line too long: {line:?}");
        }
    }

    #[test]
    fn budget_floors_at_ten_chars() {
        let font = FaceFont::Builtin;
        // Absurdly narrow limit would give a budget below 10
        let fitted = fit_text("AA BB CC DD EE FF", &font, 8.0, 12.0);
        for line in fitted.split('\n') {
            assert!(line.chars().count() <= 10);
        }
        // 10-char budget packs "AA BB CC" style groups rather than one
        // word per line
        assert!(fitted.split('\n').next().unwrap().chars().count() > 2);
    }

    #[test]
    fn overlong_word_is_broken() {
        let lines = wrap_words("ABCDEFGHIJKLMNOPQRSTUVWXYZ", 10);
        assert_eq!(lines, vec!["ABCDEFGHIJ", "KLMNOPQRST", "UVWXYZ"]);
    }

    #[test]
    fn wrap_collapses_whitespace() {
        let lines = wrap_words("A   B\t\tC", 20);
        assert_eq!(lines, vec!["A B C"]);
    }

    #[test]
    fn empty_text_is_unchanged() {
        let font = FaceFont::Builtin;
        assert_eq!(fit_text("", &font, 8.0, 10.0), "");
    }
}

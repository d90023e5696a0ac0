//! Reflow of post text into fixed-size screen chunks.
//!
//! Lines are closed on `\n` or when the next character would overflow the
//! configured width. Every closed line gets a [`LineRole`] from
//! [`classify_line`], and lines are grouped into chunks of at most `height`
//! lines. Each post starts a fresh chunk.

use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

/// Lines starting with this token are signature/attribution lines.
pub const ATTRIBUTION_MARKER: &str = "※";
/// Opening bracket of a quote header such as `【 在 x 的大作中提到: 】`.
pub const QUOTE_HEADER_CHAR: char = '【';
/// Leading character of quoted lines.
pub const QUOTE_CHAR: char = ':';

pub const MIN_WIDTH: usize = 2;
pub const MIN_HEIGHT: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    Body,
    BodyContinuation,
    QuoteHeader,
    Quote,
    QuoteContinuation,
    Attribution,
}

impl LineRole {
    pub fn is_quote(self) -> bool {
        matches!(self, LineRole::Quote | LineRole::QuoteContinuation)
    }
}

/// Role of a closed line, from its leading content and the previous line's
/// role. First matching rule wins; nothing looks ahead.
pub fn classify_line(line: &str, overflowed: bool, previous: Option<LineRole>) -> LineRole {
    if line.starts_with(ATTRIBUTION_MARKER) {
        LineRole::Attribution
    } else if line.starts_with(QUOTE_HEADER_CHAR) {
        LineRole::QuoteHeader
    } else if line.starts_with(QUOTE_CHAR) {
        LineRole::Quote
    } else if overflowed && previous.is_some_and(LineRole::is_quote) {
        LineRole::QuoteContinuation
    } else if overflowed {
        LineRole::BodyContinuation
    } else {
        LineRole::Body
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub role: LineRole,
    pub text: String,
    /// Wrapped remainder of the line before it.
    pub continued: bool,
}

/// One screen's worth of laid-out lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenChunk {
    pub lines: Vec<ScreenLine>,
}

impl ScreenChunk {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Display width of a single character, in terminal cells.
pub trait CharWidth {
    fn char_width(&self, c: char) -> usize;

    fn str_width(&self, s: &str) -> usize {
        s.chars().map(|c| self.char_width(c)).sum()
    }
}

/// Which [`CharWidth`] rule to use.
///
/// `Ascii` charges two cells for every code point above 127, which is what
/// the forum's CJK-heavy content was laid out with. `Unicode` uses East
/// Asian width tables instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthRule {
    #[default]
    Ascii,
    Unicode,
}

impl CharWidth for WidthRule {
    fn char_width(&self, c: char) -> usize {
        match self {
            WidthRule::Ascii => {
                if (c as u32) > 127 {
                    2
                } else {
                    1
                }
            }
            WidthRule::Unicode => c.width().unwrap_or(0),
        }
    }
}

pub struct LayoutEngine<W = WidthRule> {
    width: usize,
    height: usize,
    measure: W,
}

impl<W: CharWidth> LayoutEngine<W> {
    /// Width is clamped to at least two cells so any character fits on an
    /// empty line.
    pub fn new(width: usize, height: usize, measure: W) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            measure,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn measure(&self) -> &W {
        &self.measure
    }

    /// Reflow one post into classified lines.
    pub fn lines(&self, text: &str) -> Vec<ScreenLine> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut used = 0;
        let mut overflowed = false;
        let mut previous = None;

        let mut close = |current: &mut String, overflowed: bool| {
            let role = classify_line(current, overflowed, previous);
            previous = Some(role);
            lines.push(ScreenLine {
                role,
                text: std::mem::take(current),
                continued: overflowed,
            });
        };

        for c in text.chars() {
            match c {
                '\r' => {}
                '\n' => {
                    close(&mut current, overflowed);
                    overflowed = false;
                    used = 0;
                }
                _ => {
                    let c = if c == '\t' { ' ' } else { c };
                    let w = self.measure.char_width(c);
                    if used + w > self.width {
                        close(&mut current, overflowed);
                        overflowed = true;
                        used = 0;
                    }
                    current.push(c);
                    used += w;
                }
            }
        }

        if !current.is_empty() {
            close(&mut current, overflowed);
        }

        lines
    }

    /// Reflow one post into chunks of at most `height` lines.
    pub fn layout_item(&self, text: &str) -> Vec<ScreenChunk> {
        self.lines(text)
            .chunks(self.height)
            .map(|lines| ScreenChunk {
                lines: lines.to_vec(),
            })
            .collect()
    }

    /// Lay out several posts; no chunk mixes lines of two posts.
    pub fn layout_items<I, S>(&self, texts: I) -> Vec<ScreenChunk>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.layout_item(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: usize, height: usize) -> LayoutEngine {
        LayoutEngine::new(width, height, WidthRule::Ascii)
    }

    fn texts(lines: &[ScreenLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn roles(lines: &[ScreenLine]) -> Vec<LineRole> {
        lines.iter().map(|l| l.role).collect()
    }

    #[test]
    fn test_classify_rules() {
        assert_eq!(classify_line("※ 来源:·水木社区", false, None), LineRole::Attribution);
        assert_eq!(
            classify_line("【 在 a 的大作中提到: 】", false, None),
            LineRole::QuoteHeader
        );
        assert_eq!(classify_line(": quoted", false, None), LineRole::Quote);
        assert_eq!(
            classify_line("more", true, Some(LineRole::Quote)),
            LineRole::QuoteContinuation
        );
        assert_eq!(
            classify_line("more", true, Some(LineRole::QuoteContinuation)),
            LineRole::QuoteContinuation
        );
        assert_eq!(
            classify_line("more", true, Some(LineRole::Body)),
            LineRole::BodyContinuation
        );
        assert_eq!(classify_line("plain", false, Some(LineRole::Quote)), LineRole::Body);
    }

    #[test]
    fn test_wrapped_fragments_are_marked_continued() {
        let lines = engine(4, 10).lines(":abcdefg\nhi");
        assert_eq!(texts(&lines), vec![":abc", "defg", "hi"]);
        let continued: Vec<bool> = lines.iter().map(|l| l.continued).collect();
        assert_eq!(continued, vec![false, true, false]);
    }

    #[test]
    fn test_quote_header_ignores_previous_role() {
        for previous in [
            None,
            Some(LineRole::Quote),
            Some(LineRole::QuoteContinuation),
            Some(LineRole::Attribution),
        ] {
            assert_eq!(classify_line("【x", true, previous), LineRole::QuoteHeader);
            assert_eq!(classify_line("【x", false, previous), LineRole::QuoteHeader);
        }
    }

    #[test]
    fn test_wraps_on_width() {
        let lines = engine(4, 10).lines("abcdefghij");
        assert_eq!(texts(&lines), vec!["abcd", "efgh", "ij"]);
        assert_eq!(
            roles(&lines),
            vec![LineRole::Body, LineRole::BodyContinuation, LineRole::BodyContinuation]
        );
    }

    #[test]
    fn test_wide_chars_cost_two_cells() {
        let lines = engine(5, 10).lines("水木社区");
        assert_eq!(texts(&lines), vec!["水木", "社区"]);
    }

    #[test]
    fn test_quote_continuation_after_overflow() {
        let lines = engine(6, 10).lines(": abcdefgh\nnext");
        assert_eq!(texts(&lines), vec![": abcd", "efgh", "next"]);
        assert_eq!(
            roles(&lines),
            vec![LineRole::Quote, LineRole::QuoteContinuation, LineRole::Body]
        );
    }

    #[test]
    fn test_newline_at_exact_width_is_not_continuation() {
        let lines = engine(3, 10).lines("abc\ndef");
        assert_eq!(texts(&lines), vec!["abc", "def"]);
        assert_eq!(roles(&lines), vec![LineRole::Body, LineRole::Body]);
    }

    #[test]
    fn test_blank_lines_and_carriage_returns() {
        let lines = engine(10, 10).lines("a\r\n\r\nb\n");
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn test_tabs_become_spaces() {
        let lines = engine(10, 10).lines("a\tb");
        assert_eq!(texts(&lines), vec!["a b"]);
    }

    #[test]
    fn test_chunks_flush_at_height() {
        let chunks = engine(10, 2).layout_item("1\n2\n3\n4\n5");
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 2);
        assert_eq!(chunks[2].len(), 1);
    }

    #[test]
    fn test_each_item_starts_fresh_chunk() {
        let chunks = engine(10, 5).layout_items(["a\nb", "c"]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(texts(&chunks[0].lines), vec!["a", "b"]);
        assert_eq!(texts(&chunks[1].lines), vec!["c"]);
    }

    #[test]
    fn test_empty_item_has_no_chunks() {
        assert!(engine(10, 5).layout_item("").is_empty());
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let engine = engine(0, 0);
        assert_eq!(engine.width(), MIN_WIDTH);
        assert_eq!(engine.height(), MIN_HEIGHT);
        let lines = engine.lines("水a");
        assert_eq!(texts(&lines), vec!["水", "a"]);
    }

    #[test]
    fn test_unicode_width_rule() {
        let engine = LayoutEngine::new(4, 10, WidthRule::Unicode);
        assert_eq!(engine.measure().str_width("é水"), 3);
        let lines = engine.lines("éééé水");
        assert_eq!(texts(&lines), vec!["éééé", "水"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lines_fit_width_and_chunks_fit_height(
                text in "[a-z水木: 【※\n\t]{0,300}",
                width in 0..60usize,
                height in 0..30usize,
            ) {
                let engine = engine(width, height);
                for chunk in engine.layout_item(&text) {
                    prop_assert!(chunk.len() <= engine.height());
                    prop_assert!(!chunk.is_empty());
                    for line in &chunk.lines {
                        prop_assert!(engine.measure().str_width(&line.text) <= engine.width());
                    }
                }
            }

            #[test]
            fn reflow_keeps_every_visible_char(text in "[a-z水 ]{0,200}", width in 2..40usize) {
                let joined: String = engine(width, 10)
                    .lines(&text)
                    .into_iter()
                    .map(|l| l.text)
                    .collect();
                prop_assert_eq!(joined, text);
            }
        }
    }
}

//! Tag stripping, entity decoding and line-break normalization for the
//! HTML fragments the extractors cut out of forum pages.
//!
//! The extractors run [`decode_entities`] and [`normalize_breaks`] first and
//! [`strip_tags`] last, so `<br>` survives as a logical newline.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Substituted for numeric entities that do not name a valid code point.
pub const PLACEHOLDER_CHAR: char = '?';

static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);")
        .expect("Invalid entity regex pattern")
});

static BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex pattern"));

/// Remove every `<...>` span.
///
/// Each span runs from a `<` to the nearest following `>`. An unterminated
/// `<` stops stripping and the remainder is kept verbatim, which makes the
/// function idempotent.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Decode named and numeric character references in a single pass.
pub fn decode_entities(html: &str) -> String {
    ENTITY_RE
        .replace_all(html, |caps: &Captures| decode_entity(&caps[0], &caps[1]))
        .into_owned()
}

fn decode_entity(whole: &str, body: &str) -> String {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .filter(|c| *c != '\0')
            .unwrap_or(PLACEHOLDER_CHAR)
            .to_string();
    }

    match body {
        "nbsp" => " ".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        _ => decode_html_entities(whole).into_owned(),
    }
}

/// Turn `<br>`, `<br/>` and `<br />` into `\n`.
pub fn normalize_breaks(html: &str) -> String {
    BREAK_RE.replace_all(html, "\n").into_owned()
}

/// Decode and strip in the order the extractors rely on.
pub fn to_plain_text(html: &str) -> String {
    strip_tags(&normalize_breaks(&decode_entities(html)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_simple_tags() {
        assert_eq!(strip_tags("<b>bold</b> text"), "bold text");
        assert_eq!(
            strip_tags(r#"<a href="/board/Python">Python</a>"#),
            "Python"
        );
    }

    #[test]
    fn test_strip_unterminated_tag_keeps_remainder() {
        assert_eq!(strip_tags("abc <def"), "abc <def");
        assert_eq!(strip_tags("<i>x</i> < y"), "x < y");
    }

    #[test]
    fn test_strip_shortest_span() {
        assert_eq!(strip_tags("a<b<c>d>e"), "ad>e");
    }

    #[test]
    fn test_decode_fixed_table() {
        assert_eq!(
            decode_entities("&lt;b&gt;&amp;&quot;x&quot;&amp;&lt;/b&gt;"),
            "<b>&\"x\"&</b>"
        );
        assert_eq!(decode_entities("a&nbsp;b&apos;"), "a b'");
    }

    #[test]
    fn test_decode_numeric() {
        assert_eq!(decode_entities("&#27700;&#26408;"), "水木");
        assert_eq!(decode_entities("&#x6C34;"), "水");
        assert_eq!(decode_entities("&#65;BC"), "ABC");
    }

    #[test]
    fn test_decode_invalid_numeric_uses_placeholder() {
        assert_eq!(decode_entities("&#55296;"), "?");
        assert_eq!(decode_entities("&#99999999999;"), "?");
        assert_eq!(decode_entities("x&#0;y"), "x?y");
    }

    #[test]
    fn test_decode_is_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&#38;amp;"), "&amp;");
    }

    #[test]
    fn test_decode_unknown_named_entity() {
        assert_eq!(decode_entities("&hellip;"), "…");
        assert_eq!(decode_entities("&notanentity;"), "&notanentity;");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }

    #[test]
    fn test_normalize_breaks() {
        assert_eq!(normalize_breaks("a<br>b<br/>c<br />d<BR>e"), "a\nb\nc\nd\ne");
        assert_eq!(normalize_breaks("<bra>"), "<bra>");
    }

    #[test]
    fn test_to_plain_text_keeps_breaks() {
        assert_eq!(
            to_plain_text("<p>line&nbsp;1<br/>line 2</p>"),
            "line 1\nline 2"
        );
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn strip_tags_is_idempotent(input in "[a-z<>/ =\"]{0,64}") {
                let once = strip_tags(&input);
                prop_assert_eq!(strip_tags(&once), once);
            }

            #[test]
            fn strip_tags_leaves_no_closed_span(input in ".{0,64}") {
                let out = strip_tags(&input);
                if let Some(open) = out.find('<') {
                    prop_assert!(!out[open..].contains('>'));
                }
            }
        }
    }
}

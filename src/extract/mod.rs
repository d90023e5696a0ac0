//! Page extraction keyed to the forum's fixed markup.
//!
//! Each page category has its own rule set behind [`Extractor`]. None of
//! them is a general HTML parser: they search for literal container markers
//! and fall back to default values whenever a marker is missing.

pub mod article;
pub mod board;
pub mod section;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Page, PageKind};
use crate::markup;

pub use article::{get_article_page, ArticleExtractor};
pub use board::{get_board_page, BoardExtractor};
pub use section::{get_section_page, SectionExtractor};

/// List container of section and hot pages.
pub const SECTION_LIST_MARKER: &str = r#"<ul class="slist sec">"#;
/// List container of board and article pages.
pub const ITEM_LIST_MARKER: &str = r#"<ul class="list sec">"#;

const LIST_END: &str = "</ul>";
const ITEM_START: &str = "<li";

static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)^<li class="f">(.*?)</li>"#).expect("Invalid label regex pattern")
});

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div class="menu sp">(.*?)</div>"#).expect("Invalid header regex pattern")
});

static PAGE_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a class="plant">\s*(\d+)\s*/\s*(\d+)\s*</a>"#)
        .expect("Invalid page counter regex pattern")
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a\s[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#)
        .expect("Invalid link regex pattern")
});

/// Extraction rule for one page category.
pub trait Extractor: Send + Sync {
    fn kind(&self) -> PageKind;

    /// Never fails: missing markup yields default fields.
    fn extract(&self, html: &str) -> Page;
}

static SECTION: SectionExtractor = SectionExtractor;
static BOARD: BoardExtractor = BoardExtractor;
static ARTICLE: ArticleExtractor = ArticleExtractor;

pub fn extractor_for(kind: PageKind) -> &'static dyn Extractor {
    match kind {
        PageKind::Section => &SECTION,
        PageKind::Board => &BOARD,
        PageKind::Article => &ARTICLE,
    }
}

/// Extract `html` with the rule matching `url`'s category.
pub fn extract_for_url(url: &str, html: &str) -> Page {
    let extractor = extractor_for(PageKind::from_url(url));
    let page = extractor.extract(html);
    tracing::debug!(
        "Extracted {} page with {} items from {}",
        extractor.kind().label(),
        page.item_count(),
        url
    );
    page
}

/// Inner HTML of the list opened by `marker`, up to its `</ul>`.
pub(crate) fn container<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    let start = html.find(marker)? + marker.len();
    let end = html[start..]
        .find(LIST_END)
        .map_or(html.len(), |e| start + e);
    Some(&html[start..end])
}

/// Split a list body into `<li ...` fragments, in source order.
pub(crate) fn split_items(list: &str) -> Vec<&str> {
    let starts: Vec<usize> = list.match_indices(ITEM_START).map(|(i, _)| i).collect();
    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(list.len());
            &list[start..end]
        })
        .collect()
}

/// Text of a label-only fragment (`<li class="f">label</li>`).
pub(crate) fn label_only(fragment: &str) -> Option<String> {
    LABEL_RE
        .captures(fragment)
        .map(|caps| plain(&caps[1]))
}

/// Text of the page header block.
pub(crate) fn header_name(html: &str) -> Option<String> {
    HEADER_RE
        .captures(html)
        .map(|caps| plain(&caps[1]))
        .filter(|name| !name.is_empty())
}

/// `(page_index, page_count)` from the page counter, clamped so that
/// `1 <= page_index <= page_count`. Unparseable digits yield `None`.
pub(crate) fn page_pair(html: &str) -> Option<(usize, usize)> {
    let caps = PAGE_PAIR_RE.captures(html)?;
    let index = caps[1].parse::<usize>().ok()?;
    let count = caps[2].parse::<usize>().ok()?.max(1);
    Some((index.clamp(1, count), count))
}

/// `(href, inner html)` of the first link in a fragment.
pub(crate) fn first_link(fragment: &str) -> Option<(String, String)> {
    LINK_RE.captures(fragment).map(|caps| {
        (
            markup::decode_entities(&caps[1]),
            caps[2].to_string(),
        )
    })
}

/// Decoded, stripped and trimmed text of an inline fragment.
pub(crate) fn plain(html: &str) -> String {
    markup::to_plain_text(html).trim().to_string()
}

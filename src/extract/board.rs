use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::{BoardItem, BoardPage, Page, PageKind};
use crate::extract::{
    container, first_link, header_name, label_only, page_pair, plain, split_items, Extractor,
    ITEM_LIST_MARKER,
};

/// Class attribute that marks a pinned thread.
pub const PINNED_MARKER: &str = r#"<li class="top""#;

/// Author strings the server substitutes for removed posts.
pub const DELETED_AUTHOR_PLACEHOLDERS: &[&str] = &["原帖已删除", "已删除"];

/// Shown instead of any deleted-post placeholder.
pub const DELETED_AUTHOR_TOKEN: &str = "[deleted]";

const DATE: &str = r"(\d{4}-\d{2}-\d{2})";
const TIME: &str = r"(\d{2}:\d{2}:\d{2})";
const PERSON: &str = r"(?:<a[^>]*>)?([^<|]*?)(?:</a>)?";

fn meta_pattern(first: &str, second: &str) -> Regex {
    let pattern = format!(
        r"{first}(?:&nbsp;|\s)*{PERSON}\|{second}(?:&nbsp;|\s)*{PERSON}(?:<|$)"
    );
    Regex::new(&pattern).expect("Invalid board meta regex pattern")
}

/// Author/replier patterns, tried in order; the first match wins.
static META_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        meta_pattern(DATE, DATE),
        meta_pattern(TIME, TIME),
        meta_pattern(DATE, TIME),
    ]
});

pub struct BoardExtractor;

impl Extractor for BoardExtractor {
    fn kind(&self) -> PageKind {
        PageKind::Board
    }

    fn extract(&self, html: &str) -> Page {
        Page::Board(get_board_page(html))
    }
}

/// Extract a board's thread listing.
pub fn get_board_page(html: &str) -> BoardPage {
    let mut page = BoardPage::default();

    let Some(list) = container(html, ITEM_LIST_MARKER) else {
        tracing::debug!("Board list container not found");
        return page;
    };

    if let Some(name) = header_name(html) {
        let (local, foreign) = split_bilingual(&name);
        page.name_local = local;
        page.name_foreign = foreign;
    }

    if let Some((index, count)) = page_pair(html) {
        page.page_index = index;
        page.page_count = count;
    }

    for fragment in split_items(list) {
        if label_only(fragment).is_some() {
            continue;
        }

        let Some((url, title)) = first_link(fragment) else {
            tracing::debug!("Skipping board fragment without a link");
            continue;
        };

        let mut item = BoardItem {
            is_pinned: fragment.starts_with(PINNED_MARKER),
            url,
            title: plain(&title),
            ..Default::default()
        };

        match match_meta(fragment) {
            Some(caps) => {
                item.author_time = caps[1].to_string();
                item.author = normalize_author(&caps[2]);
                item.reply_time = caps[3].to_string();
                item.last_replier = normalize_author(&caps[4]);
            }
            None => tracing::debug!("No author/replier pattern matched for {}", item.url),
        }

        page.items.push(item);
    }

    page
}

fn match_meta(fragment: &str) -> Option<Captures<'_>> {
    META_PATTERNS.iter().find_map(|re| re.captures(fragment))
}

fn normalize_author(raw: &str) -> String {
    let author = plain(raw);
    if DELETED_AUTHOR_PLACEHOLDERS.contains(&author.as_str()) {
        DELETED_AUTHOR_TOKEN.to_string()
    } else {
        author
    }
}

/// Split `本地名(Foreign)` into its two halves.
fn split_bilingual(name: &str) -> (String, String) {
    if let Some(stripped) = name.strip_suffix(')') {
        if let Some(open) = stripped.rfind('(') {
            return (
                stripped[..open].trim().to_string(),
                stripped[open + 1..].trim().to_string(),
            );
        }
    }
    (name.to_string(), String::new())
}

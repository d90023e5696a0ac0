use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ArticleItem, ArticlePage, Page, PageKind};
use crate::extract::{
    container, header_name, label_only, page_pair, plain, split_items, Extractor, ITEM_LIST_MARKER,
};
use crate::markup::{decode_entities, normalize_breaks, strip_tags};

const BODY_MARKER: &str = r#"<div class="sp">"#;
const BLOCK_END: &str = "</div>";

static AUTHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<div class="nav hl">\s*<div>(.*?)</div>"#)
        .expect("Invalid author line regex pattern")
});

/// Thumbnail sources end in `/middle`; the captured prefix is the full image.
static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"src=["']([^"']+?)/middle["']"#).expect("Invalid image regex pattern")
});

pub struct ArticleExtractor;

impl Extractor for ArticleExtractor {
    fn kind(&self) -> PageKind {
        PageKind::Article
    }

    fn extract(&self, html: &str) -> Page {
        Page::Article(get_article_page(html))
    }
}

/// Extract one page of a thread.
pub fn get_article_page(html: &str) -> ArticlePage {
    let mut page = ArticlePage::default();

    let Some(list) = container(html, ITEM_LIST_MARKER) else {
        tracing::debug!("Article list container not found");
        return page;
    };

    if let Some(name) = header_name(html) {
        page.board_name = name;
    }

    if let Some((index, count)) = page_pair(html) {
        page.page_index = index;
        page.page_count = count;
    }

    for fragment in split_items(list) {
        if let Some(label) = label_only(fragment) {
            page.name = label;
            continue;
        }

        let author = AUTHOR_RE
            .captures(fragment)
            .map(|caps| plain(&caps[1]));
        let body = body_block(fragment);

        if author.is_none() && body.is_none() {
            tracing::debug!("Skipping article fragment without author or body");
            continue;
        }

        page.items.push(ArticleItem {
            author: author.unwrap_or_default(),
            content: body.map(article_content).unwrap_or_default(),
        });
    }

    page
}

/// Inner HTML of the post body, up to the fragment's last `</div>`.
fn body_block(fragment: &str) -> Option<&str> {
    let start = fragment.find(BODY_MARKER)? + BODY_MARKER.len();
    let end = fragment[start..]
        .rfind(BLOCK_END)
        .map_or(fragment.len(), |e| start + e);
    Some(&fragment[start..end])
}

/// Plain post text with image URLs appended as trailing lines.
pub fn article_content(body: &str) -> String {
    let text = normalize_breaks(&decode_entities(body));

    let images: Vec<String> = IMAGE_RE
        .captures_iter(&text)
        .map(|caps| caps[1].to_string())
        .collect();
    let text = IMAGE_RE.replace_all(&text, "");

    let mut content = strip_tags(&text).trim().to_string();
    for url in images {
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(&url);
    }
    content
}

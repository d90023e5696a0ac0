use crate::domain::{Page, PageKind, SectionItem, SectionPage};
use crate::extract::{
    container, first_link, label_only, plain, split_items, Extractor, SECTION_LIST_MARKER,
};

pub struct SectionExtractor;

impl Extractor for SectionExtractor {
    fn kind(&self) -> PageKind {
        PageKind::Section
    }

    fn extract(&self, html: &str) -> Page {
        Page::Section(get_section_page(html))
    }
}

/// Extract a directory listing.
///
/// A label-only fragment names the page; every other fragment contributes
/// its first link.
pub fn get_section_page(html: &str) -> SectionPage {
    let mut page = SectionPage::default();

    let Some(list) = container(html, SECTION_LIST_MARKER) else {
        tracing::debug!("Section list container not found");
        return page;
    };

    for fragment in split_items(list) {
        if let Some(label) = label_only(fragment) {
            page.name = label;
            continue;
        }

        match first_link(fragment) {
            Some((url, title)) => page.items.push(SectionItem::new(url, plain(&title))),
            None => tracing::debug!("Skipping section fragment without a link"),
        }
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTION_SAMPLE: &str = r#"<html><body>
<div class="menu sp">水木社区</div>
<ul class="slist sec">
<li class="f">社区管理</li>
<li><a href="/section/1">站务&amp;公告</a></li>
<li><a href="/board/Python">Python<font color="red">(新)</font></a></li>
<li><div><a href="/article/Joke/100">今天&#x1F600;</a></div></li>
<li>no link here</li>
</ul>
</body></html>"#;

    #[test]
    fn test_parse_section() {
        let page = get_section_page(SECTION_SAMPLE);

        assert_eq!(page.name, "社区管理");
        assert_eq!(page.items.len(), 3);

        assert_eq!(page.items[0].kind, PageKind::Section);
        assert_eq!(page.items[0].url, "/section/1");
        assert_eq!(page.items[0].title, "站务&公告");

        assert_eq!(page.items[1].kind, PageKind::Board);
        assert_eq!(page.items[1].title, "Python(新)");

        assert_eq!(page.items[2].kind, PageKind::Article);
        assert_eq!(page.items[2].title, "今天😀");
    }

    #[test]
    fn test_missing_container_yields_empty_page() {
        let page = get_section_page("<html><ul><li><a href=\"/board/X\">X</a></li></ul></html>");
        assert!(page.name.is_empty());
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_extractor_trait() {
        let page = SectionExtractor.extract(SECTION_SAMPLE);
        assert_eq!(page.kind(), PageKind::Section);
        assert_eq!(page.item_count(), 3);
    }
}

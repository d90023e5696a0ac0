//! Pure screen production.
//!
//! A [`PageView`] owns the extracted page, the article layout and the index
//! of the screen being shown. [`PageView::screen`] turns that into styled
//! rows plus the link positions a painter needs; nothing here touches the
//! terminal.

use crate::domain::{ArticlePage, BoardPage, LinkPos, Page, PageKind, SectionPage};
use crate::layout::{CharWidth, LayoutEngine, LineRole, ScreenChunk, ScreenLine, WidthRule};

/// Rows taken by the page header.
pub const HEADER_ROWS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Title,
    Link,
    PinnedLink,
    Meta,
    Line(LineRole),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: RowStyle,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: RowStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub segments: Vec<Segment>,
}

impl Row {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A finished screen: rows from the top of the viewport and the links
/// painted on them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub rows: Vec<Row>,
    pub links: Vec<LinkPos>,
}

pub struct PageView {
    page: Page,
    chunks: Vec<ScreenChunk>,
    /// Per chunk: `(row in chunk, url)` of every link starting there.
    chunk_links: Vec<Vec<(usize, String)>>,
    screen_index: usize,
    width: usize,
    height: usize,
    rule: WidthRule,
}

impl PageView {
    pub fn new(page: Page, width: usize, height: usize, rule: WidthRule) -> Self {
        let mut view = Self {
            page,
            chunks: Vec::new(),
            chunk_links: Vec::new(),
            screen_index: 0,
            width,
            height,
            rule,
        };
        view.relayout();
        view
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn kind(&self) -> PageKind {
        self.page.kind()
    }

    pub fn chunks(&self) -> &[ScreenChunk] {
        &self.chunks
    }

    /// `(width, height, rule)` the page is laid out for.
    pub fn geometry(&self) -> (usize, usize, WidthRule) {
        (self.width, self.height, self.rule)
    }

    pub fn screen_index(&self) -> usize {
        self.screen_index
    }

    /// Rows available below the header.
    fn body_rows(&self) -> usize {
        self.height.saturating_sub(HEADER_ROWS).max(1)
    }

    pub fn screen_count(&self) -> usize {
        let units = match &self.page {
            Page::Section(section) => section.items.len().div_ceil(self.body_rows()),
            Page::Board(board) => board.items.len().div_ceil(self.body_rows()),
            Page::Article(_) => self.chunks.len(),
        };
        units.max(1)
    }

    pub fn next_screen(&mut self) -> bool {
        if self.screen_index + 1 < self.screen_count() {
            self.screen_index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_screen(&mut self) -> bool {
        if self.screen_index > 0 {
            self.screen_index -= 1;
            true
        } else {
            false
        }
    }

    /// Re-lay out for a new viewport, returning to the first screen.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.screen_index = 0;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.chunks.clear();
        self.chunk_links.clear();

        if let Page::Article(article) = &self.page {
            let engine = LayoutEngine::new(self.width, self.body_rows(), self.rule);
            for item in &article.items {
                let item_chunks = engine.layout_item(&item.layout_text());
                let lines: Vec<&ScreenLine> =
                    item_chunks.iter().flat_map(|chunk| &chunk.lines).collect();
                let links = link_lines(&lines);

                let mut start = 0;
                for chunk in item_chunks {
                    let rows = start..start + chunk.len();
                    self.chunk_links.push(
                        links
                            .iter()
                            .filter(|(line, _)| rows.contains(line))
                            .map(|(line, url)| (line - start, url.clone()))
                            .collect(),
                    );
                    start = rows.end;
                    self.chunks.push(chunk);
                }
            }
        }
        self.screen_index = self.screen_index.min(self.screen_count() - 1);
    }

    pub fn screen(&self) -> Screen {
        let mut screen = match &self.page {
            Page::Section(section) => self.section_screen(section),
            Page::Board(board) => self.board_screen(board),
            Page::Article(article) => self.article_screen(article),
        };
        for row in &mut screen.rows {
            fit_row(row, self.width, &self.rule);
        }
        screen.rows.truncate(self.height.max(1));
        let rows = screen.rows.len();
        screen.links.retain(|link| (link.y as usize) < rows);
        screen
    }

    fn visible<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = &'a T> {
        let per_screen = self.body_rows();
        items.iter().skip(self.screen_index * per_screen).take(per_screen)
    }

    fn header(&self, title: String) -> Row {
        let mut segments = vec![Segment::new(title, RowStyle::Title)];
        if let Some((index, count)) = self.page.pagination() {
            segments.push(Segment::new(format!("  [{}/{}]", index, count), RowStyle::Meta));
        }
        if self.screen_count() > 1 {
            segments.push(Segment::new(
                format!("  ({}/{})", self.screen_index + 1, self.screen_count()),
                RowStyle::Meta,
            ));
        }
        Row { segments }
    }

    fn section_screen(&self, section: &SectionPage) -> Screen {
        let mut screen = Screen {
            rows: vec![self.header(section.name.clone())],
            links: Vec::new(),
        };

        for item in self.visible(&section.items) {
            let marker = match item.kind {
                PageKind::Section => "+ ",
                PageKind::Board => "* ",
                PageKind::Article => "- ",
            };
            let y = screen.rows.len() as u16;
            screen
                .links
                .push(LinkPos::new(marker.len() as u16, y, item.url.clone()));
            screen.rows.push(Row {
                segments: vec![
                    Segment::new(marker, RowStyle::Meta),
                    Segment::new(item.title.clone(), RowStyle::Link),
                ],
            });
        }

        screen
    }

    fn board_screen(&self, board: &BoardPage) -> Screen {
        let mut screen = Screen {
            rows: vec![self.header(board.display_name())],
            links: Vec::new(),
        };

        for item in self.visible(&board.items) {
            let (marker, style) = if item.is_pinned {
                ("^ ", RowStyle::PinnedLink)
            } else {
                ("  ", RowStyle::Link)
            };
            let y = screen.rows.len() as u16;
            screen
                .links
                .push(LinkPos::new(marker.len() as u16, y, item.url.clone()));

            let mut segments = vec![
                Segment::new(marker, RowStyle::Meta),
                Segment::new(item.title.clone(), style),
            ];
            if !item.author.is_empty() || !item.last_replier.is_empty() {
                segments.push(Segment::new(
                    format!(
                        "  {} {} | {} {}",
                        item.author, item.author_time, item.last_replier, item.reply_time
                    ),
                    RowStyle::Meta,
                ));
            }
            screen.rows.push(Row { segments });
        }

        screen
    }

    fn article_screen(&self, article: &ArticlePage) -> Screen {
        let title = match (article.board_name.is_empty(), article.name.is_empty()) {
            (false, false) => format!("{} - {}", article.board_name, article.name),
            (false, true) => article.board_name.clone(),
            _ => article.name.clone(),
        };
        let mut screen = Screen {
            rows: vec![self.header(title)],
            links: Vec::new(),
        };

        let Some(chunk) = self.chunks.get(self.screen_index) else {
            return screen;
        };

        if let Some(links) = self.chunk_links.get(self.screen_index) {
            for (row, url) in links {
                screen
                    .links
                    .push(LinkPos::new(0, (HEADER_ROWS + row) as u16, url.clone()));
            }
        }

        for line in &chunk.lines {
            screen.rows.push(Row {
                segments: vec![Segment::new(line.text.clone(), RowStyle::Line(line.role))],
            });
        }

        screen
    }
}

/// `(line index, url)` of every URL line, with its wrapped fragments
/// joined back together.
fn link_lines(lines: &[&ScreenLine]) -> Vec<(usize, String)> {
    let mut links = Vec::new();
    for (start, line) in lines.iter().enumerate() {
        if line.continued {
            continue;
        }
        let joined: String = std::iter::once(*line)
            .chain(lines[start + 1..].iter().copied().take_while(|l| l.continued))
            .map(|l| l.text.as_str())
            .collect();
        if is_external_link(&joined) {
            links.push((start, joined.trim().to_string()));
        }
    }
    links
}

/// Image URLs appended to posts are the only links inside article text.
fn is_external_link(text: &str) -> bool {
    let text = text.trim();
    (text.starts_with("http://") || text.starts_with("https://")) && !text.contains(' ')
}

/// Cut a row so its display width stays within `width`.
fn fit_row(row: &mut Row, width: usize, measure: &impl CharWidth) {
    let mut used = 0;
    let mut keep = 0;
    for segment in &mut row.segments {
        let mut cut = None;
        for (idx, c) in segment.text.char_indices() {
            let w = measure.char_width(c);
            if used + w > width {
                cut = Some(idx);
                break;
            }
            used += w;
        }
        keep += 1;
        if let Some(idx) = cut {
            segment.text.truncate(idx);
            break;
        }
    }
    row.segments.truncate(keep);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleItem, BoardItem, SectionItem};

    fn board(n: usize) -> Page {
        Page::Board(BoardPage {
            name_local: "Python编程".into(),
            name_foreign: "Python".into(),
            page_index: 1,
            page_count: 3,
            items: (0..n)
                .map(|i| BoardItem {
                    is_pinned: i == 0,
                    url: format!("/article/Python/{}", i),
                    title: format!("thread {}", i),
                    author: "alice".into(),
                    author_time: "2017-05-01".into(),
                    last_replier: "bob".into(),
                    reply_time: "2017-05-02".into(),
                })
                .collect(),
        })
    }

    #[test]
    fn test_board_screen_links() {
        let view = PageView::new(board(2), 80, 24, WidthRule::Ascii);
        let screen = view.screen();

        assert_eq!(screen.rows.len(), 3);
        assert_eq!(screen.rows[0].text(), "Python编程(Python)  [1/3]");
        assert_eq!(screen.links.len(), 2);
        assert_eq!(screen.links[0], LinkPos::new(2, 1, "/article/Python/0"));
        assert_eq!(screen.links[1].y, 2);
        assert_eq!(screen.rows[1].segments[1].style, RowStyle::PinnedLink);
        assert_eq!(screen.rows[2].segments[1].style, RowStyle::Link);
        assert_eq!(
            screen.rows[2].text(),
            "  thread 1  alice 2017-05-01 | bob 2017-05-02"
        );
    }

    #[test]
    fn test_long_board_spans_screens() {
        let mut view = PageView::new(board(10), 80, 5, WidthRule::Ascii);
        assert_eq!(view.screen_count(), 3);

        assert!(view.next_screen());
        let screen = view.screen();
        assert_eq!(screen.links[0].url, "/article/Python/4");
        assert_eq!(screen.links[0].y, 1);

        assert!(view.next_screen());
        assert!(!view.next_screen());
        assert_eq!(view.screen().links.len(), 2);
        assert!(view.prev_screen());
        assert_eq!(view.screen_index(), 1);
    }

    #[test]
    fn test_section_screen() {
        let page = Page::Section(SectionPage {
            name: "社区管理".into(),
            items: vec![
                SectionItem::new("/section/1".into(), "站务".into()),
                SectionItem::new("/board/Python".into(), "Python".into()),
            ],
        });
        let screen = PageView::new(page, 80, 24, WidthRule::Ascii).screen();
        assert_eq!(screen.rows[1].text(), "+ 站务");
        assert_eq!(screen.rows[2].text(), "* Python");
        assert_eq!(screen.links[1], LinkPos::new(2, 2, "/board/Python"));
    }

    #[test]
    fn test_article_screen_uses_chunks() {
        let page = Page::Article(ArticlePage {
            board_name: "Python".into(),
            name: "主题:asyncio".into(),
            page_index: 2,
            page_count: 2,
            items: vec![
                ArticleItem {
                    author: "alice".into(),
                    content: "【 在 bob 的大作中提到: 】\n: hi\nhttps://x/att/1".into(),
                },
                ArticleItem {
                    author: "carol".into(),
                    content: "ok".into(),
                },
            ],
        });
        let mut view = PageView::new(page, 40, 10, WidthRule::Ascii);
        assert_eq!(view.screen_count(), 2);

        let screen = view.screen();
        assert_eq!(screen.rows[0].segments[0].text, "Python - 主题:asyncio");
        assert_eq!(screen.rows.len(), 5);
        assert_eq!(
            screen.rows[2].segments[0].style,
            RowStyle::Line(LineRole::QuoteHeader)
        );
        assert_eq!(screen.rows[3].segments[0].style, RowStyle::Line(LineRole::Quote));
        assert_eq!(screen.links, vec![LinkPos::new(0, 4, "https://x/att/1")]);

        assert!(view.next_screen());
        let screen = view.screen();
        assert_eq!(screen.rows[1].text(), "carol");
        assert!(screen.links.is_empty());
    }

    #[test]
    fn test_wrapped_image_url_keeps_full_target() {
        let url = "https://att.newsmth.net/nForum/att/Python/2002/245";
        let page = Page::Article(ArticlePage {
            items: vec![ArticleItem {
                author: "alice".into(),
                content: url.into(),
            }],
            ..Default::default()
        });
        let view = PageView::new(page, 20, 10, WidthRule::Ascii);
        let screen = view.screen();

        assert_eq!(screen.links, vec![LinkPos::new(0, 2, url)]);
        assert_eq!(screen.rows[2].text(), "https://att.newsmth.");
        assert_eq!(screen.rows[3].text(), "net/nForum/att/Pytho");
    }

    #[test]
    fn test_wrapped_url_across_screens() {
        let url = "https://att.newsmth.net/nForum/att/Python/2002/245";
        let page = Page::Article(ArticlePage {
            items: vec![ArticleItem {
                author: "alice".into(),
                content: format!("hi\n{}", url),
            }],
            ..Default::default()
        });
        let mut view = PageView::new(page, 20, 4, WidthRule::Ascii);
        assert_eq!(view.screen_count(), 2);
        assert_eq!(view.screen().links, vec![LinkPos::new(0, 3, url)]);

        assert!(view.next_screen());
        assert!(view.screen().links.is_empty());
    }

    #[test]
    fn test_rows_fit_width() {
        let view = PageView::new(board(1), 12, 24, WidthRule::Ascii);
        let screen = view.screen();
        for row in &screen.rows {
            assert!(WidthRule::Ascii.str_width(&row.text()) <= 12);
        }
    }

    #[test]
    fn test_resize_relayouts_article() {
        let page = Page::Article(ArticlePage {
            items: vec![ArticleItem {
                author: String::new(),
                content: "1\n2\n3\n4".into(),
            }],
            ..Default::default()
        });
        let mut view = PageView::new(page, 40, 3, WidthRule::Ascii);
        assert_eq!(view.screen_count(), 2);
        view.next_screen();
        view.resize(40, 10);
        assert_eq!(view.screen_count(), 1);
        assert_eq!(view.screen_index(), 0);
    }

    #[test]
    fn test_empty_page_has_one_screen() {
        let view = PageView::new(Page::empty(PageKind::Article), 80, 24, WidthRule::Ascii);
        assert_eq!(view.screen_count(), 1);
        let screen = view.screen();
        assert_eq!(screen.rows.len(), 1);
        assert!(screen.links.is_empty());
    }
}

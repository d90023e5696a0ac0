/// One post of a thread page.
///
/// `content` is plain text; inline image URLs follow the body, one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleItem {
    pub author: String,
    pub content: String,
}

impl ArticleItem {
    /// Author line followed by the body, the text handed to the layout engine.
    pub fn layout_text(&self) -> String {
        if self.author.is_empty() {
            self.content.clone()
        } else {
            format!("{}\n{}", self.author, self.content)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    pub board_name: String,
    pub name: String,
    pub page_index: usize,
    pub page_count: usize,
    pub items: Vec<ArticleItem>,
}

impl Default for ArticlePage {
    fn default() -> Self {
        Self {
            board_name: String::new(),
            name: String::new(),
            page_index: 1,
            page_count: 1,
            items: Vec::new(),
        }
    }
}

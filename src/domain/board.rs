/// One thread row of a board listing. Timestamps stay display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardItem {
    pub is_pinned: bool,
    pub url: String,
    pub title: String,
    pub author: String,
    pub author_time: String,
    pub last_replier: String,
    pub reply_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPage {
    pub name_local: String,
    pub name_foreign: String,
    pub page_index: usize,
    pub page_count: usize,
    pub items: Vec<BoardItem>,
}

impl Default for BoardPage {
    fn default() -> Self {
        Self {
            name_local: String::new(),
            name_foreign: String::new(),
            page_index: 1,
            page_count: 1,
            items: Vec::new(),
        }
    }
}

impl BoardPage {
    pub fn display_name(&self) -> String {
        match (self.name_local.is_empty(), self.name_foreign.is_empty()) {
            (false, false) => format!("{}({})", self.name_local, self.name_foreign),
            (false, true) => self.name_local.clone(),
            (true, false) => self.name_foreign.clone(),
            (true, true) => String::new(),
        }
    }
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::LinkPos;
use crate::layout::CharWidth;
use crate::tui::app::TuiApp;
use crate::view::Screen;

pub fn render(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_page(frame, app, chunks[0], colors);
    render_status_bar(frame, app, chunks[1], colors);
}

fn render_page(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let screen = app.controller.screen();
    let selected = app.controller.links().selected();
    let (_, _, rule) = app.controller.view().geometry();

    let lines = screen_lines(&screen, selected, colors, &rule);
    frame.render_widget(Paragraph::new(Text::from(lines)), area);

    if let Some(link) = selected {
        if link.y < area.height && link.x < area.width {
            frame.set_cursor_position((area.x + link.x, area.y + link.y));
        }
    }
}

/// Paint screen rows, highlighting the segment that starts at the
/// selected link position.
pub fn screen_lines(
    screen: &Screen,
    selected: Option<&LinkPos>,
    colors: &ColorConfig,
    measure: &impl CharWidth,
) -> Vec<Line<'static>> {
    screen
        .rows
        .iter()
        .enumerate()
        .map(|(y, row)| {
            let mut column = 0;
            let spans: Vec<Span<'static>> = row
                .segments
                .iter()
                .map(|segment| {
                    let is_selected = selected
                        .is_some_and(|link| link.y as usize == y && link.x as usize == column);
                    column += measure.str_width(&segment.text);

                    let style = if is_selected {
                        Style::default()
                            .fg(colors.selection_fg)
                            .bg(colors.selection_bg)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(colors.for_style(segment.style))
                    };
                    Span::styled(segment.text.clone(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.is_loading {
        format!("Loading {}...", app.controller.current_url())
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        format!(
            "{}  ↑↓:Link  ←:Back  →:Open  Tab:Bookmark  Space/b:Screen  PgUp/PgDn:Page  q:Quit",
            app.controller.current_url()
        )
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WidthRule;
    use crate::view::{Row, RowStyle, Segment};

    fn screen() -> Screen {
        Screen {
            rows: vec![
                Row {
                    segments: vec![Segment::new("水木", RowStyle::Title)],
                },
                Row {
                    segments: vec![
                        Segment::new("* ", RowStyle::Meta),
                        Segment::new("Python", RowStyle::Link),
                    ],
                },
            ],
            links: vec![LinkPos::new(2, 1, "/board/Python")],
        }
    }

    #[test]
    fn test_selected_link_is_highlighted() {
        let screen = screen();
        let colors = ColorConfig::default();
        let lines = screen_lines(&screen, screen.links.first(), &colors, &WidthRule::Ascii);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].style.bg, None);
        assert_eq!(lines[1].spans[1].style.bg, Some(colors.selection_bg));
        assert_eq!(lines[0].spans[0].style.fg, Some(colors.title));
    }

    #[test]
    fn test_no_selection() {
        let screen = screen();
        let colors = ColorConfig::default();
        let lines = screen_lines(&screen, None, &colors, &WidthRule::Ascii);

        assert_eq!(lines[1].spans[1].style.fg, Some(colors.link));
        assert_eq!(lines[1].spans[1].style.bg, None);
    }
}

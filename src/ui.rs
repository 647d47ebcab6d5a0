use crate::app::{App, Tab};
use crate::braille::BrailleCanvas;
use crate::map::{render_globe, GlobeLayers};
use crate::session::View;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(3),    // Main pane
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    match app.tab {
        Tab::Text => render_text(frame, app, chunks[1]),
        Tab::Globe => render_globe_pane(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let active = match app.tab {
        Tab::Globe => None,
        Tab::Text => app.session.viewing,
    };
    let tab = |label: &'static str, key: &'static str, selected: bool, available: bool| {
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if available {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {label} [{key}] "), style)
    };

    let session = &app.session;
    let line = Line::from(vec![
        Span::styled(" Aura ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        tab("Original", "o", active == Some(View::Original), session.file_text.is_some()),
        tab("Summary", "s", active == Some(View::Summary), session.summary.is_some()),
        tab("Translation", "t", active == Some(View::Translation), session.translation.is_some()),
        tab("Globe", "g", app.tab == Tab::Globe, true),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_text(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.session.file_name.as_deref() {
        Some(name) => format!(" {} | {} ", name, app.view_title()),
        None => " No document ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let body = match app.session.current_text() {
        Some(text) => Paragraph::new(text),
        None => Paragraph::new(Line::from(Span::styled(
            "Open a .txt or .md file: aura <FILE>",
            Style::default().fg(Color::DarkGray),
        ))),
    };
    frame.render_widget(
        body.block(block).wrap(Wrap { trim: false }).scroll((app.scroll, 0)),
        area,
    );
}

fn render_globe_pane(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Globe ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = render_globe(
        &app.scene,
        app.markers,
        app.globe.land_radius(),
        &viewport,
        inner.width as usize,
        inner.height as usize,
    );
    frame.render_widget(GlobeWidget { layers }, inner);
}

/// Braille globe, one colored layer per scene trace
struct GlobeWidget {
    layers: GlobeLayers,
}

impl GlobeWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for GlobeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rgb = |(r, g, b): (u8, u8, u8)| Color::Rgb(r, g, b);
        // Back to front: ocean limb, land, markers
        Self::render_layer(&self.layers.sphere, Color::Blue, area, buf);
        Self::render_layer(&self.layers.land, rgb(self.layers.land_color), area, buf);
        Self::render_layer(&self.layers.markers, rgb(self.layers.marker_color), area, buf);
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.session.status),
        Style::default().fg(Color::Yellow),
    )];
    if app.tab == Tab::Globe {
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            " | hjkl:rotate +/-:zoom",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled("| jk:scroll", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::styled(
        " w:download q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

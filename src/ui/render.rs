use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::app::App;
use crate::domain::command::SceneObject;
use crate::domain::session::PaletteSession;
use crate::domain::view::RowView;

pub const LINES_PER_ROW: u16 = 2;

const PALETTE_COLUMNS: u16 = 64;
const SELECTED_ROW_BG: Color = Color::Rgb(0x40, 0x76, 0xd3);

/// Draws the editor and, when open, the palette overlay. Returns the
/// overlay's inner area so pointer events can be mapped back onto rows.
pub fn render(frame: &mut ratatui::Frame<'_>, app: &App) -> Option<Rect> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let header = Paragraph::new(
        "cmdpal | Ctrl+P command palette | Ctrl+O open | j/k select | q quit",
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL).title("Editor"));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let entities = app.scene().entities();
    let items: Vec<ListItem<'_>> = entities
        .iter()
        .map(|entity| {
            let mut style = Style::default();
            if app.selected_entity() == Some(entity.id) {
                style = style.bg(Color::Blue).fg(Color::White);
            }
            ListItem::new(Line::from(entity.hierarchy_path())).style(style)
        })
        .collect();
    let hierarchy = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Hierarchy ({})", entities.len())),
    );
    frame.render_widget(hierarchy, body[0]);

    let log_height = body[1].height.saturating_sub(2) as usize;
    let skip = app.log().len().saturating_sub(log_height);
    let log_lines: Vec<Line<'_>> = app.log()[skip..]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    let console = Paragraph::new(Text::from(log_lines))
        .block(Block::default().borders(Borders::ALL).title("Console"))
        .wrap(Wrap { trim: true });
    frame.render_widget(console, body[1]);

    let status = Paragraph::new(app.status_message.clone())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[2]);

    let area = frame.area();
    app.palette()
        .map(|palette| render_palette(frame, palette, area))
}

fn render_palette(frame: &mut ratatui::Frame<'_>, palette: &PaletteSession, area: Rect) -> Rect {
    let rows = palette.rows();
    let height = u16::try_from(rows.len())
        .unwrap_or(u16::MAX)
        .saturating_mul(LINES_PER_ROW)
        .saturating_add(3)
        .min(area.height);
    let width = PALETTE_COLUMNS.min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + 1u16.min(area.height - height),
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(palette.title().trim().to_string());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let mut lines = vec![Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(palette.input().to_string()),
    ])];
    let dim = parse_hex_color(&palette.settings().dim_color).unwrap_or(Color::DarkGray);
    for row in &rows {
        lines.extend(row_lines(row, dim));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);

    inner
}

fn row_lines(row: &RowView, dim_color: Color) -> [Line<'static>; 2] {
    let base = if row.selected {
        Style::default().bg(SELECTED_ROW_BG)
    } else {
        Style::default()
    };
    let dim = base.fg(dim_color);

    let mut title = vec![
        Span::styled(row.title.before.clone(), dim.add_modifier(Modifier::BOLD)),
        Span::styled(
            row.title.highlighted.clone(),
            base.fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(row.title.after.clone(), dim.add_modifier(Modifier::BOLD)),
    ];
    if let Some(icon) = &row.icon {
        title.push(Span::styled(format!("  [{}]", icon.key()), dim));
    }

    [
        Line::from(title).style(base),
        Line::from(Span::styled(format!("  {}", row.subtitle), dim)).style(base),
    ]
}

/// Parses `#rrggbb` skin colours.
fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub mod render;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::app::{App, PaletteKind};
use crate::domain::session::{PaletteKey, PointerEvent, PRIMARY_BUTTON};
use crate::domain::view::PaletteSettings;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    palette_area: Option<Rect>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            palette_area: None,
        })
    }

    pub fn run(&mut self, app: &mut App) -> Result<()> {
        while app.running {
            app.tick();
            if !app.running {
                break;
            }

            let mut palette_area = None;
            self.terminal
                .draw(|frame| palette_area = render::render(frame, app))
                .map_err(anyhow::Error::from)?;
            self.palette_area = palette_area;

            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(app, key)
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(app, mouse),
                    Event::FocusLost => {
                        if let Some(palette) = app.palette_mut() {
                            palette.focus_lost();
                        }
                    }
                    _ => {}
                }
            }

            app.pump_host_requests();
        }

        Ok(())
    }

    fn handle_key_event(&mut self, app: &mut App, key: KeyEvent) {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c')) = (key.modifiers, key.code) {
            app.request_quit();
            return;
        }

        if let Some(palette) = app.palette_mut() {
            match key.code {
                KeyCode::Esc => palette.handle_key(PaletteKey::Escape),
                KeyCode::Enter => palette.handle_key(PaletteKey::Return),
                KeyCode::Up => palette.handle_key(PaletteKey::Up),
                KeyCode::Down => palette.handle_key(PaletteKey::Down),
                KeyCode::Backspace => palette.backspace(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    palette.push_char(c)
                }
                _ => {}
            }
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.open_palette(PaletteKind::Commands),
            (KeyModifiers::CONTROL, KeyCode::Char('o'))
            | (KeyModifiers::CONTROL, KeyCode::Char('t')) => app.open_palette(PaletteKind::Open),
            (_, KeyCode::Up) | (_, KeyCode::Char('k')) => app.select_previous_entity(),
            (_, KeyCode::Down) | (_, KeyCode::Char('j')) => app.select_next_entity(),
            (_, KeyCode::Char('q')) => app.request_quit(),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, app: &mut App, mouse: MouseEvent) {
        let Some(area) = self.palette_area else {
            return;
        };
        let Some(palette) = app.palette_mut() else {
            return;
        };
        let Some((x, y)) = pointer_position(area, mouse.column, mouse.row, palette.settings())
        else {
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved => palette.handle_pointer(PointerEvent::Move { x, y }),
            MouseEventKind::Down(MouseButton::Left) => palette.handle_pointer(PointerEvent::Down {
                button: PRIMARY_BUTTON,
                x,
                y,
            }),
            _ => {}
        }
    }
}

/// Maps a terminal cell inside the palette's inner area to palette window
/// coordinates. The first line is the input field; each row takes two lines.
pub fn pointer_position(
    inner: Rect,
    column: u16,
    row: u16,
    settings: &PaletteSettings,
) -> Option<(f32, f32)> {
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    let x = f32::from(column - inner.x) / f32::from(inner.width.max(1)) * settings.window_width;
    let line = row - inner.y;
    let y = if line == 0 {
        settings.header_height / 2.0
    } else {
        let row_index = f32::from((line - 1) / render::LINES_PER_ROW);
        settings.header_height + row_index * settings.row_height + settings.row_height / 2.0
    };
    Some((x, y))
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let backend = self.terminal.backend_mut();
        let _ = backend.execute(DisableFocusChange);
        let _ = backend.execute(DisableMouseCapture);
        let _ = backend.execute(LeaveAlternateScreen);
    }
}

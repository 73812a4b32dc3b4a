//! One palette invocation: input, ranked results, selection and the
//! close/execute handshake with the host window.

use tracing::{debug, error};

use crate::domain::host::PaletteHost;
use crate::domain::input::ParsedInput;
use crate::domain::matcher::{QueryChars, RankedCommand};
use crate::domain::registry::CommandRegistry;
use crate::domain::scheduler::PendingExecution;
use crate::domain::view::{
    debug_score_suffix, HighlightedTitle, PaletteSettings, RowView, WindowGeometry,
};

pub const PRIMARY_BUTTON: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Escape,
    Return,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f32, y: f32 },
    Down { button: u8, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Open,
    Closed,
}

pub struct PaletteSession {
    title: String,
    registry: Option<CommandRegistry>,
    settings: PaletteSettings,
    host: Box<dyn PaletteHost>,
    input: String,
    parsed: ParsedInput,
    results: Vec<RankedCommand>,
    selected_index: usize,
    phase: SessionPhase,
}

impl PaletteSession {
    pub fn open(
        title: impl Into<String>,
        registry: Option<CommandRegistry>,
        settings: PaletteSettings,
        host: Box<dyn PaletteHost>,
    ) -> Self {
        let title = title.into();
        if registry.is_none() {
            error!(palette = %title, "can't initialize a palette without a command registry");
        }

        let mut session = Self {
            title,
            registry,
            settings,
            host,
            input: String::new(),
            parsed: ParsedInput::default(),
            results: Vec::new(),
            selected_index: 0,
            phase: SessionPhase::Open,
        };
        session.reload();
        session
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn parsed(&self) -> &ParsedInput {
        &self.parsed
    }

    pub fn results(&self) -> &[RankedCommand] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_closing(&self) -> bool {
        self.phase == SessionPhase::Closed
    }

    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    /// Valid results that fit in the window, in rank order.
    pub fn visible(&self) -> Vec<&RankedCommand> {
        self.results
            .iter()
            .filter(|ranked| ranked.command.is_valid())
            .take(self.settings.max_rows)
            .collect()
    }

    pub fn displayed_count(&self) -> usize {
        self.visible().len()
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.settings.geometry(self.displayed_count())
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        if self.is_closing() {
            return;
        }

        let input = input.into();
        if input == self.input {
            return;
        }

        self.input = input;
        self.parsed = ParsedInput::parse(&self.input);
        self.selected_index = 0;
        self.reload();
    }

    pub fn push_char(&mut self, c: char) {
        let mut input = self.input.clone();
        input.push(c);
        self.set_input(input);
    }

    pub fn backspace(&mut self) {
        let mut input = self.input.clone();
        if input.pop().is_some() {
            self.set_input(input);
        }
    }

    pub fn handle_key(&mut self, key: PaletteKey) {
        if self.is_closing() {
            return;
        }

        match key {
            PaletteKey::Escape => self.close(),
            PaletteKey::Return => {
                self.confirm();
            }
            PaletteKey::Up => self.move_selection(-1),
            PaletteKey::Down => self.move_selection(1),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.is_closing() {
            return;
        }

        match event {
            PointerEvent::Move { x, y } => {
                if let Some(row) = self.row_at(x, y) {
                    self.selected_index = row;
                }
            }
            PointerEvent::Down { button, x, y } => {
                if button != PRIMARY_BUTTON {
                    return;
                }
                if let Some(row) = self.row_at(x, y) {
                    self.execute_at(row);
                }
            }
        }
    }

    pub fn focus_lost(&mut self) {
        self.close();
    }

    /// Moves the selection, wrapping past either end of the displayed rows.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.displayed_count();
        if count == 0 {
            self.selected_index = 0;
            return;
        }
        let next = (self.selected_index as isize + delta).rem_euclid(count as isize);
        self.selected_index = next as usize;
    }

    pub fn confirm(&mut self) -> bool {
        self.execute_at(self.selected_index)
    }

    /// Closes the window and hands the command at `index` to the host for
    /// its next tick. Returns false when nothing is displayed there.
    pub fn execute_at(&mut self, index: usize) -> bool {
        if self.is_closing() {
            return false;
        }

        let command = match self.visible().get(index) {
            Some(ranked) => ranked.command.clone(),
            None => {
                error!(index, "can't execute command with index because out-of-bounds");
                return false;
            }
        };

        let task = PendingExecution::new(command, self.parsed.arguments.clone());
        debug!(command = task.title(), "command confirmed");
        self.close();
        self.host.schedule(task);
        true
    }

    /// Asks the host to close the window. Only the first call has effect.
    pub fn close(&mut self) {
        if self.is_closing() {
            return;
        }
        self.phase = SessionPhase::Closed;
        self.host.close_window();
    }

    pub fn rows(&self) -> Vec<RowView> {
        let chars = QueryChars::new(&self.parsed.search_term);

        self.visible()
            .into_iter()
            .enumerate()
            .map(|(idx, ranked)| {
                let command = &ranked.command;
                let title_len = command.title().chars().count();
                let mut subtitle = self.settings.truncate_subtitle(command.subtitle(), title_len);
                if self.settings.debug_scores {
                    subtitle.push_str(&debug_score_suffix(ranked.score));
                }

                RowView {
                    title: HighlightedTitle::new(command.title(), &chars),
                    subtitle,
                    icon: command.icon().cloned(),
                    selected: idx == self.selected_index,
                    rect: self.settings.row_rect(idx),
                }
            })
            .collect()
    }

    pub fn row_at(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.displayed_count()).find(|&idx| self.settings.row_rect(idx).contains(x, y))
    }

    fn reload(&mut self) {
        let Some(registry) = &self.registry else {
            return;
        };

        self.results = registry.sorted_by_match(&self.parsed.search_term);
        debug!(
            search = %self.parsed.search_term,
            results = self.results.len(),
            "palette results reloaded"
        );
    }
}

use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::leaderboard::LeaderboardScreen;
use crate::util::{center_rect, Globals};
use crate::warning::Warning;
use crossterm::event::{poll, read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
    Frame,
};
use std::time::Instant;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

/// The screen shown after a crash, asking for a name to put on the
/// leaderboard
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NameEntry {
    globals: Globals,
    score: u32,
    name: String,
    cursor_visible: bool,
    next_blink: Option<Instant>,
}

impl NameEntry {
    const WIDTH: u16 = 36;
    const HEIGHT: u16 = 8;

    pub(crate) fn new(globals: Globals, score: u32) -> NameEntry {
        NameEntry {
            globals,
            score,
            name: String::new(),
            cursor_visible: true,
            next_blink: None,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Wait for a key press for up to
    /// [`CURSOR_BLINK`][consts::CURSOR_BLINK], blinking the cursor if none
    /// arrives
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        let when = *self
            .next_blink
            .get_or_insert_with(|| Instant::now() + consts::CURSOR_BLINK);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.blink();
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn blink(&mut self) {
        self.cursor_visible = !self.cursor_visible;
        self.next_blink = None;
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Screen::Terminated),
            Command::Enter if !self.name.is_empty() => return Some(self.submit(&self.name)),
            Command::Enter | Command::Esc => return Some(self.submit(consts::DEFAULT_NAME)),
            Command::Backspace => {
                if let Some((i, _)) = self.name.grapheme_indices(true).next_back() {
                    self.name.truncate(i);
                }
            }
            Command::Char(c) => {
                if allowed_in_name(c) && self.name.chars().count() < consts::MAX_NAME_LENGTH {
                    self.name.push(c);
                }
            }
            _ => return None,
        }
        // Keep the cursor steady while typing
        self.cursor_visible = true;
        self.next_blink = None;
        None
    }

    /// Record the score under `name` and move on to the leaderboard
    fn submit(&self, name: &str) -> Screen {
        let (leaderboard, err) = self.globals.store.save(name, self.score);
        Screen::Leaderboard(LeaderboardScreen::new(
            self.globals.clone(),
            name,
            self.score,
            leaderboard,
            err.as_ref().map(Warning::from),
        ))
    }
}

/// Names may contain letters, numbers, spaces, hyphens, and underscores
fn allowed_in_name(c: char) -> bool {
    matches!(c, ' ' | '-' | '_')
        || matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Letter | GeneralCategoryGroup::Number
        )
}

impl Widget for &NameEntry {
    /*
     * ┌─────────── GAME OVER ────────────┐
     * │            Score: 120            │
     * │                                  │
     * │         Enter your name:         │
     * │               Ada_               │
     * │                                  │
     * │     Enter: save   Esc: skip      │
     * └──────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_area = center_rect(
            area,
            Size {
                width: NameEntry::WIDTH,
                height: NameEntry::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .title_style(consts::GAME_OVER_STYLE)
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let cursor = if self.cursor_visible { "_" } else { " " };
        let lines = [
            Line::from(format!("Score: {}", self.score)),
            Line::default(),
            Line::from("Enter your name:"),
            Line::from(Span::styled(
                format!("{}{cursor}", self.name),
                consts::NAME_INPUT_STYLE,
            )),
            Line::default(),
            Line::from_iter([
                Span::styled("Enter", consts::KEY_STYLE),
                Span::styled(": save   ", consts::HINT_STYLE),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::styled(": skip", consts::HINT_STYLE),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }
    }
}

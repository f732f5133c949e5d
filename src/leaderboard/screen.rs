use super::{Leaderboard, LeaderboardEntry};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::util::{center_rect, Globals};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// The screen shown once a score has been recorded, listing the top scores
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LeaderboardScreen {
    globals: Globals,
    score: u32,
    leaderboard: Leaderboard,
    new_high_score: bool,
    /// Shown on top of the leaderboard if the score could not be saved
    warning: Option<Warning>,
}

impl LeaderboardScreen {
    const WIDTH: u16 = 40;
    const HEIGHT: u16 = 19;

    pub(crate) fn new(
        globals: Globals,
        name: &str,
        score: u32,
        leaderboard: Leaderboard,
        warning: Option<Warning>,
    ) -> LeaderboardScreen {
        let new_high_score = leaderboard.is_leader(name, score);
        LeaderboardScreen {
            globals,
            score,
            leaderboard,
            new_high_score,
            warning,
        }
    }

    pub(crate) fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Did the score just recorded take first place?
    pub(crate) fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(ref warning) = self.warning {
            match warning.handle_command(cmd)? {
                WarningOutcome::Dismissed => {
                    self.warning = None;
                    return None;
                }
                WarningOutcome::Quit => return Some(Screen::Terminated),
            }
        }
        match cmd {
            Command::Quit | Command::Char('q') => Some(Screen::Terminated),
            Command::Enter | Command::Char('c' | 'r') => {
                Some(Screen::Playing(Game::new(self.globals.clone())))
            }
            _ => None,
        }
    }
}

impl Widget for &LeaderboardScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_area = center_rect(
            area,
            Size {
                width: LeaderboardScreen::WIDTH,
                height: LeaderboardScreen::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" LEADERBOARD ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);

        let mut lines = vec![
            Line::styled("GAME OVER", consts::GAME_OVER_STYLE),
            Line::from(format!("Your score: {}", self.score)),
        ];
        if self.new_high_score {
            lines.push(Line::styled("NEW HIGH SCORE!", consts::HIGHSCORE_STYLE));
        } else {
            lines.push(Line::default());
        }
        lines.push(Line::default());
        lines.push(Line::styled("TOP 10", consts::HIGHSCORE_STYLE));
        let entries = self.leaderboard.entries();
        for i in 0..consts::LEADERBOARD_SIZE {
            lines.push(entries.get(i).map_or_else(Line::default, |e| entry_line(i, e)));
        }
        lines.push(Line::default());
        lines.push(Line::from_iter([
            Span::styled("c", consts::KEY_STYLE),
            Span::styled("/", consts::HINT_STYLE),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::styled(": play again   ", consts::HINT_STYLE),
            Span::styled("q", consts::KEY_STYLE),
            Span::styled(": quit", consts::HINT_STYLE),
        ]));
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }

        if let Some(ref warning) = self.warning {
            warning.render(area, buf);
        }
    }
}

/// Format the entry at (zero-based) index `i` of the leaderboard.  Names are
/// cut down to [`MAX_NAME_LENGTH`][consts::MAX_NAME_LENGTH] characters and
/// padded by display width so that the scores line up.
fn entry_line(i: usize, entry: &LeaderboardEntry) -> Line<'static> {
    let name = match entry.name.char_indices().nth(consts::MAX_NAME_LENGTH) {
        Some((cut, _)) => &entry.name[..cut],
        None => entry.name.as_str(),
    };
    let pad = consts::MAX_NAME_LENGTH.saturating_sub(name.width());
    let text = format!("{:>2}. {name}{:pad$} {:>6}", i + 1, "", entry.score);
    let style = consts::PODIUM_STYLES
        .get(i)
        .copied()
        .unwrap_or_else(Style::new);
    Line::styled(text, style)
}

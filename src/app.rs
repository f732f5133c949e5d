use crate::game::Game;
use crate::leaderboard::LeaderboardScreen;
use crate::name_entry::NameEntry;
use crate::util::Globals;
use ratatui::{backend::Backend, Terminal};
use std::io;

/// The top-level driver: draws the current screen, lets it handle one unit of
/// input or time, and switches screens when it asks to
#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        App {
            screen: Screen::Playing(Game::new(globals)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        tracing::info!("Starting session");
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        tracing::info!("Session ended");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Playing(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::RoundEnding(ref entry) => {
                terminal.draw(|frame| entry.draw(frame))?;
            }
            Screen::Leaderboard(ref board) => {
                terminal.draw(|frame| board.draw(frame))?;
            }
            Screen::Terminated => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Playing(ref mut game) => game.process_input()?,
            Screen::RoundEnding(ref mut entry) => entry.process_input()?,
            Screen::Leaderboard(ref mut board) => board.process_input()?,
            Screen::Terminated => None,
        };
        if let Some(screen) = next {
            tracing::debug!(screen = screen.name(), "Switching screens");
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Terminated)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Playing(Game),
    /// Asking for the player's name after a crash
    RoundEnding(NameEntry),
    Leaderboard(LeaderboardScreen),
    Terminated,
}

impl Screen {
    fn name(&self) -> &'static str {
        match self {
            Screen::Playing(_) => "playing",
            Screen::RoundEnding(_) => "round-ending",
            Screen::Leaderboard(_) => "leaderboard",
            Screen::Terminated => "terminated",
        }
    }
}

use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up describing an error (and its chain of causes) that the player
/// should know about but that doesn't stop the game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    /// Messages longer than this many lines are cut short
    const MAX_LINES: usize = 12;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    /// The lines to show, with an ellipsis standing in for whatever doesn't
    /// fit
    fn visible_lines(&self) -> Vec<&str> {
        if self.lines.len() <= Self::MAX_LINES {
            self.lines.iter().map(String::as_str).collect()
        } else {
            self.lines[..Self::MAX_LINES - 1]
                .iter()
                .map(String::as_str)
                .chain(["…"])
                .collect()
        }
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let Some(first) = msgs.next() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
            };
        };
        let causes = msgs.collect::<Vec<_>>();
        let width = usize::from(Warning::TEXT_WIDTH);
        let mut lines = wrap(&first, textwrap::Options::new(width).break_words(true));
        match causes.as_slice() {
            [] => (),
            [cause] => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                let opts = textwrap::Options::new(width)
                    .break_words(true)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                lines.extend(wrap(cause, opts));
            }
            causes => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for (i, m) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    let opts = textwrap::Options::new(width)
                        .break_words(true)
                        .initial_indent(&init_indent)
                        .subsequent_indent("       ");
                    lines.extend(wrap(m, opts));
                }
            }
        }
        Warning { lines }
    }
}

fn wrap(s: &str, opts: textwrap::Options<'_>) -> Vec<String> {
    textwrap::wrap(s, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<&E> for Warning {
    fn from(e: &E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    /*
     * ┌──────────── WARNING ─────────────┐
     * │ <message>                        │
     * │                                  │
     * │ Caused by:                       │
     * │     <cause>                      │
     * │                                  │
     * │               [OK]               │
     * └──────────────────────────────────┘
     */

    // `area` is the whole display; the pop-up centers itself within it
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.visible_lines();
        // Text, a blank row, "[OK]", and the top & bottom borders
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let mut rows = inner.rows();
        for (text, row) in lines.into_iter().zip(rows.by_ref()) {
            Line::from(text).render(row, buf);
        }
        if let Some(row) = rows.nth(1) {
            Line::from("[OK]").centered().render(row, buf);
        }
    }
}

use crate::game::Board;
use crate::leaderboard::LeaderboardStore;
use ratatui::layout::{Flex, Layout, Rect, Size};

/// Context shared by every screen for the lifetime of the program
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    /// Geometry of the playing field
    pub(crate) board: Board,

    /// Where the leaderboard is kept
    pub(crate) store: LeaderboardStore,
}

/// Return a `Rect` of the given size centered within `area`.  If `area` is
/// too small, the result is clipped to it.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

/// Draw the game screen inside a rectangle big enough to hold a board of
/// `board_size` terminal cells plus its border, a score bar above it, and a
/// status line below, in the center of the terminal window.
pub(crate) fn get_display_area(buffer_area: Rect, board_size: Size) -> Rect {
    center_rect(
        buffer_area,
        Size {
            width: board_size.width.saturating_add(2),
            height: board_size.height.saturating_add(4),
        },
    )
}

/// The text of each row of `buffer`, with trailing blanks removed
#[cfg(test)]
pub(crate) fn buffer_rows(buffer: &ratatui::buffer::Buffer) -> Vec<String> {
    buffer
        .content
        .chunks(usize::from(buffer.area.width))
        .map(|row| {
            row.iter()
                .map(ratatui::buffer::Cell::symbol)
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect()
}

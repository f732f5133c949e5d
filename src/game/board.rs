use crate::consts;
use ratatui::layout::{Position, Size};
use serde::Deserialize;
use thiserror::Error;

/// A location on the board, measured in board units from the top-left corner.
/// Coordinates are signed so that a head which has run off the edge can
/// still be represented.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Point {
    pub(crate) const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

/// The dimensions of the playing field
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawBoard")]
pub(crate) struct Board {
    width: i32,
    height: i32,
    cell: i32,
}

impl Board {
    pub(crate) fn new(width: u16, height: u16, cell: u16) -> Result<Board, BoardError> {
        if cell == 0 {
            return Err(BoardError::ZeroCell);
        }
        if width < cell.saturating_mul(2) || height < cell.saturating_mul(2) {
            return Err(BoardError::TooSmall);
        }
        if width % cell != 0 || height % cell != 0 {
            return Err(BoardError::Unaligned);
        }
        Ok(Board {
            width: i32::from(width),
            height: i32::from(height),
            cell: i32::from(cell),
        })
    }

    pub(crate) fn cell_size(self) -> i32 {
        self.cell
    }

    /// Is `p` inside `[0, width) × [0, height)`?
    pub(crate) fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// The grid-aligned point nearest the middle of the board, where the
    /// snake starts
    pub(crate) fn center(self) -> Point {
        Point::new(
            self.width / 2 / self.cell * self.cell,
            self.height / 2 / self.cell * self.cell,
        )
    }

    /// Number of columns & rows food may be placed in.  The last column & row
    /// are never used.
    pub(crate) fn spawn_grid(self) -> (i32, i32) {
        (
            (self.width - self.cell) / self.cell,
            (self.height - self.cell) / self.cell,
        )
    }

    /// The on-board cell nearest to `p`.  Used to mark where a snake that has
    /// run off the edge hit the wall.
    pub(crate) fn clamp(self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0, self.width - self.cell),
            p.y.clamp(0, self.height - self.cell),
        )
    }

    /// The middle of the cell whose top-left corner is `p`, as fractional
    /// board coordinates
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn cell_center(self, p: Point) -> (f32, f32) {
        let half = self.cell as f32 / 2.0;
        (p.x as f32 + half, p.y as f32 + half)
    }

    /// Size of the board in grid cells
    pub(crate) fn grid_size(self) -> Size {
        Size {
            width: u16::try_from(self.width / self.cell).unwrap_or(u16::MAX),
            height: u16::try_from(self.height / self.cell).unwrap_or(u16::MAX),
        }
    }

    /// Size of the board as drawn in the terminal, not counting the border
    pub(crate) fn terminal_size(self) -> Size {
        let Size { width, height } = self.grid_size();
        Size {
            width: width.saturating_mul(consts::CELL_COLUMNS),
            height,
        }
    }

    /// The grid cell containing `p`, or `None` if `p` is off the board
    pub(crate) fn cell_of(self, p: Point) -> Option<Position> {
        if !self.contains(p) {
            return None;
        }
        Some(Position {
            x: u16::try_from(p.x / self.cell).ok()?,
            y: u16::try_from(p.y / self.cell).ok()?,
        })
    }

    /// The terminal column (relative to the board's left edge) & grid row
    /// containing the fractional board location `(x, y)`.  Columns have half
    /// the width of a cell, so this is finer horizontally than
    /// [`Board::cell_of()`].
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub(crate) fn column_of(self, x: f32, y: f32) -> Option<Position> {
        let cell = self.cell as f32;
        if !(0.0..self.width as f32).contains(&x) || !(0.0..self.height as f32).contains(&y) {
            return None;
        }
        let col = (x * f32::from(consts::CELL_COLUMNS) / cell).floor();
        let row = (y / cell).floor();
        Some(Position {
            x: col as u16,
            y: row as u16,
        })
    }
}

impl Default for Board {
    fn default() -> Board {
        Board {
            width: i32::from(consts::SCREEN_WIDTH),
            height: i32::from(consts::SCREEN_HEIGHT),
            cell: i32::from(consts::CELL_SIZE),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawBoard {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl Default for RawBoard {
    fn default() -> RawBoard {
        RawBoard {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
            cell_size: consts::CELL_SIZE,
        }
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardError;

    fn try_from(value: RawBoard) -> Result<Board, BoardError> {
        Board::new(value.width, value.height, value.cell_size)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum BoardError {
    #[error("board cell size must be nonzero")]
    ZeroCell,
    #[error("board must be at least two cells wide and two cells tall")]
    TooSmall,
    #[error("board width and height must be multiples of the cell size")]
    Unaligned,
}

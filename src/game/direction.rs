use super::board::Point;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the point `step` units away from `pos` in this direction
    pub(super) fn advance(self, pos: Point, step: i32) -> Point {
        let Point { x, y } = pos;
        match self {
            Direction::North => Point::new(x, y - step),
            Direction::East => Point::new(x + step, y),
            Direction::South => Point::new(x, y + step),
            Direction::West => Point::new(x - step, y),
        }
    }

    pub(super) fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Is turning to `self` permitted for a snake currently moving in
    /// `heading` (`None` if it hasn't started moving)?  A turn must switch
    /// axes, which rules out reversing into the body.
    pub(super) fn can_turn_from(self, heading: Option<Direction>) -> bool {
        heading.is_none_or(|h| h.is_horizontal() != self.is_horizontal())
    }
}

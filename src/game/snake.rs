use super::board::Point;
use super::direction::Direction;
use crate::consts;
use std::collections::VecDeque;

/// The snake, as a head plus a trail of body segments.
///
/// All positions are in board units relative to the top-left corner of the
/// board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head.  This is moved at the start of a
    /// tick and only joins `body` once [`Snake::extend()`] is called.
    pub(super) head: Point,

    /// The positions of all of the cells in the snake's body, tail first;
    /// after [`Snake::extend()`], the last element is the head.
    pub(super) body: VecDeque<Point>,

    /// The maximum length of the body
    pub(super) max_len: usize,

    /// The direction in which the snake is currently moving, or `None` if it
    /// hasn't started yet
    pub(super) direction: Option<Direction>,
}

impl Snake {
    /// Create a new, motionless snake with its head at `head`.  The body will
    /// be empty, and `max_len` will be set to
    /// [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH].
    pub(super) fn new(head: Point) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            max_len: consts::INITIAL_SNAKE_LENGTH,
            direction: None,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Point {
        self.head
    }

    /// Return the positions of the cells in the snake's body, tail first
    pub(crate) fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    /// Return the target length of the body
    pub(crate) fn max_len(&self) -> usize {
        self.max_len
    }

    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Start moving in `direction`.  Callers check
    /// `Direction::can_turn_from()` first.
    pub(super) fn turn(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Move the head one cell of size `step` in the current direction.  A
    /// motionless snake stays put.
    pub(super) fn advance(&mut self, step: i32) {
        if let Some(d) = self.direction {
            self.head = d.advance(self.head, step);
        }
    }

    /// Append the head to the body and trim the tail down to `max_len`
    pub(super) fn extend(&mut self) {
        self.body.push_back(self.head);
        while self.body.len() > self.max_len {
            let _ = self.body.pop_front();
        }
    }

    /// Does the head coincide with any segment of the body other than the
    /// head itself?
    pub(super) fn bitten(&self) -> bool {
        self.body
            .iter()
            .rev()
            .skip(1)
            .any(|&p| p == self.head)
    }

    /// Does any part of the snake occupy `p`?
    pub(super) fn occupies(&self, p: Point) -> bool {
        self.head == p || self.body.contains(&p)
    }

    /// Extend the snake's maximum length in response to eating
    pub(super) fn grow(&mut self) {
        self.max_len += consts::SNAKE_GROWTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motionless_snake_stays_one_cell() {
        let mut snake = Snake::new(Point::new(100, 100));
        for _ in 0..5 {
            snake.advance(20);
            snake.extend();
        }
        assert_eq!(snake.body(), &VecDeque::from([Point::new(100, 100)]));
        assert!(!snake.bitten());
    }

    #[test]
    fn body_is_trimmed_to_max_len() {
        let mut snake = Snake::new(Point::new(100, 100));
        snake.max_len = 3;
        snake.turn(Direction::East);
        for _ in 0..6 {
            snake.advance(20);
            snake.extend();
            assert!(snake.body().len() <= snake.max_len());
        }
        assert_eq!(
            snake.body(),
            &VecDeque::from([
                Point::new(180, 100),
                Point::new(200, 100),
                Point::new(220, 100)
            ])
        );
        assert_eq!(snake.body().back(), Some(&snake.head()));
    }

    fn coiled_snake(max_len: usize) -> Snake {
        let mut snake = Snake::new(Point::new(20, 40));
        snake.body = VecDeque::from([
            Point::new(20, 20),
            Point::new(40, 20),
            Point::new(40, 40),
            Point::new(20, 40),
        ]);
        snake.max_len = max_len;
        snake.direction = Some(Direction::North);
        snake
    }

    #[test]
    fn bitten() {
        let mut snake = coiled_snake(5);
        snake.advance(20);
        snake.extend();
        assert_eq!(snake.head(), Point::new(20, 20));
        assert!(snake.bitten());
    }

    #[test]
    fn chasing_tail_is_safe() {
        let mut snake = coiled_snake(4);
        snake.advance(20);
        snake.extend();
        assert_eq!(snake.head(), Point::new(20, 20));
        assert!(!snake.bitten());
    }
}

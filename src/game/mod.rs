mod board;
mod direction;
mod food;
mod particle;
mod snake;
mod spawner;
pub(crate) use self::board::Board;
pub(crate) use self::direction::Direction;
use self::food::{Food, FoodKind};
use self::particle::Particle;
use self::snake::Snake;
use self::spawner::{choose_food_type, place_food};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::name_entry::NameEntry;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    globals: Globals,
    snake: Snake,
    foods: Vec<Food>,
    particles: Vec<Particle>,
    score: u32,
    /// The top score on the leaderboard when the round started
    highscore: u32,
    /// Ticks per second
    speed: u32,
    /// Seconds since food was last spawned by the timer
    spawn_timer: f32,
    /// Turns requested since the last tick, oldest first
    turns: Vec<Direction>,
    state: GameState,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        let highscore = globals.store.load().top_score().unwrap_or(0);
        let snake = Snake::new(globals.board.center());
        let mut game = Game {
            rng,
            globals,
            snake,
            foods: Vec::with_capacity(consts::MAX_FOODS),
            particles: Vec::new(),
            score: 0,
            highscore,
            speed: consts::INITIAL_SPEED,
            spawn_timer: 0.0,
            turns: Vec::new(),
            state: GameState::Running,
            next_tick: None,
        };
        for _ in 0..consts::INITIAL_FOODS {
            game.spawn_food();
        }
        tracing::debug!(highscore, "Starting new round");
        game
    }

    /// Wait for input until the next tick is due, then either handle the
    /// input or run the tick.  After a crash, the final frame is held for
    /// [`CRASH_PAUSE`][consts::CRASH_PAUSE] before the round ends.
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        let period = match self.state {
            GameState::Running => self.tick_period(),
            GameState::Crashed => consts::CRASH_PAUSE,
            GameState::Over => return Ok(Some(self.end_round())),
        };
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + period);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.next_tick = None;
            Ok(self.on_deadline())
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn on_deadline(&mut self) -> Option<Screen> {
        match self.state {
            GameState::Running => {
                self.advance();
                None
            }
            GameState::Crashed => {
                self.state = GameState::Over;
                Some(self.end_round())
            }
            GameState::Over => Some(self.end_round()),
        }
    }

    /// Run one tick of the simulation
    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        let dt = self.tick_period();
        let heading = self.snake.direction();
        if let Some(d) = self
            .turns
            .drain(..)
            .rev()
            .find(|d| d.can_turn_from(heading))
        {
            self.snake.turn(d);
        }

        self.snake.advance(self.globals.board.cell_size());
        let mut crashed = !self.globals.board.contains(self.snake.head());

        self.particles.retain_mut(Particle::update);
        self.foods.retain_mut(|f| f.update(dt));
        self.spawn_timer += dt.as_secs_f32();
        if self.spawn_timer >= consts::FOOD_SPAWN_INTERVAL && self.foods.len() < consts::MAX_FOODS
        {
            self.spawn_food();
            self.spawn_timer = 0.0;
        }

        self.snake.extend();
        crashed |= self.snake.bitten();

        if let Some(i) = self
            .foods
            .iter()
            .position(|f| f.pos() == self.snake.head())
        {
            let food = self.foods.remove(i);
            self.eat(food);
        }

        if crashed {
            tracing::info!(
                score = self.score,
                length = self.snake.max_len(),
                "Snake crashed"
            );
            self.state = GameState::Crashed;
        }
    }

    fn spawn_food(&mut self) {
        let kind = choose_food_type(&mut self.rng);
        let pos = place_food(&mut self.rng, self.globals.board, &self.snake, &self.foods);
        tracing::debug!(?kind, x = pos.x, y = pos.y, "Spawned food");
        self.foods.push(Food::new(pos, kind));
    }

    fn eat(&mut self, food: Food) {
        let spec = food.kind().spec();
        self.score += spec.score;
        self.speed = self
            .speed
            .saturating_add_signed(spec.speed_mod)
            .clamp(consts::MIN_SPEED, consts::MAX_SPEED);
        self.snake.grow();
        let (x, y) = self.globals.board.cell_center(food.pos());
        for _ in 0..consts::PARTICLE_BURST {
            let p = Particle::random(&mut self.rng, x, y, spec.color);
            self.particles.push(p);
        }
        tracing::debug!(
            kind = ?food.kind(),
            score = self.score,
            speed = self.speed,
            "Ate food"
        );
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if cmd == Command::Quit {
            return Some(Screen::Terminated);
        }
        if self.running() {
            if let Some(d) = cmd.direction() {
                self.turns.push(d);
            }
        }
        None
    }

    fn end_round(&self) -> Screen {
        tracing::info!(
            score = self.score,
            length = self.snake.max_len(),
            "Round over"
        );
        Screen::RoundEnding(NameEntry::new(self.globals.clone(), self.score))
    }

    /// Time between ticks at the current speed
    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.speed
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn highscore(&self) -> u32 {
        self.highscore
    }

    pub(crate) fn speed(&self) -> u32 {
        self.speed
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub(crate) fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.globals.board;
        let display = get_display_area(area, board.terminal_size());
        let [score_area, block_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        buf.set_style(score_area, consts::SCORE_BAR_STYLE);
        Line::from(format!(" Score: {}", self.score())).render(score_area, buf);
        Line::from(format!("Speed: {}", self.speed()))
            .centered()
            .render(score_area, buf);
        Line::from(Span::styled(
            format!("High: {} ", self.highscore()),
            consts::HIGHSCORE_STYLE,
        ))
        .right_aligned()
        .render(score_area, buf);

        let mut block_size = board.terminal_size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for food in self.foods() {
            let spec = food.kind().spec();
            let mut style = if food.pulsing() {
                Style::new().fg(spec.glow).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(spec.color)
            };
            if food.lifetime_ratio() < 0.5 {
                style = style.add_modifier(Modifier::DIM);
            }
            if let Some(pos) = board.cell_of(food.pos()) {
                canvas.draw_cell(pos, consts::FOOD_SYMBOL, style);
            }
        }
        for p in self.particles() {
            let (x, y) = p.position();
            let size = p.apparent_size();
            if size < 1.0 {
                continue;
            }
            let symbol = if size >= 4.0 {
                '*'
            } else if size >= 2.0 {
                '+'
            } else {
                '·'
            };
            let mut style = Style::new().fg(p.color());
            if p.alpha() < 0.5 {
                style = style.add_modifier(Modifier::DIM);
            }
            if let Some(pos) = board.column_of(x, y) {
                canvas.draw_char(pos, symbol, style);
            }
        }
        for &p in self.snake().body() {
            if let Some(pos) = board.cell_of(p) {
                canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
            }
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.running() {
            if let Some(pos) = board.cell_of(self.snake().head()) {
                canvas.draw_cell(pos, consts::SNAKE_HEAD_SYMBOL, consts::SNAKE_HEAD_STYLE);
            }
            Line::from_iter(legend()).render(status_area, buf);
        } else {
            if let Some(pos) = board.cell_of(board.clamp(self.snake().head())) {
                canvas.draw_cell(pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            }
            Line::styled("GAME OVER", consts::GAME_OVER_STYLE)
                .centered()
                .render(status_area, buf);
        }
    }
}

/// A key to the kinds of food and their values
fn legend() -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for kind in FoodKind::iter() {
        let spec = kind.spec();
        spans.push(Span::styled(
            String::from(consts::LEGEND_SYMBOL),
            Style::new().fg(spec.color),
        ));
        spans.push(Span::raw(format!(" {kind:?} {}   ", spec.score)));
    }
    spans
}

/// The interior of the board's border, addressed by grid cell or by terminal
/// column
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }

    /// Draw a grid cell, which is [`CELL_COLUMNS`][consts::CELL_COLUMNS]
    /// terminal columns wide
    fn draw_cell(&mut self, pos: Position, symbols: [char; 2], style: Style) {
        let x = pos.x.saturating_mul(consts::CELL_COLUMNS);
        for (dx, symbol) in (0..consts::CELL_COLUMNS).zip(symbols) {
            self.draw_char(
                Position {
                    x: x.saturating_add(dx),
                    y: pos.y,
                },
                symbol,
                style,
            );
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    /// The snake has hit a wall or itself, and the final frame is being
    /// shown
    Crashed,
    /// The crash has been shown and the round is finished
    Over,
}

#[cfg(test)]
mod tests {
    use super::board::Point;
    use super::*;
    use crate::util::buffer_rows;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A game on the default board whose only food is `foods`
    fn game_with(foods: Vec<Food>) -> Game<ChaCha12Rng> {
        let mut game = Game::new_with_rng(Globals::default(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.foods = foods;
        game
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn new_game() {
        let game = Game::new_with_rng(Globals::default(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(game.score(), 0);
        assert_eq!(game.highscore(), 0);
        assert_eq!(game.speed(), 15);
        assert_eq!(game.tick_period(), Duration::from_nanos(66_666_666));
        assert_eq!(game.foods().len(), 2);
        assert!(game.particles().is_empty());
        assert_eq!(game.snake().head(), Point::new(380, 200));
        assert_eq!(game.snake().direction(), None);
        for food in game.foods() {
            assert!(!game.snake().occupies(food.pos()));
            assert_eq!(food.pos().x % 20, 0);
            assert_eq!(food.pos().y % 20, 0);
        }
    }

    #[test]
    fn highscore_from_leaderboard() {
        let tmp = tempfile::tempdir().unwrap();
        let store = crate::leaderboard::LeaderboardStore::new(Some(tmp.path().join("lb.json")));
        let _ = store.save("Ada", 120);
        let globals = Globals {
            store,
            ..Globals::default()
        };
        let game = Game::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(game.highscore(), 120);
    }

    #[test]
    fn motionless_until_steered() {
        let mut game = game_with(Vec::new());
        game.advance();
        game.advance();
        assert_eq!(game.snake().head(), Point::new(380, 200));
        assert!(game.running());
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        assert_eq!(game.snake().head(), Point::new(400, 200));
        assert_eq!(game.snake().direction(), Some(Direction::East));
    }

    #[rstest]
    #[case(FoodKind::Normal, 10, 15)]
    #[case(FoodKind::Gold, 50, 15)]
    #[case(FoodKind::Speed, 20, 17)]
    #[case(FoodKind::Slow, 10, 13)]
    fn eat_food(#[case] kind: FoodKind, #[case] score: u32, #[case] speed: u32) {
        let mut game = game_with(vec![Food::new(Point::new(400, 200), kind)]);
        assert!(game.handle_event(key(KeyCode::Char('d'))).is_none());
        game.advance();
        assert_eq!(game.score(), score);
        assert_eq!(game.speed(), speed);
        assert!(game.foods().is_empty());
        assert_eq!(game.snake().max_len(), 2);
        assert_eq!(game.particles().len(), 15);
        for p in game.particles() {
            assert_eq!(p.position(), (410.0, 210.0));
            assert_eq!(p.color(), kind.spec().color);
        }
        assert!(game.running());
    }

    #[rstest]
    #[case(39, FoodKind::Speed, 40)]
    #[case(40, FoodKind::Speed, 40)]
    #[case(6, FoodKind::Slow, 5)]
    #[case(5, FoodKind::Slow, 5)]
    fn speed_is_clamped(#[case] before: u32, #[case] kind: FoodKind, #[case] after: u32) {
        let mut game = game_with(vec![Food::new(Point::new(380, 180), kind)]);
        game.speed = before;
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        game.advance();
        assert_eq!(game.speed(), after);
    }

    #[test]
    fn only_first_food_on_cell_is_eaten() {
        let mut game = game_with(vec![
            Food::new(Point::new(400, 200), FoodKind::Gold),
            Food::new(Point::new(400, 200), FoodKind::Normal),
        ]);
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        assert_eq!(game.score(), 50);
        assert_eq!(game.foods().len(), 1);
        assert_eq!(game.foods()[0].kind(), FoodKind::Normal);
    }

    #[test]
    fn wall_collision() {
        let mut game = game_with(Vec::new());
        game.snake = Snake::new(Point::new(740, 200));
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        assert_eq!(game.state, GameState::Crashed);
        assert_eq!(game.snake().head(), Point::new(760, 200));
        // Input is ignored once the snake has crashed
        assert!(game.handle_event(key(KeyCode::Up)).is_none());
        assert!(game.turns.is_empty());
    }

    #[test]
    fn self_collision() {
        let mut game = game_with(Vec::new());
        game.snake.head = Point::new(20, 40);
        game.snake.body = VecDeque::from([
            Point::new(20, 20),
            Point::new(40, 20),
            Point::new(40, 40),
            Point::new(20, 40),
        ]);
        game.snake.max_len = 5;
        game.snake.direction = Some(Direction::North);
        game.advance();
        assert_eq!(game.state, GameState::Crashed);
    }

    #[test]
    fn nothing_moves_after_crash() {
        let mut game = game_with(vec![Food::new(Point::new(100, 100), FoodKind::Normal)]);
        game.snake = Snake::new(Point::new(0, 0));
        assert!(game.handle_event(key(KeyCode::Left)).is_none());
        game.advance();
        assert_eq!(game.state, GameState::Crashed);
        let snake = game.snake.clone();
        let foods = game.foods.clone();
        for _ in 0..100 {
            game.advance();
        }
        assert_eq!(game.snake, snake);
        assert_eq!(game.foods, foods);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn most_recent_valid_turn_wins() {
        let mut game = game_with(Vec::new());
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        assert_eq!(game.snake().head(), Point::new(400, 200));
        for code in [KeyCode::Up, KeyCode::Down, KeyCode::Left] {
            assert!(game.handle_event(key(code)).is_none());
        }
        game.advance();
        assert_eq!(game.snake().direction(), Some(Direction::South));
        assert_eq!(game.snake().head(), Point::new(400, 220));
        assert!(game.turns.is_empty());
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = game_with(Vec::new());
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        assert!(game.handle_event(key(KeyCode::Left)).is_none());
        game.advance();
        assert_eq!(game.snake().direction(), Some(Direction::East));
        assert_eq!(game.snake().head(), Point::new(420, 200));
        assert!(game.running());
    }

    #[test]
    fn food_expires() {
        let mut game = game_with(vec![Food::new(Point::new(0, 0), FoodKind::Gold)]);
        // 80 ticks at 15 ticks per second is over five seconds
        for _ in 0..80 {
            game.advance();
        }
        assert!(game.running());
        // Two more food items will have been spawned by the timer
        assert_eq!(game.foods().len(), 2);
        assert!(game.foods().iter().all(|f| f.lifetime_ratio() > 0.0));
    }

    #[test]
    fn spawn_timer() {
        let mut game = game_with(Vec::new());
        game.spawn_timer = 1.99;
        game.advance();
        assert_eq!(game.foods().len(), 1);
        assert!(game.spawn_timer.abs() < f32::EPSILON);
    }

    #[test]
    fn spawn_timer_with_full_board() {
        let foods = (0..5)
            .map(|i| Food::new(Point::new(i * 20, 0), FoodKind::Normal))
            .collect();
        let mut game = game_with(foods);
        game.spawn_timer = 1.99;
        game.advance();
        assert_eq!(game.foods().len(), 5);
        assert!(game.spawn_timer > 2.0);
    }

    #[test]
    fn particles_burn_out() {
        let mut game = game_with(vec![Food::new(Point::new(40, 200), FoodKind::Normal)]);
        game.snake = Snake::new(Point::new(20, 200));
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        assert_eq!(game.particles().len(), 15);
        for _ in 0..25 {
            game.advance();
        }
        assert!(game.running());
        assert!(game.particles().is_empty());
    }

    #[test]
    fn quit() {
        let mut game = game_with(Vec::new());
        let event = Event::Key(crossterm::event::KeyEvent::new(
            KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        ));
        assert!(matches!(game.handle_event(event), Some(Screen::Terminated)));
    }

    #[test]
    fn crash_ends_round() {
        let mut game = game_with(Vec::new());
        game.score = 70;
        game.state = GameState::Crashed;
        let Some(Screen::RoundEnding(entry)) = game.on_deadline() else {
            panic!("Round did not end");
        };
        assert_eq!(entry.score(), 70);
        assert_eq!(game.state, GameState::Over);
    }

    #[test]
    fn render_running() {
        let mut game = game_with(vec![Food::new(Point::new(0, 0), FoodKind::Slow)]);
        game.foods[0].pulse = 0.0;
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let mut expected = vec![String::new(); 24];
        expected[0] = format!("  Score: 0{}Speed: 15{}High: 0", " ".repeat(25), " ".repeat(27));
        expected[1] = format!(" ┌{}┐", "─".repeat(76));
        for row in &mut expected[2..22] {
            *row = format!(" │{}│", " ".repeat(76));
        }
        expected[2] = format!(" │◖◗{}│", " ".repeat(74));
        expected[12] = format!(" │{}▐▌{}│", " ".repeat(38), " ".repeat(36));
        expected[22] = format!(" └{}┘", "─".repeat(76));
        expected[23] =
            String::from("  ● Normal 10   ● Gold 50   ● Speed 20   ● Slow 10");
        assert_eq!(buffer_rows(&buffer), expected);
        assert_eq!(buffer[(2, 2)].fg, FoodKind::Slow.spec().color);
        assert_eq!(buffer[(40, 12)].fg, consts::SNAKE_HEAD_STYLE.fg.unwrap());
        assert_eq!(buffer[(2, 23)].fg, FoodKind::Normal.spec().color);
        assert!(buffer[(5, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn render_wall_crash() {
        let mut game = game_with(Vec::new());
        game.snake = Snake::new(Point::new(740, 200));
        assert!(game.handle_event(key(KeyCode::Right)).is_none());
        game.advance();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let rows = buffer_rows(&buffer);
        assert_eq!(rows[12], format!(" │{}××│", " ".repeat(74)));
        assert_eq!(rows[23], format!("{}GAME OVER", " ".repeat(35)));
        assert_eq!(buffer[(76, 12)].modifier, consts::COLLISION_STYLE.add_modifier);
    }
}

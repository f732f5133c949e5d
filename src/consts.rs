//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default width of the playing field, in board units
pub(crate) const SCREEN_WIDTH: u16 = 760;

/// Default height of the playing field, in board units
pub(crate) const SCREEN_HEIGHT: u16 = 400;

/// Default side length of a grid cell, in board units.  The snake and all
/// food occupy exactly one cell.
pub(crate) const CELL_SIZE: u16 = 20;

/// Each grid cell is drawn this many terminal columns wide so that cells
/// look roughly square
pub(crate) const CELL_COLUMNS: u16 = 2;

/// Ticks per second at the start of a round
pub(crate) const INITIAL_SPEED: u32 = 15;

/// Slowest permitted tick rate
pub(crate) const MIN_SPEED: u32 = 5;

/// Fastest permitted tick rate
pub(crate) const MAX_SPEED: u32 = 40;

/// Target length of the snake's body at the start of a round
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 1;

/// How many cells the snake's target length increases by upon eating
pub(crate) const SNAKE_GROWTH: usize = 1;

/// Number of food items placed at the start of a round
pub(crate) const INITIAL_FOODS: usize = 2;

/// The spawn timer will not add food while this many items are alive
pub(crate) const MAX_FOODS: usize = 5;

/// Seconds between timed food spawns
pub(crate) const FOOD_SPAWN_INTERVAL: f32 = 2.0;

/// Seconds a food item stays on the board before vanishing
pub(crate) const FOOD_LIFETIME: f32 = 5.0;

/// Pulse phase added to a food item on every update
pub(crate) const FOOD_PULSE_STEP: f32 = 0.15;

/// How many random positions to try before placing food on an occupied cell
pub(crate) const PLACEMENT_ATTEMPTS: usize = 50;

/// Number of particles emitted when food is eaten
pub(crate) const PARTICLE_BURST: usize = 15;

/// Life lost by a particle on every update
pub(crate) const PARTICLE_DECAY: f32 = 0.05;

/// Factor applied to a particle's velocity on every update
pub(crate) const PARTICLE_DAMPING: f32 = 0.95;

/// How long the crash stays on screen before asking for a name
pub(crate) const CRASH_PAUSE: Duration = Duration::from_millis(750);

/// Interval at which the name entry cursor blinks
pub(crate) const CURSOR_BLINK: Duration = Duration::from_millis(500);

/// Maximum length of a player name, in characters
pub(crate) const MAX_NAME_LENGTH: usize = 15;

/// Name recorded when the player doesn't enter one
pub(crate) const DEFAULT_NAME: &str = "Player";

/// Number of entries kept on the leaderboard
pub(crate) const LEADERBOARD_SIZE: usize = 10;

/// Glyphs for a cell of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: [char; 2] = ['█', '█'];

/// Glyphs for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: [char; 2] = ['▐', '▌'];

/// Glyphs for a food item
pub(crate) const FOOD_SYMBOL: [char; 2] = ['◖', '◗'];

/// Glyphs for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: [char; 2] = ['×', '×'];

/// Glyph for the single food item shown in the legend
pub(crate) const LEGEND_SYMBOL: char = '●';

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Rgb(0, 255, 150));

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::Rgb(150, 255, 200))
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "High:" part of the score bar
pub(crate) const HIGHSCORE_STYLE: Style = Style::new().fg(Color::Rgb(255, 215, 0));

/// Style for the "GAME OVER" banner
pub(crate) const GAME_OVER_STYLE: Style = Style::new()
    .fg(Color::Rgb(255, 50, 50))
    .add_modifier(Modifier::BOLD);

/// Style for the name being typed in
pub(crate) const NAME_INPUT_STYLE: Style = Style::new().fg(Color::Rgb(255, 255, 100));

/// Style for hints at the bottom of pop-ups
pub(crate) const HINT_STYLE: Style = Style::new().fg(Color::Rgb(150, 150, 150));

/// Styles for the first three places on the leaderboard
pub(crate) const PODIUM_STYLES: [Style; 3] = [
    Style::new().fg(Color::Rgb(255, 215, 0)),
    Style::new().fg(Color::Rgb(192, 192, 192)),
    Style::new().fg(Color::Rgb(205, 127, 50)),
];

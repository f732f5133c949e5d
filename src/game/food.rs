use super::board::Point;
use crate::consts;
use enum_map::Enum;
use ratatui::style::Color;
use std::time::Duration;

/// The kinds of food that can appear on the board
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum FoodKind {
    Normal,
    Gold,
    Speed,
    Slow,
}

/// Fixed properties of a [`FoodKind`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpec {
    /// Main color used for the food and for the particles it bursts into
    pub(crate) color: Color,

    /// Color of the food's glow
    pub(crate) glow: Color,

    /// Points awarded for eating the food
    pub(crate) score: u32,

    /// Percentage chance of a newly-spawned food being of this kind.  The
    /// chances of all kinds add up to 100.
    pub(crate) chance: u32,

    /// Change to the snake's speed upon eating the food
    pub(crate) speed_mod: i32,
}

static NORMAL: FoodSpec = FoodSpec {
    color: Color::Rgb(255, 80, 80),
    glow: Color::Rgb(255, 120, 120),
    score: 10,
    chance: 70,
    speed_mod: 0,
};

static GOLD: FoodSpec = FoodSpec {
    color: Color::Rgb(255, 215, 0),
    glow: Color::Rgb(255, 255, 150),
    score: 50,
    chance: 10,
    speed_mod: 0,
};

static SPEED: FoodSpec = FoodSpec {
    color: Color::Rgb(0, 255, 255),
    glow: Color::Rgb(100, 255, 255),
    score: 20,
    chance: 10,
    speed_mod: 2,
};

static SLOW: FoodSpec = FoodSpec {
    color: Color::Rgb(180, 80, 255),
    glow: Color::Rgb(220, 120, 255),
    score: 10,
    chance: 10,
    speed_mod: -2,
};

impl FoodKind {
    pub(crate) fn iter() -> impl Iterator<Item = FoodKind> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    pub(crate) fn spec(self) -> &'static FoodSpec {
        match self {
            FoodKind::Normal => &NORMAL,
            FoodKind::Gold => &GOLD,
            FoodKind::Speed => &SPEED,
            FoodKind::Slow => &SLOW,
        }
    }
}

/// A food item lying on the board
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Food {
    pub(super) pos: Point,
    pub(super) kind: FoodKind,
    /// Seconds left before the food vanishes
    pub(super) timer: f32,
    /// Phase of the food's pulsing animation
    pub(super) pulse: f32,
}

impl Food {
    pub(crate) fn new(pos: Point, kind: FoodKind) -> Food {
        Food {
            pos,
            kind,
            timer: consts::FOOD_LIFETIME,
            pulse: 0.0,
        }
    }

    pub(crate) fn pos(&self) -> Point {
        self.pos
    }

    pub(crate) fn kind(&self) -> FoodKind {
        self.kind
    }

    /// Fraction of the food's lifetime still remaining, from 1.0 down to 0.0
    pub(crate) fn lifetime_ratio(&self) -> f32 {
        (self.timer / consts::FOOD_LIFETIME).clamp(0.0, 1.0)
    }

    /// Is the food at the bright end of its pulse?
    pub(crate) fn pulsing(&self) -> bool {
        self.pulse.sin() > 0.0
    }

    /// Age the food by `dt`.  Returns `false` once it has expired.
    pub(super) fn update(&mut self, dt: Duration) -> bool {
        self.timer -= dt.as_secs_f32();
        self.pulse += consts::FOOD_PULSE_STEP;
        self.timer > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chances_sum_to_100() {
        assert_eq!(FoodKind::iter().map(|k| k.spec().chance).sum::<u32>(), 100);
    }

    #[test]
    fn table_order() {
        assert_eq!(
            FoodKind::iter().collect::<Vec<_>>(),
            [
                FoodKind::Normal,
                FoodKind::Gold,
                FoodKind::Speed,
                FoodKind::Slow
            ]
        );
    }

    #[test]
    fn food_expires() {
        let mut food = Food::new(Point::new(0, 0), FoodKind::Gold);
        assert!(food.update(Duration::from_secs(2)));
        assert!(food.lifetime_ratio() > 0.59 && food.lifetime_ratio() < 0.61);
        assert!(food.update(Duration::from_secs(2)));
        assert!(!food.update(Duration::from_secs(1)));
        assert!(food.lifetime_ratio() < f32::EPSILON);
    }

    #[test]
    fn food_pulses() {
        let mut food = Food::new(Point::new(0, 0), FoodKind::Normal);
        assert!(!food.pulsing());
        assert!(food.update(Duration::from_millis(10)));
        assert!(food.pulsing());
    }
}

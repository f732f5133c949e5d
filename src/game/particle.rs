use crate::consts;
use rand::Rng;
use ratatui::style::Color;
use std::f32::consts::TAU;

/// A purely cosmetic spark thrown off when food is eaten
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Particle {
    pub(super) x: f32,
    pub(super) y: f32,
    pub(super) vx: f32,
    pub(super) vy: f32,
    pub(super) color: Color,
    /// Nominal size at full life, from 3 to 6
    pub(super) size: u8,
    /// Remaining life, from 1.0 down to 0.0
    pub(super) life: f32,
}

impl Particle {
    pub(super) fn new(x: f32, y: f32, color: Color, (vx, vy): (f32, f32), size: u8) -> Particle {
        Particle {
            x,
            y,
            vx,
            vy,
            color,
            size,
            life: 1.0,
        }
    }

    /// Create a particle at `(x, y)` flying off at a random angle
    pub(super) fn random<R: Rng>(rng: &mut R, x: f32, y: f32, color: Color) -> Particle {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(2.0..5.0);
        let size = rng.random_range(3..=6);
        Particle::new(
            x,
            y,
            color,
            (angle.cos() * speed, angle.sin() * speed),
            size,
        )
    }

    pub(crate) fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub(crate) fn color(&self) -> Color {
        self.color
    }

    /// Opacity of the particle, equal to its remaining life
    pub(crate) fn alpha(&self) -> f32 {
        self.life.max(0.0)
    }

    /// Current apparent size, shrinking as the particle dies
    pub(crate) fn apparent_size(&self) -> f32 {
        f32::from(self.size) * self.alpha()
    }

    /// Move the particle one tick.  Returns `false` once it has burnt out.
    pub(super) fn update(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= consts::PARTICLE_DECAY;
        self.vx *= consts::PARTICLE_DAMPING;
        self.vy *= consts::PARTICLE_DAMPING;
        self.life > 0.0
    }
}

//! Celebration particles shown when a game ends.
//!
//! The simulation runs in a fixed 600x600 field with y growing downwards and
//! is scaled onto whatever terminal area the canvas receives.

use std::f64::consts::TAU;

use derive_getters::Getters;
use derive_new::new;
use noughts_core::{Mark, Outcome};
use rand::Rng;
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    widgets::canvas::{Canvas, Circle},
};
use tracing::{debug, instrument};

/// Side length of the simulation field.
pub const FIELD_SIZE: f64 = 600.0;

/// Downward acceleration per frame.
pub const GRAVITY: f64 = 0.18;

/// Horizontal velocity retained per frame.
pub const DRAG: f64 = 0.995;

/// Fireworks launched per finished game.
pub const FIREWORKS_PER_SHOW: usize = 5;

const GOLD: (u8, u8, u8) = (253, 203, 110);
const TURQUOISE: (u8, u8, u8) = (129, 236, 236);
const SALMON: (u8, u8, u8) = (250, 127, 111);
const SKY_BLUE: (u8, u8, u8) = (116, 185, 255);
const NAVY: (u8, u8, u8) = (52, 73, 94);
const CLOUDS: (u8, u8, u8) = (236, 240, 241);

/// A single spark.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    color: (u8, u8, u8),
    lifetime: u32,
    size: u32,
    #[new(default)]
    age: u32,
}

impl Particle {
    /// Advances one frame.
    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.vx *= DRAG;
        self.age += 1;
    }

    /// True while the particle has life left.
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Drawn size, shrinking with remaining life and never below 1.
    pub fn current_size(&self) -> f64 {
        if !self.is_alive() {
            return 0.0;
        }
        let life_ratio = 1.0 - f64::from(self.age) / f64::from(self.lifetime);
        (f64::from(self.size) * life_ratio).floor().max(1.0)
    }
}

/// One explosion of particles.
#[derive(Debug, Clone, Getters)]
pub struct Firework {
    particles: Vec<Particle>,
}

impl Firework {
    /// Bursts 30 to 60 particles from `(x, y)` around `color`.
    pub fn explode<R: Rng + ?Sized>(x: f64, y: f64, color: (u8, u8, u8), rng: &mut R) -> Self {
        let count: usize = rng.random_range(30..=60);
        let particles = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..TAU);
                let speed = rng.random_range(2.0..8.0);
                let jittered = (
                    jitter(color.0, rng),
                    jitter(color.1, rng),
                    jitter(color.2, rng),
                );
                Particle::new(
                    x,
                    y,
                    angle.cos() * speed,
                    angle.sin() * speed,
                    jittered,
                    rng.random_range(45..=90),
                    rng.random_range(3..=8),
                )
            })
            .collect();
        Self { particles }
    }

    /// Advances every particle and drops the dead ones.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    /// True once every particle has burnt out.
    pub fn is_finished(&self) -> bool {
        self.particles.is_empty()
    }
}

fn jitter<R: Rng + ?Sized>(channel: u8, rng: &mut R) -> u8 {
    let shifted = i16::from(channel) + rng.random_range(-20..=20);
    shifted.clamp(0, 255) as u8
}

/// Palette for the outcome being celebrated.
pub fn palette(outcome: Outcome) -> [(u8, u8, u8); 2] {
    match outcome {
        Outcome::Win(Mark::X) => [GOLD, TURQUOISE],
        Outcome::Win(Mark::O) => [SALMON, SKY_BLUE],
        Outcome::Draw | Outcome::Ongoing => [NAVY, CLOUDS],
    }
}

/// Every firework currently on screen.
#[derive(Debug, Clone, Default, Getters)]
pub struct FireworkShow {
    fireworks: Vec<Firework>,
}

impl FireworkShow {
    /// Creates an empty show.
    pub fn new() -> Self {
        Self::default()
    }

    /// Launches five fireworks in the upper part of the field.
    #[instrument(skip(self, rng))]
    pub fn celebrate<R: Rng + ?Sized>(&mut self, outcome: Outcome, rng: &mut R) {
        let colors = palette(outcome);
        for _ in 0..FIREWORKS_PER_SHOW {
            let x = f64::from(rng.random_range(100..=500_u32));
            let y = f64::from(rng.random_range(100..=300_u32));
            let color = colors[rng.random_range(0..colors.len())];
            self.fireworks.push(Firework::explode(x, y, color, rng));
        }
        debug!(count = self.fireworks.len(), "Fireworks launched");
    }

    /// Advances one frame and drops finished fireworks.
    pub fn tick(&mut self) {
        for firework in &mut self.fireworks {
            firework.update();
        }
        self.fireworks.retain(|f| !f.is_finished());
    }

    /// True while anything is still burning.
    pub fn is_active(&self) -> bool {
        !self.fireworks.is_empty()
    }

    /// Removes every firework.
    pub fn clear(&mut self) {
        self.fireworks.clear();
    }

    /// Draws live particles onto a transparent canvas over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.is_active() {
            return;
        }
        let canvas = Canvas::default()
            .x_bounds([0.0, FIELD_SIZE])
            .y_bounds([0.0, FIELD_SIZE])
            .paint(|ctx| {
                for particle in self.fireworks.iter().flat_map(|f| f.particles.iter()) {
                    let (r, g, b) = particle.color;
                    ctx.draw(&Circle {
                        x: particle.x,
                        // Canvas y grows upwards.
                        y: FIELD_SIZE - particle.y,
                        radius: particle.current_size(),
                        color: Color::Rgb(r, g, b),
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

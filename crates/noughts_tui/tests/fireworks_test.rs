//! Tests for the celebration particle system.

use noughts_core::{Mark, Outcome};
use noughts_tui::{FIREWORKS_PER_SHOW, Firework, FireworkShow, palette};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_explosion_parameters_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let firework = Firework::explode(300.0, 200.0, (250, 10, 245), &mut rng);
        let particles = firework.particles();
        assert!((30..=60).contains(&particles.len()));
        for p in particles {
            assert!((45..=90).contains(p.lifetime()));
            assert!((3..=8).contains(p.size()));
            let speed = (p.vx().powi(2) + p.vy().powi(2)).sqrt();
            assert!((2.0 - 1e-9..8.0 + 1e-9).contains(&speed), "speed {}", speed);
            let (r, g, b) = *p.color();
            assert!((230..=255).contains(&r));
            assert!(g <= 30);
            assert!((225..=255).contains(&b));
        }
    }
}

#[test]
fn test_show_launches_five_and_burns_out() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut show = FireworkShow::new();
    show.celebrate(Outcome::Win(Mark::O), &mut rng);
    assert_eq!(show.fireworks().len(), FIREWORKS_PER_SHOW);

    let colors = palette(Outcome::Win(Mark::O));
    for firework in show.fireworks() {
        for p in firework.particles() {
            let (x, y) = (*p.x(), *p.y());
            assert!((100.0..=500.0).contains(&x));
            assert!((100.0..=300.0).contains(&y));
            let near = colors.iter().any(|c| {
                let (r, g, b) = *p.color();
                (i16::from(r) - i16::from(c.0)).abs() <= 20
                    && (i16::from(g) - i16::from(c.1)).abs() <= 20
                    && (i16::from(b) - i16::from(c.2)).abs() <= 20
            });
            assert!(near);
        }
    }

    // No particle lives longer than 90 frames.
    show.tick();
    assert!(show.is_active());
    for _ in 1..90 {
        show.tick();
    }
    assert!(!show.is_active());
}

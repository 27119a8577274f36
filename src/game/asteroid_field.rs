use glam::{vec2, Vec2};
use rand::Rng;
use crate::config::GameConfig;
use crate::game::components::{AsteroidTier, MovingBody};
use crate::math_utils::Rotate2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScreenEdge {
    Left,
    Right,
    Top,
    Bottom
}

impl ScreenEdge {
    pub const ALL: [ScreenEdge; 4] = [ScreenEdge::Left, ScreenEdge::Right, ScreenEdge::Top, ScreenEdge::Bottom];

    pub fn inward_direction(self) -> Vec2 {
        match self {
            ScreenEdge::Left => vec2(1.0, 0.0),
            ScreenEdge::Right => vec2(-1.0, 0.0),
            ScreenEdge::Top => vec2(0.0, 1.0),
            ScreenEdge::Bottom => vec2(0.0, -1.0)
        }
    }

    /// A point `along` (0..1) this edge, pushed `radius` off screen
    pub fn spawn_position(self, along: f32, radius: f32, width: f32, height: f32) -> Vec2 {
        match self {
            ScreenEdge::Left => vec2(-radius, along * height),
            ScreenEdge::Right => vec2(width + radius, along * height),
            ScreenEdge::Top => vec2(along * width, -radius),
            ScreenEdge::Bottom => vec2(along * width, height + radius)
        }
    }
}

/// Spawn timer for new large asteroids. It owns none of them.
#[derive(Default, Debug, Clone)]
pub struct AsteroidField {
    spawn_timer: f32
}

impl AsteroidField {
    pub fn reset(&mut self) {
        self.spawn_timer = 0.0;
    }

    /// Advances the timer and returns how many asteroids are due. Leftover time is kept.
    pub fn tick(&mut self, dt: f32, spawn_interval: f32) -> u32 {
        self.spawn_timer += dt;
        let mut due = 0;
        while self.spawn_timer >= spawn_interval {
            self.spawn_timer -= spawn_interval;
            due += 1;
        }
        due
    }

    /// Body of a new large asteroid entering the screen from a random edge
    pub fn plan_spawn(config: &GameConfig, rng: &mut impl Rng) -> MovingBody {
        let field = &config.asteroid_field;
        let edge = ScreenEdge::ALL[rng.gen_range(0..ScreenEdge::ALL.len())];
        let along = rng.gen::<f32>();
        let speed = rng.gen_range(field.min_speed..=field.max_speed);
        let jitter = rng.gen_range(-field.direction_jitter..=field.direction_jitter);

        let radius = AsteroidTier::Large.radius(config.asteroid.min_radius);
        let position = edge.spawn_position(
            along,
            radius,
            config.screen.width as f32,
            config.screen.height as f32
        );
        let velocity = edge.inward_direction().rotated_deg(jitter) * speed;
        MovingBody::new(position, velocity, radius)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use super::*;

    #[test]
    fn timer_fires_once_per_interval_and_keeps_leftover() {
        let mut field = AsteroidField::default();
        assert_eq!(field.tick(0.5, 0.8), 0);
        assert_eq!(field.tick(0.5, 0.8), 1);
        assert_eq!(field.tick(0.5, 0.8), 0);
        assert_eq!(field.tick(0.5, 0.8), 1);
        assert_eq!(field.tick(1.9, 0.8), 2);
    }

    #[test]
    fn infinite_interval_never_fires() {
        let mut field = AsteroidField::default();
        for _ in 0..100 {
            assert_eq!(field.tick(1000.0, f32::INFINITY), 0);
        }
    }

    #[test]
    fn spawns_start_off_screen_and_head_inside() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let (width, height) = (config.screen.width as f32, config.screen.height as f32);
        let radius = AsteroidTier::Large.radius(config.asteroid.min_radius);

        for _ in 0..200 {
            let body = AsteroidField::plan_spawn(&config, &mut rng);
            assert_eq!(body.radius, radius);

            let speed = body.velocity.length();
            assert!(speed >= config.asteroid_field.min_speed - 1e-3);
            assert!(speed <= config.asteroid_field.max_speed + 1e-3);

            let center = vec2(width / 2.0, height / 2.0);
            let on_left_or_right = body.position.x == -radius || body.position.x == width + radius;
            let on_top_or_bottom = body.position.y == -radius || body.position.y == height + radius;
            assert!(on_left_or_right || on_top_or_bottom);
            assert!(!body.is_outside(width, height));

            let edge_normal = if on_left_or_right {
                vec2((center.x - body.position.x).signum(), 0.0)
            } else {
                vec2(0.0, (center.y - body.position.y).signum())
            };
            let cos_to_normal = body.velocity.normalize().dot(edge_normal);
            assert!(cos_to_normal >= config.asteroid_field.direction_jitter.to_radians().cos() - 1e-4);
        }
    }
}

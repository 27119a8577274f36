use flat_spatial::grid::GridHandle;
use glam::Vec2;
use crate::config::AsteroidConfig;
use crate::math_utils::Rotate2;

/// Anything that moves on the field: the player, asteroids and shots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovingBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Degrees, 0 looks up the screen
    pub rotation: f32
}

impl MovingBody {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            rotation: 0.0
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Circle against circle. Touching is not colliding.
    ///
    /// There is no sweep, so fast and small bodies may pass through each other between frames.
    pub fn collides_with(&self, other: &MovingBody) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// True once the whole circle left the `width` x `height` screen
    pub fn is_outside(&self, width: f32, height: f32) -> bool {
        self.position.x + self.radius < 0.0 ||
            self.position.x - self.radius > width ||
            self.position.y + self.radius < 0.0 ||
            self.position.y - self.radius > height
    }

    /// Teleports a body which left the screen to the opposite border
    pub fn wrap_around(&mut self, width: f32, height: f32) {
        let (x_correction, y_correction) = (width + self.radius * 2.0, height + self.radius * 2.0);

        if self.position.x > width + self.radius {
            self.position.x -= x_correction;
        } else if self.position.x < -self.radius {
            self.position.x += x_correction;
        }

        if self.position.y > height + self.radius {
            self.position.y -= y_correction;
        } else if self.position.y < -self.radius {
            self.position.y += y_correction;
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AsteroidTier {
    Small,
    Medium,
    Large
}

impl AsteroidTier {
    pub fn number(self) -> u8 {
        match self {
            AsteroidTier::Small => 1,
            AsteroidTier::Medium => 2,
            AsteroidTier::Large => 3
        }
    }

    pub fn radius(self, min_radius: f32) -> f32 {
        min_radius * self.number() as f32
    }

    pub fn points(self) -> u32 {
        match self {
            AsteroidTier::Small => 100,
            AsteroidTier::Medium => 50,
            AsteroidTier::Large => 20
        }
    }

    pub fn smaller(self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Small => None,
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Large => Some(AsteroidTier::Medium)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Asteroid {
    pub tier: AsteroidTier
}

impl Asteroid {
    /// Two children of the next smaller tier flying apart by `angle_deg` to both sides of the
    /// parent's course, or nothing if this asteroid is already of the smallest tier.
    pub fn split(
        &self,
        body: &MovingBody,
        angle_deg: f32,
        config: &AsteroidConfig
    ) -> Option<[(Asteroid, MovingBody); 2]> {
        let tier = self.tier.smaller()?;
        let radius = tier.radius(config.min_radius);
        let make_child = |angle: f32| {
            let velocity = body.velocity.rotated_deg(angle) * config.split_speed_multiplier;
            (Asteroid { tier }, MovingBody::new(body.position, velocity, radius))
        };
        Some([make_child(angle_deg), make_child(-angle_deg)])
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Player;

#[derive(Copy, Clone, Debug)]
pub struct Shot;

/// Seconds until the next shot is allowed
#[derive(Copy, Clone, Debug)]
pub struct FireCoolDown(pub f32);

/// Seconds until the entity is removed
#[derive(Copy, Clone, Debug)]
pub struct LifeSpan(pub f32);

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct SpatialHandle {
    pub handle: GridHandle
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec2;
    use crate::math_utils::{angle_between_deg, CrossProduct2};
    use super::*;

    fn body_at(x: f32, y: f32, radius: f32) -> MovingBody {
        MovingBody::new(vec2(x, y), Vec2::ZERO, radius)
    }

    #[test]
    fn advance_is_pure_translation() {
        let mut body = MovingBody::new(vec2(0.0, 0.0), vec2(100.0, 0.0), 30.0);
        body.advance(1.0);
        assert_eq!(body.position, vec2(100.0, 0.0));
        assert_eq!(body.velocity, vec2(100.0, 0.0));
    }

    #[test]
    fn touching_circles_do_not_collide() {
        let a = body_at(0.0, 0.0, 10.0);
        let b = body_at(30.0, 0.0, 20.0);
        assert!(!a.collides_with(&b));
        assert!(!b.collides_with(&a));
    }

    #[test]
    fn overlapping_circles_collide_both_ways() {
        let a = body_at(0.0, 0.0, 10.0);
        let b = body_at(29.5, 0.0, 20.0);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));

        let c = body_at(5.0, 5.0, 1.0);
        assert!(a.collides_with(&c));
        assert!(c.collides_with(&a));
    }

    #[test]
    fn far_circles_do_not_collide() {
        let a = body_at(-50.0, 10.0, 3.0);
        let b = body_at(50.0, 10.0, 3.0);
        assert_eq!(a.collides_with(&b), b.collides_with(&a));
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn outside_means_fully_outside() {
        assert!(!body_at(-10.0, 50.0, 10.0).is_outside(100.0, 100.0));
        assert!(body_at(-10.5, 50.0, 10.0).is_outside(100.0, 100.0));
        assert!(!body_at(50.0, 110.0, 10.0).is_outside(100.0, 100.0));
        assert!(body_at(50.0, 111.0, 10.0).is_outside(100.0, 100.0));
    }

    #[test]
    fn wrap_around_moves_to_opposite_border() {
        let mut body = body_at(115.0, 50.0, 10.0);
        body.wrap_around(100.0, 100.0);
        assert_relative_eq!(body.position.x, -5.0);
        assert_relative_eq!(body.position.y, 50.0);

        let mut body = body_at(50.0, -11.0, 10.0);
        body.wrap_around(100.0, 100.0);
        assert_relative_eq!(body.position.y, 109.0);
    }

    #[test]
    fn tier_radius_is_a_multiple_of_the_smallest_one() {
        assert_eq!(AsteroidTier::Small.radius(10.0), 10.0);
        assert_eq!(AsteroidTier::Medium.radius(10.0), 20.0);
        assert_eq!(AsteroidTier::Large.radius(10.0), 30.0);
        assert_eq!(AsteroidTier::Large.smaller(), Some(AsteroidTier::Medium));
        assert_eq!(AsteroidTier::Medium.smaller(), Some(AsteroidTier::Small));
        assert_eq!(AsteroidTier::Small.smaller(), None);
    }

    #[test]
    fn split_makes_two_diverging_children() {
        let config = AsteroidConfig::default();
        let parent = Asteroid { tier: AsteroidTier::Large };
        let body = MovingBody::new(vec2(40.0, 60.0), vec2(30.0, -10.0), 30.0);

        let children = parent.split(&body, 35.0, &config).unwrap();

        for (child, child_body) in children.iter() {
            assert_eq!(child.tier, AsteroidTier::Medium);
            assert_eq!(child_body.position, body.position);
            assert_eq!(child_body.radius, AsteroidTier::Medium.radius(config.min_radius));
            assert_relative_eq!(
                child_body.velocity.length(),
                body.velocity.length() * config.split_speed_multiplier,
                epsilon = 1e-3
            );
            assert_relative_eq!(angle_between_deg(body.velocity, child_body.velocity), 35.0, epsilon = 1e-2);
        }

        let left = body.velocity.cross2(children[0].1.velocity);
        let right = body.velocity.cross2(children[1].1.velocity);
        assert!(left * right < 0.0);
    }

    #[test]
    fn smallest_tier_does_not_split() {
        let config = AsteroidConfig::default();
        let parent = Asteroid { tier: AsteroidTier::Small };
        let body = MovingBody::new(vec2(0.0, 0.0), vec2(10.0, 0.0), 10.0);
        assert!(parent.split(&body, 30.0, &config).is_none());
    }
}

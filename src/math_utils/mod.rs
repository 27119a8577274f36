use glam::{vec2, Vec2};

/// Rotation of 2d vectors by an angle given in degrees.
///
/// Screen space has y pointing down, so a positive angle turns clockwise on screen.
pub trait Rotate2 where Self: Copy {
    fn rotated_deg(self, degrees: f32) -> Self;
}

impl Rotate2 for Vec2 {
    fn rotated_deg(self, degrees: f32) -> Self {
        let (sn, cs) = degrees.to_radians().sin_cos();
        vec2(
            self.x * cs - self.y * sn,
            self.x * sn + self.y * cs
        )
    }
}

pub trait CrossProduct2 where Self: Copy {
    fn cross2(self, other: Self) -> f32;
}

impl CrossProduct2 for Vec2 {
    fn cross2(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

pub trait CapLength where Self: Copy {
    fn capped_length(self, max_length: f32) -> Self;
}

impl CapLength for Vec2 {
    fn capped_length(self, max_length: f32) -> Self {
        let length = self.length();
        if length > max_length && length > 0.0 {
            self * (max_length / length)
        } else {
            self
        }
    }
}

/// Unit vector a body with the given rotation looks at. Rotation 0 looks up the screen.
pub fn heading(rotation_deg: f32) -> Vec2 {
    vec2(0.0, -1.0).rotated_deg(rotation_deg)
}

/// Unsigned angle between two vectors in degrees, 0 if any of them is zero
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    if a.length_squared() == 0.0 || b.length_squared() == 0.0 {
        return 0.0;
    }
    a.cross2(b).atan2(a.dot(b)).abs().to_degrees()
}

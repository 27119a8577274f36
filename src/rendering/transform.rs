use glam::{Mat3A, Vec2};

/// Scale, then rotation (degrees, clockwise on screen), then translation
#[derive(Copy, Clone, Debug)]
pub struct Transform {
    matrix: Mat3A
}

impl Transform {
    pub fn from_identity() -> Transform {
        Self { matrix: Mat3A::IDENTITY }
    }

    pub fn from_angle_translation_scale(angle: f32, translation: Vec2, scale: f32) -> Self {
        Self {
            matrix: Mat3A::from_translation(translation) *
                Mat3A::from_angle(angle.to_radians()) *
                Mat3A::from_scale(Vec2::splat(scale))
        }
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.matrix.transform_point2(point)
    }
}

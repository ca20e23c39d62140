use glam::{Mat4, Vec2};

/// Uniform block of the sprite shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteGlobals {
    pub projection: [[f32; 4]; 4],
}

/// Screen-space camera: one unit per pixel of the logical screen, origin in
/// the top-left corner, y growing downwards.
pub struct Camera2D {
    pub width: f32,
    pub height: f32,
}

impl Camera2D {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, -1.0, 1.0)
    }

    pub fn uniform(&self) -> SpriteGlobals {
        SpriteGlobals {
            projection: self.projection().to_cols_array_2d(),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_projection_maps_screen_corners() {
        let camera = Camera2D::new(800, 600);
        let proj = camera.projection();
        let top_left = proj.project_point3(Vec3::ZERO);
        let bottom_right = proj.project_point3(Vec3::new(800.0, 600.0, 0.0));
        assert!((top_left.x + 1.0).abs() < 1e-6 && (top_left.y - 1.0).abs() < 1e-6);
        assert!((bottom_right.x - 1.0).abs() < 1e-6 && (bottom_right.y + 1.0).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&top_left.z), "Depth inside the clip volume");
    }
}

//! The backdrop camera.
//!
//! A fixed-position perspective camera whose orientation eases towards a
//! pointer-driven target and whose distance follows the page scroll. The
//! camera never reads input itself: the stage feeds it pointer and scroll
//! values and calls [`Camera::update`] once per frame.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4};

use crate::{stage::Fog, utils::smooth_towards};

/// wgpu uses a 0..1 depth range where cgmath's projections produce -1..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    /// Current `(pitch, yaw)` in radians.
    pub rotation: (f32, f32),
    /// Where `rotation` is heading.
    pub target_rotation: (f32, f32),
    pub projection: Projection,
    smoothing: f32,
    pointer_scale: f32,
    base_z: f32,
    scroll_depth: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            rotation: (0.0, 0.0),
            target_rotation: (0.0, 0.0),
            projection: Projection::new(width, height, cgmath::Deg(75.0), 0.1, 1000.0),
            smoothing: 0.05,
            pointer_scale: 0.1,
            base_z: 5.0,
            scroll_depth: 2.0,
        }
    }

    /// Overrides the motion parameters; resets the camera onto `base_z`.
    pub fn with_motion(mut self, smoothing: f32, pointer_scale: f32, base_z: f32, scroll_depth: f32) -> Self {
        self.smoothing = smoothing;
        self.pointer_scale = pointer_scale;
        self.base_z = base_z;
        self.scroll_depth = scroll_depth;
        self.position.z = base_z;
        self
    }

    /// Pointer in normalised device coordinates, y pointing up.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.target_rotation = (y * self.pointer_scale, x * self.pointer_scale);
    }

    /// `fraction` is the scroll position in `0.0..=1.0`.
    pub fn set_scroll(&mut self, fraction: f32) {
        self.position.z = self.base_z + fraction * self.scroll_depth;
    }

    pub fn update(&mut self) {
        self.rotation.0 = smooth_towards(self.rotation.0, self.target_rotation.0, self.smoothing);
        self.rotation.1 = smooth_towards(self.rotation.1, self.target_rotation.1, self.smoothing);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Camera-to-world matrix: translation, then pitch about X, then yaw about Y.
    pub fn world_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position.to_vec())
            * Matrix4::from_angle_x(Rad(self.rotation.0))
            * Matrix4::from_angle_y(Rad(self.rotation.1))
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.world_matrix()
            .invert()
            .unwrap_or_else(Matrix4::identity)
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection.calc_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalised device coordinates.
    pub fn ray_from_ndc(&self, x: f32, y: f32) -> Ray {
        let inverse = self.view_proj().invert().unwrap_or_else(Matrix4::identity);
        let unproject = |z: f32| {
            let p = inverse * Vector4::new(x, y, z, 1.0);
            p.truncate() / p.w
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        Ray {
            origin: near,
            direction: (far - near).normalize(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// The same ray expressed in the space `matrix` maps into.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Ray {
        let origin = matrix * self.origin.extend(1.0);
        let direction = matrix * self.direction.extend(0.0);
        Ray {
            origin: origin.truncate() / origin.w,
            direction: direction.truncate(),
        }
    }

    /// Slab test; returns the distance along the ray to the entry point.
    pub fn intersect_aabb(&self, min: Vector3<f32>, max: Vector3<f32>) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let (o, d, lo, hi) = (self.origin[axis], self.direction[axis], min[axis], max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let (a, b) = ((lo - o) / d, (hi - o) / d);
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
            if t_min > t_max {
                return None;
            }
        }
        (t_max >= 0.0).then_some(t_min.max(0.0))
    }
}

/**
 * Per-frame uniform shared by every pipeline: camera matrices, the camera
 * position, the fog and the scene clock.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub fog_color: [f32; 4],
    // fog near, fog far, elapsed seconds, unused
    pub params: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
            view: Matrix4::identity().into(),
            proj: Matrix4::identity().into(),
            view_position: [0.0; 4],
            fog_color: [0.0; 4],
            params: [0.0; 4],
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view = camera.view_matrix().into();
        self.proj = (OPENGL_TO_WGPU_MATRIX * camera.projection.calc_matrix()).into();
        self.view_proj = camera.view_proj().into();
    }

    pub fn update_fog(&mut self, fog: &Fog, time: f32) {
        self.fog_color = [fog.color.r, fog.color.g, fog.color.b, 1.0];
        self.params = [fog.near, fog.far, time, 0.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

//! The backdrop's light rig: a dim ambient term, two orbiting point lights
//! and a static purple spot light.

use cgmath::Vector3;

use crate::utils::color::Color3;

#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub color: Color3,
    pub intensity: f32,
    /// Range after which the light has no effect; `0` means unlimited.
    pub distance: f32,
    pub position: Vector3<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    pub color: Color3,
    pub intensity: f32,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub penumbra: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: Color3,
    pub ambient_intensity: f32,
    pub points: [PointLight; 2],
    pub spot: SpotLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: Color3::from_hex(0x404040),
            ambient_intensity: 0.5,
            points: [
                PointLight {
                    color: Color3::from_hex(0x00f0ff),
                    intensity: 2.0,
                    distance: 20.0,
                    position: Vector3::new(-5.0, 5.0, 5.0),
                },
                PointLight {
                    color: Color3::from_hex(0xff00ff),
                    intensity: 2.0,
                    distance: 20.0,
                    position: Vector3::new(5.0, -5.0, 5.0),
                },
            ],
            spot: SpotLight {
                color: Color3::from_hex(0xb000ff),
                intensity: 1.0,
                position: Vector3::new(0.0, 10.0, 10.0),
                target: Vector3::new(0.0, 0.0, 0.0),
                angle: std::f32::consts::PI / 6.0,
                penumbra: 0.5,
            },
        }
    }
}

impl LightRig {
    /// Moves the two point lights along their circles; z is left alone.
    pub fn animate(&mut self, time: f32) {
        let [cyan, magenta] = &mut self.points;
        cyan.position.x = (time * 0.5).sin() * 5.0;
        cyan.position.y = (time * 0.5).cos() * 5.0;

        magenta.position.x = (time * 0.7).cos() * 5.0;
        magenta.position.y = (time * 0.7).sin() * 5.0;
    }

    pub fn to_raw(&self) -> LightsRaw {
        let point = |light: &PointLight| PointLightRaw {
            position: [
                light.position.x,
                light.position.y,
                light.position.z,
                light.distance,
            ],
            color: [light.color.r, light.color.g, light.color.b, light.intensity],
        };
        let spot = &self.spot;
        let direction = spot.target - spot.position;
        let length = (direction.x * direction.x
            + direction.y * direction.y
            + direction.z * direction.z)
            .sqrt()
            .max(f32::EPSILON);
        let outer = spot.angle.cos();
        let inner = (spot.angle * (1.0 - spot.penumbra)).cos();
        LightsRaw {
            ambient: [
                self.ambient.r * self.ambient_intensity,
                self.ambient.g * self.ambient_intensity,
                self.ambient.b * self.ambient_intensity,
                0.0,
            ],
            points: [point(&self.points[0]), point(&self.points[1])],
            spot_position: [spot.position.x, spot.position.y, spot.position.z, 0.0],
            spot_direction: [
                direction.x / length,
                direction.y / length,
                direction.z / length,
                0.0,
            ],
            spot_color: [spot.color.r, spot.color.g, spot.color.b, spot.intensity],
            spot_cone: [outer, inner, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    // xyz + range
    pub position: [f32; 4],
    // rgb + intensity
    pub color: [f32; 4],
}

/// Uniform layout of the light rig. Every member is a vec4 so the struct
/// needs no manual padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsRaw {
    pub ambient: [f32; 4],
    pub points: [PointLightRaw; 2],
    pub spot_position: [f32; 4],
    pub spot_direction: [f32; 4],
    pub spot_color: [f32; 4],
    pub spot_cone: [f32; 4],
}

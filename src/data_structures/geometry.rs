//! Procedural geometry for the decorative section objects.
//!
//! Everything the sections draw is generated here: boxes, planes, the four
//! platonic solids, edge outlines, line segments and the floor grid. Solids
//! are flat shaded (each face owns its vertices) like the look they mimic.

use std::collections::HashMap;

use cgmath::{InnerSpace, Vector3};

use crate::utils::color::Color3;

/// Vertex layout shared by every mesh and line pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 3],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
            color: [1.0; 3],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    Triangles,
    Lines,
}

/// CPU-side vertex and index data of one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
        // (normal, u axis, v axis) per face
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let half = Vector3::new(hx, hy, hz);
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let n = Vector3::from(normal);
            let u = Vector3::from(u);
            let v = Vector3::from(v);
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = n + u * su + v * sv;
                let position = [p.x * half.x, p.y * half.y, p.z * half.z];
                let uv = [(su + 1.0) / 2.0, 1.0 - (sv + 1.0) / 2.0];
                vertices.push(MeshVertex::new(position, normal, uv));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self {
            vertices,
            indices,
            topology: Topology::Triangles,
        }
    }

    /// A plane in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hx, hy) = (width / 2.0, height / 2.0);
        let n = [0.0, 0.0, 1.0];
        let vertices = vec![
            MeshVertex::new([-hx, -hy, 0.0], n, [0.0, 1.0]),
            MeshVertex::new([hx, -hy, 0.0], n, [1.0, 1.0]),
            MeshVertex::new([hx, hy, 0.0], n, [1.0, 0.0]),
            MeshVertex::new([-hx, hy, 0.0], n, [0.0, 0.0]),
        ];
        Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            topology: Topology::Triangles,
        }
    }

    pub fn tetrahedron(radius: f32) -> Self {
        let points = [
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
        ];
        let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
        polyhedron(&points, &faces, radius)
    }

    pub fn octahedron(radius: f32) -> Self {
        let points = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let faces = [
            [0, 2, 4],
            [0, 4, 3],
            [0, 3, 5],
            [0, 5, 2],
            [1, 2, 5],
            [1, 5, 3],
            [1, 3, 4],
            [1, 4, 2],
        ];
        polyhedron(&points, &faces, radius)
    }

    pub fn icosahedron(radius: f32) -> Self {
        let (points, faces) = icosahedron_mesh();
        polyhedron(&points, &faces, radius)
    }

    /// Built as the dual of the icosahedron: one pentagon per icosahedron
    /// vertex, spanned by the centroids of its five surrounding faces.
    pub fn dodecahedron(radius: f32) -> Self {
        let (points, faces) = icosahedron_mesh();
        let centroids: Vec<Vector3<f32>> = faces
            .iter()
            .map(|f| {
                let sum = f
                    .iter()
                    .map(|&i| Vector3::from(points[i]))
                    .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p);
                (sum / 3.0).normalize()
            })
            .collect();

        let out_points: Vec<[f32; 3]> = centroids.iter().map(|c| (*c).into()).collect();
        let mut out_faces = Vec::with_capacity(36);
        for (vi, p) in points.iter().enumerate() {
            let axis = Vector3::from(*p).normalize();
            let mut ring: Vec<usize> = faces
                .iter()
                .enumerate()
                .filter(|(_, f)| f.contains(&vi))
                .map(|(fi, _)| fi)
                .collect();
            // order the pentagon around its axis
            let reference = (centroids[ring[0]] - axis * centroids[ring[0]].dot(axis)).normalize();
            let binormal = axis.cross(reference);
            ring.sort_by(|a, b| {
                let angle = |i: usize| {
                    let d = centroids[i];
                    d.dot(binormal).atan2(d.dot(reference))
                };
                angle(*a).total_cmp(&angle(*b))
            });
            for k in 1..ring.len() - 1 {
                out_faces.push([ring[0], ring[k], ring[k + 1]]);
            }
        }
        polyhedron(&out_points, &out_faces, radius)
    }

    /// Connected segments through `points`, in order.
    pub fn polyline(points: &[Vector3<f32>]) -> Self {
        let vertices = points
            .iter()
            .map(|p| MeshVertex::new((*p).into(), [0.0; 3], [0.0; 2]))
            .collect::<Vec<_>>();
        let indices = (1..points.len() as u32)
            .flat_map(|i| [i - 1, i])
            .collect();
        Self {
            vertices,
            indices,
            topology: Topology::Lines,
        }
    }

    /// Square grid on the XZ plane; the middle lines use `center_color`.
    pub fn grid(size: f32, divisions: u32, center_color: Color3, grid_color: Color3) -> Self {
        let half = size / 2.0;
        let step = size / divisions as f32;
        let center = divisions / 2;
        let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            let color = if i == center { center_color } else { grid_color };
            for position in [[-half, 0.0, k], [half, 0.0, k], [k, 0.0, -half], [k, 0.0, half]] {
                let mut vertex = MeshVertex::new(position, [0.0, 1.0, 0.0], [0.0; 2]);
                vertex.color = color.into();
                vertices.push(vertex);
            }
        }
        let indices = (0..vertices.len() as u32).collect();
        Self {
            vertices,
            indices,
            topology: Topology::Lines,
        }
    }

    /// Outline of the hard edges of a triangle geometry: edges with a single
    /// adjacent face or whose faces meet at more than one degree.
    pub fn edges(&self) -> Self {
        const THRESHOLD_DOT: f32 = 0.999_847_7; // cos(1 deg)
        let mut merged: HashMap<[i32; 3], u32> = HashMap::new();
        let mut points: Vec<[f32; 3]> = Vec::new();
        let mut key_of = |p: [f32; 3]| -> u32 {
            let key = p.map(|c| (c * 1e4).round() as i32);
            *merged.entry(key).or_insert_with(|| {
                points.push(p);
                (points.len() - 1) as u32
            })
        };

        let mut adjacency: HashMap<(u32, u32), Vec<Vector3<f32>>> = HashMap::new();
        let mut order: Vec<(u32, u32)> = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            let p: Vec<[f32; 3]> = tri
                .iter()
                .map(|&i| self.vertices[i as usize].position)
                .collect();
            let normal = face_normal(p[0], p[1], p[2]);
            let ids = [key_of(p[0]), key_of(p[1]), key_of(p[2])];
            for (a, b) in [(ids[0], ids[1]), (ids[1], ids[2]), (ids[2], ids[0])] {
                let edge = (a.min(b), a.max(b));
                adjacency
                    .entry(edge)
                    .or_insert_with(|| {
                        order.push(edge);
                        Vec::new()
                    })
                    .push(normal);
            }
        }

        let vertices = points
            .iter()
            .map(|p| MeshVertex::new(*p, [0.0; 3], [0.0; 2]))
            .collect();
        let indices = order
            .into_iter()
            .filter(|edge| match adjacency[edge].as_slice() {
                [_] => true,
                [n1, n2, ..] => n1.dot(*n2) <= THRESHOLD_DOT,
                [] => false,
            })
            .flat_map(|(a, b)| [a, b])
            .collect();
        Self {
            vertices,
            indices,
            topology: Topology::Lines,
        }
    }

    /// Every triangle edge once, as a line index list over the same vertices.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        match self.topology {
            Topology::Lines => self.indices.clone(),
            Topology::Triangles => {
                let mut seen = std::collections::HashSet::new();
                let mut lines = Vec::new();
                for tri in self.indices.chunks_exact(3) {
                    for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                        if seen.insert((a.min(b), a.max(b))) {
                            lines.extend_from_slice(&[a, b]);
                        }
                    }
                }
                lines
            }
        }
    }

    /// Axis-aligned bounds in local space.
    pub fn bounds(&self) -> (Vector3<f32>, Vector3<f32>) {
        let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
        for v in &self.vertices {
            min.x = min.x.min(v.position[0]);
            min.y = min.y.min(v.position[1]);
            min.z = min.z.min(v.position[2]);
            max.x = max.x.max(v.position[0]);
            max.y = max.y.max(v.position[1]);
            max.z = max.z.max(v.position[2]);
        }
        (min, max)
    }

    pub fn segment_count(&self) -> usize {
        match self.topology {
            Topology::Lines => self.indices.len() / 2,
            Topology::Triangles => 0,
        }
    }
}

fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vector3<f32> {
    let (a, b, c) = (Vector3::from(a), Vector3::from(b), Vector3::from(c));
    let n = (b - a).cross(c - a);
    if n.magnitude2() > 0.0 {
        n.normalize()
    } else {
        n
    }
}

/// Projects every point onto the sphere of `radius` and emits flat-shaded,
/// outward-facing triangles.
fn polyhedron(points: &[[f32; 3]], faces: &[[usize; 3]], radius: f32) -> Geometry {
    let projected: Vec<Vector3<f32>> = points
        .iter()
        .map(|p| Vector3::from(*p).normalize() * radius)
        .collect();
    let mut vertices = Vec::with_capacity(faces.len() * 3);
    for face in faces {
        let (mut a, mut b, c) = (projected[face[0]], projected[face[1]], projected[face[2]]);
        let centroid = (a + b + c) / 3.0;
        if (b - a).cross(c - a).dot(centroid) < 0.0 {
            std::mem::swap(&mut a, &mut b);
        }
        let normal: [f32; 3] = face_normal(a.into(), b.into(), c.into()).into();
        for (p, uv) in [(a, [0.0, 0.0]), (b, [1.0, 0.0]), (c, [0.5, 1.0])] {
            vertices.push(MeshVertex::new(p.into(), normal, uv));
        }
    }
    let indices = (0..vertices.len() as u32).collect();
    Geometry {
        vertices,
        indices,
        topology: Topology::Triangles,
    }
}

fn icosahedron_mesh() -> (Vec<[f32; 3]>, Vec<[usize; 3]>) {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    let points = vec![
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    (points, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_outline_has_twelve_edges() {
        let edges = Geometry::cuboid(2.5, 1.8, 0.1).edges();
        assert_eq!(edges.segment_count(), 12);
        assert_eq!(edges.vertices.len(), 8);
    }

    #[test]
    fn plane_outline_is_its_border() {
        assert_eq!(Geometry::plane(2.0, 1.5).edges().segment_count(), 4);
    }

    #[test]
    fn solids_have_expected_face_counts() {
        assert_eq!(Geometry::tetrahedron(0.3).indices.len() / 3, 4);
        assert_eq!(Geometry::octahedron(0.3).indices.len() / 3, 8);
        assert_eq!(Geometry::icosahedron(0.3).indices.len() / 3, 20);
        // twelve pentagons fanned into three triangles each
        assert_eq!(Geometry::dodecahedron(0.4).indices.len() / 3, 36);
    }

    #[test]
    fn solids_face_outwards() {
        for geometry in [
            Geometry::tetrahedron(1.0),
            Geometry::octahedron(1.0),
            Geometry::icosahedron(1.0),
            Geometry::dodecahedron(1.0),
        ] {
            for v in &geometry.vertices {
                let p = Vector3::from(v.position);
                let n = Vector3::from(v.normal);
                assert!(p.dot(n) > 0.0);
            }
        }
    }

    #[test]
    fn grid_colours_the_centre_lines() {
        let center = Color3::from_hex(0x00f0ff);
        let grid = Geometry::grid(10.0, 10, center, Color3::from_hex(0xff00ff));
        assert_eq!(grid.segment_count(), 22);
        let centred = grid
            .vertices
            .iter()
            .filter(|v| v.color == center.to_array())
            .count();
        assert_eq!(centred, 4);
    }

    #[test]
    fn wireframe_lists_each_triangle_edge_once() {
        let plane = Geometry::plane(1.0, 1.0);
        // four border edges plus the diagonal
        assert_eq!(plane.wireframe_indices().len() / 2, 5);
    }
}

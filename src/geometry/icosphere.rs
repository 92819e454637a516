use std::collections::HashMap;

use glam::Vec3;

use crate::geometry::mesh::MeshData;

pub const MAX_SUBDIVISIONS: u32 = 8;

/// Sphere approximated by recursively subdividing an icosahedron.
///
/// Each subdivision splits every face into four, pushing the new edge
/// midpoints back onto the sphere. Midpoints are shared between the two
/// faces of an edge, so the result stays a closed manifold.
pub struct Icosphere {
    pub center: Vec3,
    pub radius: f32,
    pub subdivisions: u32,
}

impl Icosphere {
    pub fn new(center: Vec3, radius: f32, subdivisions: u32) -> Self {
        Self {
            center,
            radius,
            subdivisions,
        }
    }

    pub fn build(&self) -> MeshData {
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let mut unit: Vec<Vec3> = [
            (-1.0, phi, 0.0),
            (1.0, phi, 0.0),
            (-1.0, -phi, 0.0),
            (1.0, -phi, 0.0),
            (0.0, -1.0, phi),
            (0.0, 1.0, phi),
            (0.0, -1.0, -phi),
            (0.0, 1.0, -phi),
            (phi, 0.0, -1.0),
            (phi, 0.0, 1.0),
            (-phi, 0.0, -1.0),
            (-phi, 0.0, 1.0),
        ]
        .iter()
        .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
        .collect();

        #[rustfmt::skip]
        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        for _ in 0..self.subdivisions.min(MAX_SUBDIVISIONS) {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut next = Vec::with_capacity(faces.len() * 4);

            for [a, b, c] in faces {
                let ab = midpoint(&mut unit, &mut midpoints, a, b);
                let bc = midpoint(&mut unit, &mut midpoints, b, c);
                let ca = midpoint(&mut unit, &mut midpoints, c, a);

                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }

            faces = next;
        }

        let mut positions = Vec::with_capacity(unit.len() * 4);
        let mut normals = Vec::with_capacity(unit.len() * 4);
        for dir in &unit {
            let p = self.center + *dir * self.radius;
            positions.extend_from_slice(&[p.x, p.y, p.z, 1.0]);
            normals.extend_from_slice(&[dir.x, dir.y, dir.z, 0.0]);
        }

        let mut indices = Vec::with_capacity(faces.len() * 3);
        for face in &faces {
            indices.extend_from_slice(face);
        }

        MeshData {
            positions,
            normals,
            indices,
        }
    }
}

fn midpoint(unit: &mut Vec<Vec3>, cache: &mut HashMap<(u32, u32), u32>, a: u32, b: u32) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }

    let mid = ((unit[a as usize] + unit[b as usize]) * 0.5).normalize();
    let idx = unit.len() as u32;
    unit.push(mid);
    cache.insert(key, idx);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn edge_counts(indices: &[u32]) -> HashMap<(u32, u32), u32> {
        let mut edges = HashMap::new();
        for tri in indices.chunks(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                *edges.entry(key).or_insert(0) += 1;
            }
        }
        edges
    }

    #[test]
    fn vertex_and_face_counts_follow_subdivision() {
        for level in 0..=3u32 {
            let mesh = Icosphere::new(Vec3::ZERO, 1.0, level).build();
            let expected_vertices = 10 * 4usize.pow(level) + 2;
            let expected_faces = 20 * 4usize.pow(level);
            assert_eq!(mesh.vertex_count(), expected_vertices);
            assert_eq!(mesh.triangle_count(), expected_faces);
        }
    }

    #[test]
    fn indices_reference_valid_vertices() {
        let mesh = Icosphere::new(Vec3::ZERO, 1.0, 2).build();
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn closed_manifold_every_edge_shared_twice() {
        let mesh = Icosphere::new(Vec3::ZERO, 1.0, 2).build();
        for (_, count) in edge_counts(&mesh.indices) {
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let center = Vec3::new(1.0, -2.0, 0.5);
        let mesh = Icosphere::new(center, 3.0, 3).build();
        for v in mesh.positions.chunks(4) {
            let p = Vec3::new(v[0], v[1], v[2]);
            assert!(((p - center).length() - 3.0).abs() < 1e-4);
            assert_eq!(v[3], 1.0);
        }
    }

    #[test]
    fn normals_are_unit_radial() {
        let mesh = Icosphere::new(Vec3::ZERO, 2.0, 2).build();
        for n in mesh.normals.chunks(4) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
            assert_eq!(n[3], 0.0);
        }
    }

}

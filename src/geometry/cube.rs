use glam::Vec3;

use crate::geometry::mesh::MeshData;

/// Unit cube with per-face normals, so 24 vertices for 12 triangles.
pub struct Cube {
    pub center: Vec3,
}

impl Cube {
    pub fn new(center: Vec3) -> Self {
        Self { center }
    }

    pub fn build(&self) -> MeshData {
        let c = self.center;

        // One entry per face: normal, then the face's tangent/bitangent pair.
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];

        let mut positions = Vec::with_capacity(24 * 4);
        let mut normals = Vec::with_capacity(24 * 4);
        let mut indices = Vec::with_capacity(36);

        for (i, (normal, tangent, bitangent)) in faces.iter().enumerate() {
            let base = (i * 4) as u32;
            for (s, t) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = c + *normal + *tangent * s + *bitangent * t;
                positions.extend_from_slice(&[p.x, p.y, p.z, 1.0]);
                normals.extend_from_slice(&[normal.x, normal.y, normal.z, 0.0]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        MeshData {
            positions,
            normals,
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn per_face_vertex_layout() {
        let mesh = Cube::new(Vec3::ZERO).build();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.indices.iter().all(|&i| i < 24));
    }

    #[test]
    fn normals_are_axis_aligned_units() {
        let mesh = Cube::new(Vec3::ZERO).build();
        for n in mesh.normals.chunks(4) {
            let sum = n[0].abs() + n[1].abs() + n[2].abs();
            assert_eq!(sum, 1.0);
            assert_eq!(n[3], 0.0);
        }
    }

    #[test]
    fn positions_span_the_unit_cube() {
        let center = Vec3::new(0.0, 5.0, 0.0);
        let mesh = Cube::new(center).build();
        for v in mesh.positions.chunks(4) {
            assert_eq!((v[0] - center.x).abs(), 1.0);
            assert_eq!((v[1] - center.y).abs(), 1.0);
            assert_eq!((v[2] - center.z).abs(), 1.0);
        }
    }

    #[test]
    fn closed_manifold_after_position_weld() {
        let mesh = Cube::new(Vec3::ZERO).build();

        // Weld the per-face duplicates back together by exact position,
        // then every edge must be shared by exactly two triangles.
        let mut welded: HashMap<[u32; 3], u32> = HashMap::new();
        let mut remap = Vec::with_capacity(mesh.vertex_count());
        for v in mesh.positions.chunks(4) {
            let key = [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()];
            let next = welded.len() as u32;
            remap.push(*welded.entry(key).or_insert(next));
        }
        assert_eq!(welded.len(), 8);

        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in mesh.indices.chunks(3) {
            let t = [
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            ];
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                *edges.entry(key).or_insert(0) += 1;
            }
        }
        assert_eq!(edges.len(), 18);
        for (_, count) in edges {
            assert_eq!(count, 2);
        }
    }
}

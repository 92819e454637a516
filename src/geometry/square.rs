use glam::Vec3;

use crate::geometry::mesh::MeshData;

/// Unit quad in the XY plane, facing +Z.
pub struct Square {
    pub center: Vec3,
}

impl Square {
    pub fn new(center: Vec3) -> Self {
        Self { center }
    }

    pub fn build(&self) -> MeshData {
        let c = self.center;

        let corners = [
            (-1.0, -1.0),
            (1.0, -1.0),
            (1.0, 1.0),
            (-1.0, 1.0),
        ];

        let mut positions = Vec::with_capacity(16);
        let mut normals = Vec::with_capacity(16);
        for (x, y) in corners {
            positions.extend_from_slice(&[c.x + x, c.y + y, c.z, 1.0]);
            normals.extend_from_slice(&[0.0, 0.0, 1.0, 0.0]);
        }

        MeshData {
            positions,
            normals,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_triangles_four_vertices() {
        let mesh = Square::new(Vec3::ZERO).build();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn normals_face_positive_z() {
        let mesh = Square::new(Vec3::new(2.0, 0.0, -1.0)).build();
        for n in mesh.normals.chunks(4) {
            assert_eq!(n, [0.0, 0.0, 1.0, 0.0]);
        }
        for v in mesh.positions.chunks(4) {
            assert_eq!(v[2], -1.0);
        }
    }
}

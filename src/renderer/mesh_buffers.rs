use crate::geometry::mesh::MeshData;

// Sized for the densest icosphere the GUI can request (level 8).
const MAX_VERTICES: usize = 700_000;
const MAX_INDICES: usize = 4_000_000;

/// Position/normal/index buffers for one indexed triangle mesh.
pub struct MeshBuffers {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl MeshBuffers {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Position Buffer")),
            size: (MAX_VERTICES * 4 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let normal_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Normal Buffer")),
            size: (MAX_VERTICES * 4 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            size: (MAX_INDICES * 4) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            position_buffer,
            normal_buffer,
            index_buffer,
            vertex_count: 0,
            index_count: 0,
        }
    }

    pub fn upload(&mut self, queue: &wgpu::Queue, mesh: &MeshData) {
        let float_count = mesh.positions.len().min(MAX_VERTICES * 4);
        let index_count = mesh.indices.len().min(MAX_INDICES) / 3 * 3;

        queue.write_buffer(
            &self.position_buffer,
            0,
            bytemuck::cast_slice(&mesh.positions[..float_count]),
        );
        queue.write_buffer(
            &self.normal_buffer,
            0,
            bytemuck::cast_slice(&mesh.normals[..float_count]),
        );
        queue.write_buffer(
            &self.index_buffer,
            0,
            bytemuck::cast_slice(&mesh.indices[..index_count]),
        );

        self.vertex_count = (float_count / 4) as u32;
        self.index_count = index_count as u32;
    }
}

pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 16,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x4,
        }],
    }
}

pub fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 16,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_vec4_attributes() {
        let pos = position_layout();
        assert_eq!(pos.array_stride, 16);
        assert_eq!(pos.attributes[0].shader_location, 0);

        let nor = normal_layout();
        assert_eq!(nor.array_stride, 16);
        assert_eq!(nor.attributes[0].shader_location, 1);
    }

    #[test]
    fn capacity_covers_max_tessellation() {
        let vertices = 10 * 4usize.pow(8) + 2;
        let indices = 20 * 4usize.pow(8) * 3;
        assert!(vertices <= MAX_VERTICES);
        assert!(indices <= MAX_INDICES);
    }
}

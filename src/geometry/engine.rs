use crossbeam::channel::{self, Receiver, Sender};
use glam::Vec3;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crate::geometry::icosphere::{Icosphere, MAX_SUBDIVISIONS};
use crate::geometry::mesh::MeshData;

pub enum GeometryCommand {
    Rebuild {
        center: Vec3,
        radius: f32,
        subdivisions: u32,
    },
    Stop,
}

pub enum GeometryResult {
    Mesh(MeshData),
    Error(String),
}

/// Counters shared between the worker, the frame loop and the stats panel.
#[derive(Default)]
pub struct FrameStats {
    pub fps: Mutex<f32>,
    pub last_rebuild_ms: Mutex<f32>,
    pub rebuild_count: AtomicU64,
    pub scene_vertices: AtomicUsize,
    pub scene_triangles: AtomicUsize,
}

/// Rebuilds the icosphere off the frame loop. High subdivision levels are in
/// the million-triangle range, so the worker keeps slider drags from
/// stuttering the redraw.
pub struct GeometryEngine {
    tx_cmd: Sender<GeometryCommand>,
    rx_result: Receiver<GeometryResult>,
    stats: Arc<FrameStats>,
    last_error: Arc<Mutex<Option<String>>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl GeometryEngine {
    pub fn new() -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<GeometryCommand>();
        let (tx_result, rx_result) = channel::bounded::<GeometryResult>(2);
        let stats = Arc::new(FrameStats::default());
        let last_error = Arc::new(Mutex::new(None));

        let stats_clone = Arc::clone(&stats);
        let last_error_clone = Arc::clone(&last_error);

        let thread_handle = thread::spawn(move || {
            geometry_thread(rx_cmd, tx_result, stats_clone, last_error_clone);
        });

        Self {
            tx_cmd,
            rx_result,
            stats,
            last_error,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn rebuild(&self, center: Vec3, radius: f32, subdivisions: u32) {
        let _ = self.tx_cmd.send(GeometryCommand::Rebuild {
            center,
            radius,
            subdivisions,
        });
    }

    pub fn try_recv_result(&self) -> Option<GeometryResult> {
        self.rx_result.try_recv().ok()
    }

    pub fn stats(&self) -> &Arc<FrameStats> {
        &self.stats
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(GeometryCommand::Stop);
    }
}

impl Drop for GeometryEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(GeometryCommand::Stop);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn geometry_thread(
    rx_cmd: Receiver<GeometryCommand>,
    tx_result: Sender<GeometryResult>,
    stats: Arc<FrameStats>,
    last_error: Arc<Mutex<Option<String>>>,
) {
    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        match cmd {
            GeometryCommand::Rebuild {
                center,
                radius,
                subdivisions,
            } => {
                *last_error.lock() = None;

                let start = std::time::Instant::now();
                match build_icosphere(center, radius, subdivisions) {
                    Ok(mesh) => {
                        *stats.last_rebuild_ms.lock() = start.elapsed().as_secs_f32() * 1000.0;
                        stats.rebuild_count.fetch_add(1, Ordering::Relaxed);
                        let _ = tx_result.send(GeometryResult::Mesh(mesh));
                    }
                    Err(e) => {
                        *last_error.lock() = Some(e.clone());
                        let _ = tx_result.send(GeometryResult::Error(e));
                    }
                }
            }
            GeometryCommand::Stop => return,
        }
    }
}

fn build_icosphere(center: Vec3, radius: f32, subdivisions: u32) -> Result<MeshData, String> {
    if subdivisions > MAX_SUBDIVISIONS {
        return Err(format!(
            "Tessellation level {} exceeds the supported maximum of {}",
            subdivisions, MAX_SUBDIVISIONS
        ));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(format!("Sphere radius must be positive, got {}", radius));
    }

    Ok(Icosphere::new(center, radius, subdivisions).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait_for_result(engine: &GeometryEngine) -> GeometryResult {
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = engine.try_recv_result() {
                return result;
            }
            assert!(std::time::Instant::now() < deadline, "worker never replied");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn rebuild_round_trip() {
        let engine = GeometryEngine::new();
        engine.rebuild(Vec3::ZERO, 1.0, 3);

        match wait_for_result(&engine) {
            GeometryResult::Mesh(mesh) => {
                assert_eq!(mesh.vertex_count(), 10 * 4usize.pow(3) + 2);
                assert!(engine.last_error().is_none());
            }
            GeometryResult::Error(e) => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn excessive_subdivision_is_rejected() {
        let engine = GeometryEngine::new();
        engine.rebuild(Vec3::ZERO, 1.0, MAX_SUBDIVISIONS + 1);

        match wait_for_result(&engine) {
            GeometryResult::Mesh(_) => panic!("expected an error"),
            GeometryResult::Error(e) => {
                assert!(e.contains("Tessellation"));
                assert_eq!(engine.last_error().as_deref(), Some(e.as_str()));
            }
        }
    }

    #[test]
    fn zero_radius_is_rejected() {
        assert!(build_icosphere(Vec3::ZERO, 0.0, 2).is_err());
    }
}

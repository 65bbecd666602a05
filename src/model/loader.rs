//! Background model loading with streamed progress.
//!
//! The file is read in chunks on a worker thread so the frame loop can drive
//! the preloader percentage while bytes arrive. Decode happens on the worker
//! too; the finished mesh crosses back over the channel.

use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::error::ShowcaseError;
use crate::model::gltf::decode_glb;
use crate::model::mesh::MeshData;

const READ_CHUNK: usize = 64 * 1024;

/// Bytes-loaded snapshot emitted while the model file streams in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    /// Bytes read so far.
    pub loaded: u64,
    /// Total byte size, when known up front.
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Rounded whole-number percentage, or `None` when the total size is
    /// unknown or zero.
    pub fn percent(&self) -> Option<f32> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.loaded as f32 / total as f32 * 100.0).round())
            }
            _ => None,
        }
    }
}

/// Events streamed from the loader thread to the frame loop.
pub enum LoaderEvent {
    /// More bytes arrived.
    Progress(LoadProgress),
    /// The model decoded successfully.
    Ready(Box<MeshData>),
    /// Loading or decoding failed. The showcase keeps running without a
    /// model.
    Failed(String),
}

/// Handle to the background loader thread.
pub struct ModelLoader {
    rx: mpsc::Receiver<LoaderEvent>,
}

impl ModelLoader {
    /// Spawn a worker thread that streams the file at `path` and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::ThreadSpawn`] if the OS refuses the thread.
    /// I/O and decode failures are reported as [`LoaderEvent::Failed`]
    /// instead, so a missing file never takes down the page.
    pub fn spawn(path: PathBuf) -> Result<Self, ShowcaseError> {
        let (tx, rx) = mpsc::channel();

        let _ = std::thread::Builder::new()
            .name("model-loader".to_string())
            .spawn(move || {
                run_loader(&path, &tx);
            })
            .map_err(ShowcaseError::ThreadSpawn)?;

        Ok(Self { rx })
    }

    /// Drain all events that have arrived since the last call.
    pub fn try_iter(&self) -> impl Iterator<Item = LoaderEvent> + '_ {
        self.rx.try_iter()
    }
}

fn run_loader(path: &std::path::Path, tx: &mpsc::Sender<LoaderEvent>) {
    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("model open failed: {}: {e}", path.display());
            let _ = tx.send(LoaderEvent::Failed(format!(
                "open {}: {e}",
                path.display()
            )));
            return;
        }
    };

    let total = file.metadata().ok().map(|m| m.len());
    let mut bytes: Vec<u8> =
        Vec::with_capacity(total.unwrap_or(0).min(64 * 1024 * 1024) as usize);
    let mut chunk = vec![0u8; READ_CHUNK];

    let _ = tx.send(LoaderEvent::Progress(LoadProgress { loaded: 0, total }));

    loop {
        match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                bytes.extend_from_slice(&chunk[..n]);
                let _ = tx.send(LoaderEvent::Progress(LoadProgress {
                    loaded: bytes.len() as u64,
                    total,
                }));
            }
            Err(e) => {
                log::warn!("model read failed: {}: {e}", path.display());
                let _ = tx.send(LoaderEvent::Failed(format!(
                    "read {}: {e}",
                    path.display()
                )));
                return;
            }
        }
    }

    match decode_glb(&bytes) {
        Ok(mesh) => {
            log::info!(
                "model loaded: {} vertices, {} triangles",
                mesh.vertices.len(),
                mesh.indices.len() / 3
            );
            let _ = tx.send(LoaderEvent::Ready(Box::new(mesh)));
        }
        Err(e) => {
            log::warn!("model decode failed: {}: {e}", path.display());
            let _ = tx.send(LoaderEvent::Failed(e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gltf::tests::triangle_glb;

    fn recv_all(loader: &ModelLoader) -> Vec<LoaderEvent> {
        let mut events = Vec::new();
        // The worker closes the channel when done.
        while let Ok(ev) = recv_blocking(loader) {
            events.push(ev);
        }
        events
    }

    fn recv_blocking(
        loader: &ModelLoader,
    ) -> Result<LoaderEvent, mpsc::RecvError> {
        loader.rx.recv()
    }

    #[test]
    fn test_percent_rounds_and_handles_unknown_total() {
        let p = LoadProgress {
            loaded: 333,
            total: Some(1000),
        };
        assert_eq!(p.percent(), Some(33.0));

        let unknown = LoadProgress {
            loaded: 333,
            total: None,
        };
        assert_eq!(unknown.percent(), None);

        let empty = LoadProgress {
            loaded: 0,
            total: Some(0),
        };
        assert_eq!(empty.percent(), None);
    }

    #[test]
    fn test_streams_progress_then_ready() {
        let dir = std::env::temp_dir().join("kickshow-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("triangle.glb");
        std::fs::write(&path, triangle_glb()).unwrap();

        let loader = ModelLoader::spawn(path).unwrap();
        let events = recv_all(&loader);

        assert!(
            events
                .iter()
                .any(|e| matches!(e, LoaderEvent::Progress(_)))
        );
        let last = events.last().unwrap();
        match last {
            LoaderEvent::Ready(mesh) => {
                assert_eq!(mesh.vertices.len(), 3);
            }
            _ => panic!("expected Ready as the final event"),
        }
        // Final progress snapshot reaches 100%
        let final_progress = events
            .iter()
            .filter_map(|e| match e {
                LoaderEvent::Progress(p) => Some(*p),
                _ => None,
            })
            .last()
            .unwrap();
        assert_eq!(final_progress.percent(), Some(100.0));
    }

    #[test]
    fn test_missing_file_reports_failed() {
        let loader =
            ModelLoader::spawn(PathBuf::from("/nonexistent/shoe.glb"))
                .unwrap();
        let events = recv_all(&loader);
        assert!(matches!(events.last(), Some(LoaderEvent::Failed(_))));
    }
}

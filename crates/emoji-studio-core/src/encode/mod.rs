use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::{Error, Result};

mod gif;
mod png;

pub use self::gif::encode_gif;
pub use self::png::encode_png;

/// Pending result of a background encode. Resolves exactly once with the
/// complete file; no partial output or progress is exposed.
#[derive(Debug)]
pub struct ExportJob {
    rx: Receiver<Result<Vec<u8>>>,
}

impl ExportJob {
    pub(crate) fn spawn<F>(name: &str, work: F) -> Self
    where
        F: FnOnce() -> Result<Vec<u8>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new().name(name.to_string()).spawn({
            let tx = tx.clone();
            move || {
                let _ = tx.send(work());
            }
        });
        if let Err(err) = spawned {
            let _ = tx.send(Err(Error::Io(err)));
        }
        Self { rx }
    }

    /// Blocks until the encoder finishes.
    pub fn wait(self) -> Result<Vec<u8>> {
        self.rx
            .recv()
            .map_err(|_| Error::Encode("encoder exited without a result".to_string()))?
    }

    /// Returns `None` while the encoder is still running.
    pub fn try_wait(&mut self) -> Option<Result<Vec<u8>>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::Encode(
                "encoder exited without a result".to_string(),
            ))),
        }
    }
}

//! File writer shared between the backend and its tracing dispatcher.

use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

thread_local! {
    // Last io error raised on this thread; the fmt layer discards it otherwise.
    static LAST_ERROR: RefCell<Option<io::Error>> = const { RefCell::new(None) };
}

#[derive(Debug)]
struct BoundFile {
    target: String,
    path: PathBuf,
    file: File,
}

/// Handle to the currently bound output file.
///
/// Clones share the same binding; rebinding swaps the file for every clone.
/// The target name and its file are swapped together under one lock.
#[derive(Debug, Clone, Default)]
pub struct TargetWriter {
    inner: Arc<Mutex<Option<BoundFile>>>,
}

impl TargetWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` for appending (creating parent directories) and make it
    /// the destination of all further writes, on behalf of `target`.
    ///
    /// On error the previous binding stays in place.
    pub fn rebind(&self, target: &str, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        *self.lock() = Some(BoundFile {
            target: target.to_string(),
            path: path.to_path_buf(),
            file,
        });
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.lock().is_some()
    }

    pub fn bound_path(&self) -> Option<PathBuf> {
        self.lock().as_ref().map(|bound| bound.path.clone())
    }

    /// Name of the target the current file belongs to.
    pub fn bound_target(&self) -> Option<String> {
        self.lock().as_ref().map(|bound| bound.target.clone())
    }

    /// Take the last write error raised on the calling thread.
    pub fn take_error() -> Option<io::Error> {
        LAST_ERROR.with(|slot| slot.borrow_mut().take())
    }

    fn lock(&self) -> MutexGuard<'_, Option<BoundFile>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn record<T>(result: io::Result<T>) -> io::Result<T> {
    if let Err(err) = &result {
        let kept = io::Error::new(err.kind(), err.to_string());
        LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(kept));
    }
    result
}

fn not_bound() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "no target file bound")
}

impl Write for TargetWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = match self.lock().as_mut() {
            Some(bound) => bound.file.write(buf),
            None => Err(not_bound()),
        };
        record(result)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // One lock per formatted line keeps concurrent lines from interleaving.
        let result = match self.lock().as_mut() {
            Some(bound) => bound.file.write_all(buf),
            None => Err(not_bound()),
        };
        record(result)
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = match self.lock().as_mut() {
            Some(bound) => bound.file.flush(),
            None => Ok(()),
        };
        record(result)
    }
}

impl<'a> MakeWriter<'a> for TargetWriter {
    type Writer = TargetWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

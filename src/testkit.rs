//! Helpers shared by the unit tests.

use crate::command::{Stdin, Stdout};
use std::cell::RefCell;
use std::fs;
use std::io::{Read, Result as IoResult, Write};
use std::path::PathBuf;
use std::process::Stdio;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Memory-backed writer for capturing in-process command output.
///
/// As a child-process stream it degrades to `Stdio::null()`; it only
/// observes what builtins write directly.
pub(crate) struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    /// Create a writer together with a handle for reading the collected
    /// bytes after the command has consumed the writer.
    pub(crate) fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let buf = Rc::new(RefCell::new(Vec::new()));
        let handle = buf.clone();
        (Self { buf }, handle)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

impl Stdout for MemWriter {
    fn stdio(self: Box<Self>) -> Stdio {
        Stdio::null()
    }
}

/// Reader that is always at end-of-input.
pub(crate) struct NullStdin;

impl Read for NullStdin {
    fn read(&mut self, _buf: &mut [u8]) -> IoResult<usize> {
        Ok(0)
    }
}

impl Stdin for NullStdin {
    fn stdio(self: Box<Self>) -> Stdio {
        Stdio::null()
    }
}

/// Serializes tests that touch the process-global working directory.
pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX.get_or_init(|| Mutex::new(())).lock().unwrap()
}

/// Fresh directory under the system temp dir, unique per test and run.
pub(crate) fn unique_temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("nanosh_{tag}_{}_{nanos}", std::process::id()));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

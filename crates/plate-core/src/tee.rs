//! Duplicating sink used by the recorder.

use std::io::{self, Write};

/// Forwards every write to the caller's sink and keeps a copy of what the sink accepted.
///
/// The caller's sink is written first. Only the prefix it reports as written is
/// captured, so the capture always equals the bytes the caller actually received,
/// including partial output produced before a failure. Sink errors pass through
/// unchanged.
pub(crate) struct Tee<'a> {
    sink: &'a mut dyn Write,
    captured: Vec<u8>,
}

impl<'a> Tee<'a> {
    pub(crate) fn new(sink: &'a mut dyn Write) -> Self {
        Self {
            sink,
            captured: Vec::new(),
        }
    }

    pub(crate) fn into_captured(self) -> Vec<u8> {
        self.captured
    }
}

impl Write for Tee<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.sink.write(buf)?;
        self.captured.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

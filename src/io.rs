use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// In‑memory output sink.  Clones share one buffer, so a host can hand one
/// clone to the interpreter and read program output through another.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    data: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF‑8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data.borrow()).into_owned()
    }

    /// Drain the buffer, returning what it held.
    pub fn take(&self) -> String {
        let bytes: Vec<u8> = std::mem::take(&mut *self.data.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

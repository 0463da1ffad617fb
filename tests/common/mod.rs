#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sx1278::transport::{Capabilities, Transport};
use sx1278::{lookup, Error, Modem, OpenErrorKind, Result};

/// Per-operation call counters.
#[derive(Debug, Default)]
pub struct Calls {
    pub open: Cell<usize>,
    pub reset: Cell<usize>,
    pub read: Cell<usize>,
    pub write: Cell<usize>,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.open.get() + self.reset.get() + self.read.get() + self.write.get()
    }
}

/// Bus handed out by [`MockTransport`]; counts its own release.
pub struct MockBus {
    pub path: String,
    released: Rc<Cell<usize>>,
}

impl Drop for MockBus {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// In-memory transport emulating the SX1278 register file.
///
/// Write frames `[address, value, ...]` store consecutive bytes; read frames
/// `[address, 0x00]` return the stored value at index 1. A scripted reply
/// overrides the register file for every read.
pub struct MockTransport {
    caps: Capabilities,
    pub calls: Calls,
    pub regs: RefCell<[u8; 256]>,
    pub writes: RefCell<Vec<Vec<u8>>>,
    pub read_requests: RefCell<Vec<Vec<u8>>>,
    pub opened: Cell<usize>,
    pub released: Rc<Cell<usize>>,
    pub reply: RefCell<Option<Vec<u8>>>,
    pub open_error: Cell<Option<OpenErrorKind>>,
    pub reset_ok: Cell<bool>,
    pub short_write: Cell<Option<usize>>,
    pub short_read: Cell<Option<usize>>,
    pub fail_write_at: Cell<Option<usize>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    pub fn with_capabilities(caps: Capabilities) -> Self {
        Self {
            caps,
            calls: Calls::default(),
            regs: RefCell::new([0; 256]),
            writes: RefCell::new(Vec::new()),
            read_requests: RefCell::new(Vec::new()),
            opened: Cell::new(0),
            released: Rc::new(Cell::new(0)),
            reply: RefCell::new(None),
            open_error: Cell::new(None),
            reset_ok: Cell::new(true),
            short_write: Cell::new(None),
            short_read: Cell::new(None),
            fail_write_at: Cell::new(None),
        }
    }

    /// A mock whose register file holds the power-on values of the LoRa map.
    pub fn with_reset_values() -> Self {
        let mock = Self::new();
        {
            let mut regs = mock.regs.borrow_mut();
            for address in 0..=u8::MAX {
                if let Some(desc) = lookup(address, Modem::Lora) {
                    regs[address as usize] = desc.por_default;
                }
            }
        }
        mock
    }

    pub fn reg(&self, address: u8) -> u8 {
        self.regs.borrow()[address as usize]
    }

    pub fn set_reg(&self, address: u8, value: u8) {
        self.regs.borrow_mut()[address as usize] = value;
    }

    pub fn written_frames(&self) -> Vec<Vec<u8>> {
        self.writes.borrow().clone()
    }

    /// Addresses of all write frames, in order.
    pub fn written_addresses(&self) -> Vec<u8> {
        self.writes.borrow().iter().map(|frame| frame[0]).collect()
    }

    pub fn clear_log(&self) {
        self.writes.borrow_mut().clear();
        self.read_requests.borrow_mut().clear();
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl Transport for MockTransport {
    type Bus = MockBus;

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn open(&self, path: &str) -> Result<MockBus> {
        bump(&self.calls.open);
        if let Some(kind) = self.open_error.get() {
            return Err(Error::Open(kind));
        }
        bump(&self.opened);
        Ok(MockBus {
            path: path.to_string(),
            released: Rc::clone(&self.released),
        })
    }

    fn reset(&self, _bus: &mut MockBus) -> bool {
        bump(&self.calls.reset);
        self.reset_ok.get()
    }

    fn read(&self, _bus: &mut MockBus, data: &mut [u8]) -> Result<usize> {
        bump(&self.calls.read);
        self.read_requests.borrow_mut().push(data.to_vec());

        if let Some(reply) = self.reply.borrow().as_ref() {
            let n = reply.len().min(data.len());
            data[..n].copy_from_slice(&reply[..n]);
            return Ok(self.short_read.get().unwrap_or(n));
        }

        if !data.is_empty() {
            let address = data[0] as usize;
            let regs = self.regs.borrow();
            for offset in 1..data.len() {
                data[offset] = regs[(address + offset - 1) & 0xFF];
            }
            data[0] = 0x00;
        }
        Ok(self.short_read.get().unwrap_or(data.len()))
    }

    fn write(&self, _bus: &mut MockBus, data: &[u8]) -> Result<usize> {
        bump(&self.calls.write);
        let index = self.writes.borrow().len();
        if self.fail_write_at.get() == Some(index) {
            return Err(Error::Bus);
        }
        self.writes.borrow_mut().push(data.to_vec());

        if let Some((&address, payload)) = data.split_first() {
            let mut regs = self.regs.borrow_mut();
            for (offset, byte) in payload.iter().enumerate() {
                regs[(address as usize + offset) & 0xFF] = *byte;
            }
        }
        Ok(self.short_write.get().unwrap_or(data.len()))
    }
}

// libpn532-rs/libpn532/src/transport/mock.rs

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Instant;

use crate::constants::ACK_FRAME;
use crate::protocol::Frame;
use crate::transport::traits::Transport;
use crate::types::TransportType;
use crate::{Error, Result, TransportErrorKind};

#[derive(Debug)]
struct MockState {
    transport_type: TransportType,
    sent: Vec<Vec<u8>>,
    /// One-shot replies, consumed in order by `receive`
    responses: VecDeque<Vec<u8>>,
    /// Replies given every time a command code is sent
    scripted: HashMap<u8, Vec<u8>>,
    /// Remaining injected failures per command code
    failures: HashMap<u8, (usize, Error)>,
    /// Units queued for the command that was sent last
    pending: VecDeque<Result<Vec<u8>>>,
    calls: HashMap<u8, usize>,
    auto_ack: bool,
    wake_ups: usize,
    closed: bool,
}

/// Mock transport for tests. It records sent frames and answers from
/// queued or per-command scripted replies.
///
/// Clones share state, so a test can keep a handle after giving a boxed
/// clone to a `Device`.
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new(TransportType::Uart)
    }
}

impl MockTransport {
    pub fn new(transport_type: TransportType) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                transport_type,
                sent: Vec::new(),
                responses: VecDeque::new(),
                scripted: HashMap::new(),
                failures: HashMap::new(),
                pending: VecDeque::new(),
                calls: HashMap::new(),
                auto_ack: false,
                wake_ups: 0,
                closed: false,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not poison the other handles
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a raw reply returned by the next `receive` that has nothing
    /// scripted for it.
    pub fn push_response(&self, resp: Vec<u8>) {
        self.state().responses.push_back(resp);
    }

    /// Queue a chip -> host frame built from `data` (response code + payload).
    pub fn push_frame(&self, data: &[u8]) -> Result<()> {
        self.push_response(Frame::encode_response(data)?);
        Ok(())
    }

    /// Answer every future `cmd` with `resp`.
    pub fn script_response(&self, cmd: u8, resp: Vec<u8>) {
        self.state().scripted.insert(cmd, resp);
    }

    /// Answer every future `cmd` with a frame built from `data`.
    pub fn script_frame(&self, cmd: u8, data: &[u8]) -> Result<()> {
        self.script_response(cmd, Frame::encode_response(data)?);
        Ok(())
    }

    /// The next `n` exchanges of `cmd` fail at receive time with `err`.
    pub fn fail_next_receives(&self, cmd: u8, n: usize, err: Error) {
        self.state().failures.insert(cmd, (n, err));
    }

    /// Emit an ACK frame as its own unit ahead of every reply.
    pub fn set_auto_ack(&self, enabled: bool) {
        self.state().auto_ack = enabled;
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    pub fn pop_sent(&self) -> Option<Vec<u8>> {
        self.state().sent.pop()
    }

    /// How many frames carrying command `cmd` were sent.
    pub fn call_count(&self, cmd: u8) -> usize {
        self.state().calls.get(&cmd).copied().unwrap_or(0)
    }

    pub fn wake_up_count(&self) -> usize {
        self.state().wake_ups
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut st = self.state();
        if st.closed {
            return Err(Error::transport(TransportErrorKind::NotOpen, "mock closed"));
        }
        st.sent.push(data.to_vec());
        st.pending.clear();

        let Ok((cmd, _)) = Frame::decode_command(data) else {
            return Ok(());
        };
        *st.calls.entry(cmd).or_insert(0) += 1;

        if let Some((remaining, err)) = st.failures.get_mut(&cmd) {
            if *remaining > 0 {
                *remaining -= 1;
                let err = err.clone();
                st.pending.push_back(Err(err));
                return Ok(());
            }
        }

        let reply = st.scripted.get(&cmd).cloned();
        if st.auto_ack {
            st.pending.push_back(Ok(ACK_FRAME.to_vec()));
        }
        if let Some(reply) = reply {
            st.pending.push_back(Ok(reply));
        }
        Ok(())
    }

    fn receive(&mut self, deadline: Instant) -> Result<Vec<u8>> {
        {
            let mut st = self.state();
            if st.closed {
                return Err(Error::transport(TransportErrorKind::NotOpen, "mock closed"));
            }
            if let Some(unit) = st.pending.pop_front() {
                return unit;
            }
            if let Some(resp) = st.responses.pop_front() {
                return Ok(resp);
            }
        }

        // Nothing to say: behave like a silent chip
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        Err(Error::Timeout)
    }

    fn close(&mut self) -> Result<()> {
        self.state().closed = true;
        Ok(())
    }

    fn transport_type(&self) -> TransportType {
        self.state().transport_type
    }

    fn wake_up(&mut self) -> Result<()> {
        self.state().wake_ups += 1;
        Ok(())
    }
}

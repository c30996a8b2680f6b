// libretag/src/transport/mock.rs

use std::collections::{HashMap, HashSet, VecDeque};

use crate::transport::traits::{TagHandle, Transceiver};
use crate::types::{Block, Uid};
use crate::{Error, Result};

/// Number of addressable blocks simulated by the mock tag
pub const MOCK_MEMORY_BLOCKS: usize = 256;

/// One recorded exchange with the mock tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOp {
    /// `connect` call
    Connect,
    /// Block read
    Read(u8),
    /// Block write
    Write(u8, Block),
    /// Custom command with its parameters
    Custom(u16, Vec<u8>),
    /// Session end with optional message
    Invalidate(Option<String>),
}

/// Mock transceiver for tests. It simulates tag memory, answers custom
/// commands from queued or default responses and journals every exchange.
#[derive(Debug)]
pub struct MockTransceiver {
    /// UID reported on connect
    pub uid: Uid,
    /// Simulated FRAM
    pub memory: Vec<Block>,
    /// Every exchange in call order
    pub ops: Vec<MockOp>,
    /// Per-code responses consumed in order before the default applies
    pub responses: HashMap<u16, VecDeque<Vec<u8>>>,
    /// Per-code responses once the queue is empty
    pub default_responses: HashMap<u16, Vec<u8>>,
    /// Blocks whose reads fail
    pub failing_reads: HashSet<u8>,
    /// Blocks whose writes fail
    pub failing_writes: HashSet<u8>,
    /// Command codes that fail
    pub failing_commands: HashSet<u16>,
    /// Testing hook: number of connect calls that should fail
    pub connect_failures: usize,
}

impl MockTransceiver {
    /// Mock tag with zeroed memory
    pub fn new(uid: Uid) -> Self {
        Self {
            uid,
            memory: vec![Block::ZERO; MOCK_MEMORY_BLOCKS],
            ops: Vec::new(),
            responses: HashMap::new(),
            default_responses: HashMap::new(),
            failing_reads: HashSet::new(),
            failing_writes: HashSet::new(),
            failing_commands: HashSet::new(),
            connect_failures: 0,
        }
    }

    /// Preload block `number`.
    pub fn set_block(&mut self, number: u8, data: Block) {
        self.memory[usize::from(number)] = data;
    }

    /// Current contents of block `number`
    pub fn block(&self, number: u8) -> Block {
        self.memory[usize::from(number)]
    }

    /// Queue a one-shot response for the next command with `code`.
    pub fn push_response(&mut self, code: u16, resp: Vec<u8>) {
        self.responses.entry(code).or_default().push_back(resp);
    }

    /// Answer `code` with `resp` whenever its queue is empty.
    pub fn set_default_response(&mut self, code: u16, resp: Vec<u8>) {
        self.default_responses.insert(code, resp);
    }

    /// Make reads of block `number` fail.
    pub fn fail_read(&mut self, number: u8) {
        self.failing_reads.insert(number);
    }

    /// Make writes to block `number` fail.
    pub fn fail_write(&mut self, number: u8) {
        self.failing_writes.insert(number);
    }

    /// Make command `code` fail.
    pub fn fail_command(&mut self, code: u16) {
        self.failing_commands.insert(code);
    }

    /// Recorded writes in order
    pub fn writes(&self) -> Vec<(u8, Block)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                MockOp::Write(n, b) => Some((*n, *b)),
                _ => None,
            })
            .collect()
    }

    /// Recorded custom commands in order
    pub fn commands(&self) -> Vec<(u16, Vec<u8>)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                MockOp::Custom(code, params) => Some((*code, params.clone())),
                _ => None,
            })
            .collect()
    }

    /// Number of custom commands sent with `code`
    pub fn command_count(&self, code: u16) -> usize {
        self.commands().iter().filter(|(c, _)| *c == code).count()
    }
}

impl Transceiver for MockTransceiver {
    fn connect(&mut self) -> Result<TagHandle> {
        self.ops.push(MockOp::Connect);
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            return Err(Error::Transport("no tag in range".into()));
        }
        Ok(TagHandle::new(self.uid))
    }

    fn read_block(&mut self, _tag: &TagHandle, block: u8) -> Result<Block> {
        self.ops.push(MockOp::Read(block));
        if self.failing_reads.contains(&block) {
            return Err(Error::Transport(format!("read of block {:#04x} failed", block)));
        }
        Ok(self.block(block))
    }

    fn write_block(&mut self, _tag: &TagHandle, block: u8, data: &Block) -> Result<()> {
        self.ops.push(MockOp::Write(block, *data));
        if self.failing_writes.contains(&block) {
            return Err(Error::Transport(format!("write of block {:#04x} failed", block)));
        }
        self.set_block(block, *data);
        Ok(())
    }

    fn custom_command(&mut self, _tag: &TagHandle, code: u16, params: &[u8]) -> Result<Vec<u8>> {
        self.ops.push(MockOp::Custom(code, params.to_vec()));
        if self.failing_commands.contains(&code) {
            return Err(Error::Transport(format!("command {:#04x} failed", code)));
        }
        if let Some(resp) = self.responses.get_mut(&code).and_then(VecDeque::pop_front) {
            return Ok(resp);
        }
        Ok(self.default_responses.get(&code).cloned().unwrap_or_default())
    }

    fn invalidate(&mut self, _tag: &TagHandle, message: Option<&str>) {
        self.ops.push(MockOp::Invalidate(message.map(str::to_owned)));
    }
}

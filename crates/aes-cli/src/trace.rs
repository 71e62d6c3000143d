//! Console rendering of cipher internals.

use std::io::{self, Write};

use aes_core::{Block, Direction, RoundKeys, Step, Trace, BLOCK_SIZE};

/// Writes every state, round key and chained block as hex grids.
pub struct ConsoleTrace<W: Write> {
    out: W,
}

impl ConsoleTrace<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleTrace<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: String) {
        // Tracing is best effort; a closed stdout must not abort the cipher.
        let _ = self.out.write_all(text.as_bytes());
    }
}

/// Formats a state as four rows, reading byte `row + 4 * col`.
pub fn format_state(title: &str, state: &Block) -> String {
    let mut text = format!("{title}:\n");
    for row in 0..4 {
        for col in 0..4 {
            text.push_str(&format!("{:02x} ", state[row + 4 * col]));
        }
        text.push('\n');
    }
    text.push('\n');
    text
}

/// Formats bytes `per_line` at a time in storage order.
pub fn format_bytes(title: &str, bytes: &[u8], per_line: usize) -> String {
    let mut text = format!("{title}:\n");
    for line in bytes.chunks(per_line) {
        for byte in line {
            text.push_str(&format!("{byte:02x} "));
        }
        text.push('\n');
    }
    text.push('\n');
    text
}

impl<W: Write> Trace for ConsoleTrace<W> {
    fn state(&mut self, step: Step, round: usize, state: &Block) {
        let title = match step {
            Step::Input => "Initial State".to_string(),
            _ => format!("After {step} (Round {round})"),
        };
        self.emit(format_state(&title, state));
    }

    fn round_key(&mut self, round: usize, key: &Block, direction: Direction) {
        self.emit(format_bytes(
            &format!("Round Key {round} ({direction})"),
            key,
            4,
        ));
    }

    fn key_schedule(&mut self, round_keys: &RoundKeys) {
        self.emit(format_bytes(
            "Expanded Key Schedule",
            &round_keys.to_bytes(),
            BLOCK_SIZE,
        ));
    }

    fn chained(&mut self, index: usize, _direction: Direction, block: &Block) {
        self.emit(format_state(&format!("Block {index} after XOR"), block));
    }
}

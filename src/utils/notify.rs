//! Audible notification for new bubbles.

use std::io::{self, Write};

const BEL: &[u8] = b"\x07";

pub fn ring_bell<W: Write>(writer: &mut W, times: usize) -> io::Result<()> {
    for _ in 0..times {
        writer.write_all(BEL)?;
    }
    writer.flush()
}

/// Ring the terminal bell `times` times. Failures are logged, never surfaced.
pub fn notify(times: usize) {
    if times == 0 {
        return;
    }
    if let Err(err) = ring_bell(&mut io::stdout(), times) {
        tracing::warn!(error = %err, "notification bell failed");
    }
}

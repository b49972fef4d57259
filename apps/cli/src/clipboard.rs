//! Clipboard seam. Copy failures are swallowed by the session, so
//! implementations only report success or failure.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Opaque clipboard failure. Nothing downstream inspects the cause.
#[derive(Debug)]
pub struct ClipboardError;

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies via the OSC 52 terminal escape sequence, which most modern
/// terminal emulators forward to the system clipboard.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let payload = STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{payload}\x07").map_err(|_| ClipboardError)?;
        self.out.flush().map_err(|_| ClipboardError)
    }
}

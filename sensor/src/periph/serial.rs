use std::fmt::Display;
use std::io::{self, Stdout, Write};

/// The board's console. Device output goes here, diagnostics go to `log`.
pub struct Serial<W: Write> {
    out: W,
}

impl Serial<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Serial<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn println(&mut self, line: impl Display) {
        // a board with nothing on the other end of the UART just drops bytes
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            log::warn!("serial write failed {:?}", e);
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

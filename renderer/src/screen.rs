use crossterm::{
    cursor::{Hide, MoveTo, Show},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};
use tracing::warn;

/// Raw-mode drawing surface. The terminal is restored when this is
/// dropped, including when setup fails halfway.
pub struct Screen<W: Write> {
    out: W,
    raw: bool,
}

impl<W: Write> Screen<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Self::prepare(Self { out, raw: true })
    }

    fn prepare(mut screen: Self) -> io::Result<Self> {
        screen.out.execute(Hide)?;
        screen.out.execute(Clear(ClearType::All))?;
        Ok(screen)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        if let Err(e) = self.out.execute(Show) {
            warn!(error = %e, "restoring the cursor");
        }
        if self.raw {
            if let Err(e) = terminal::disable_raw_mode() {
                warn!(error = %e, "leaving raw mode");
            }
        }
        let _ = self.out.execute(Clear(ClearType::All));
        let _ = self.out.execute(MoveTo(0, 0));
    }
}

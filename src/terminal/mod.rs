//! Ownership of the terminal's input mode.
//!
//! The terminal is either in interactive mode (raw input, alternate screen)
//! or handed back in cooked mode. [`TerminalSession`] is the single owner of
//! that resource. Handing the terminal to another program goes through
//! [`TerminalSession::suspend`], which returns a [`Suspended`] guard that
//! borrows the session mutably, so nothing can read input or suspend twice
//! while it is held. The guard restores interactive mode exactly once, either
//! through [`Suspended::resume`] or on drop.

pub mod handoff;

pub use handoff::{EditorCommand, EditorExit, EditorHandoff, EditorLauncher, ProcessLauncher};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tracing::{debug, warn};

/// Switches the terminal between interactive and cooked mode.
pub trait TerminalMode {
    /// Enter raw input mode and the alternate screen.
    fn enter(&mut self) -> io::Result<()>;

    /// Restore cooked input mode and the main screen.
    fn leave(&mut self) -> io::Result<()>;
}

/// Real terminal mode switching through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), Show, LeaveAlternateScreen)?;
        Ok(())
    }
}

/// Exclusive owner of the terminal's interactive mode.
#[derive(Debug)]
pub struct TerminalSession<M: TerminalMode> {
    mode: M,
    interactive: bool,
}

impl<M: TerminalMode> TerminalSession<M> {
    /// Take over the terminal and enter interactive mode.
    pub fn start(mut mode: M) -> io::Result<Self> {
        mode.enter()?;
        debug!("Terminal session started");
        Ok(Self {
            mode,
            interactive: true,
        })
    }

    /// Whether the terminal is currently in interactive mode.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Hand the terminal back in cooked mode until the guard is released.
    pub fn suspend(&mut self) -> io::Result<Suspended<'_, M>> {
        assert!(self.interactive, "terminal session suspended twice");
        self.mode.leave()?;
        self.interactive = false;
        debug!("Terminal session suspended");
        Ok(Suspended {
            session: self,
            resumed: false,
        })
    }

    /// Restore cooked mode for good.
    pub fn finish(mut self) -> io::Result<()> {
        self.release()
    }

    /// Access the mode implementation, for inspection in tests.
    pub fn mode(&self) -> &M {
        &self.mode
    }

    fn release(&mut self) -> io::Result<()> {
        if self.interactive {
            self.interactive = false;
            self.mode.leave()?;
            debug!("Terminal session finished");
        }
        Ok(())
    }
}

impl<M: TerminalMode> Drop for TerminalSession<M> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(error = %err, "Failed to restore terminal");
        }
    }
}

/// Guard for a suspended [`TerminalSession`].
#[derive(Debug)]
pub struct Suspended<'a, M: TerminalMode> {
    session: &'a mut TerminalSession<M>,
    resumed: bool,
}

impl<M: TerminalMode> Suspended<'_, M> {
    /// Re-enter interactive mode, reporting failure.
    pub fn resume(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.resumed {
            return Ok(());
        }
        self.resumed = true;
        self.session.mode.enter()?;
        self.session.interactive = true;
        debug!("Terminal session resumed");
        Ok(())
    }
}

impl<M: TerminalMode> Drop for Suspended<'_, M> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "Failed to resume terminal session");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording doubles for terminal mode switching.

    use super::TerminalMode;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// Shared log of terminal and process events, in call order.
    pub type CallLog = Rc<RefCell<Vec<String>>>;

    /// Terminal mode that records `enter` / `leave` calls.
    #[derive(Debug, Default)]
    pub struct RecordingMode {
        pub log: CallLog,
        pub fail_enter_after: Option<usize>,
        enters: usize,
    }

    impl RecordingMode {
        pub fn with_log(log: CallLog) -> Self {
            Self {
                log,
                fail_enter_after: None,
                enters: 0,
            }
        }
    }

    impl TerminalMode for RecordingMode {
        fn enter(&mut self) -> io::Result<()> {
            self.enters += 1;
            self.log.borrow_mut().push("enter".to_string());
            match self.fail_enter_after {
                Some(limit) if self.enters > limit => Err(io::Error::other("tty gone")),
                _ => Ok(()),
            }
        }

        fn leave(&mut self) -> io::Result<()> {
            self.log.borrow_mut().push("leave".to_string());
            Ok(())
        }
    }
}

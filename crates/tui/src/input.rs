use cpuspeed_core::{CancellationContext, WaitOutcome};
use std::{
    io::{self, ErrorKind, Read},
    thread::{self, JoinHandle},
    time::Duration,
};

/// Input events that the application can handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Unknown,
}

impl InputEvent {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'q' => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// Polls a non-blocking reader for the quit key between short waits on the
/// shared cancellation context
pub struct InputListener<R> {
    reader: Option<R>,
    poll_interval: Duration,
}

impl<R: Read> InputListener<R> {
    /// `reader` must not block; `None` listens for cancellation only
    pub fn new(reader: Option<R>, poll_interval: Duration) -> Self {
        Self {
            reader,
            poll_interval,
        }
    }

    /// Run until the quit key is read or the context is canceled elsewhere
    pub fn listen(mut self, cancel: &CancellationContext) {
        loop {
            if self.poll_event() == Some(InputEvent::Quit) {
                log::debug!("quit key pressed");
                cancel.cancel();
                break;
            }

            if cancel.wait(self.poll_interval) == WaitOutcome::Canceled {
                break;
            }
        }
    }

    /// Read whatever is pending without blocking
    fn poll_event(&mut self) -> Option<InputEvent> {
        let reader = self.reader.as_mut()?;
        let mut buf = [0u8; 32];

        match reader.read(&mut buf) {
            Ok(n) => buf[..n]
                .iter()
                .map(|&byte| InputEvent::from_byte(byte))
                .find(|event| *event == InputEvent::Quit),
            Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) => None,
            Err(e) => {
                log::warn!("stopped reading keyboard input: {}", e);
                self.reader = None;
                None
            }
        }
    }
}

/// Start the keyboard listener on stdin in its own thread. Stdin is put in
/// non-canonical, non-blocking mode for as long as the thread runs.
pub fn spawn_stdin_listener(
    cancel: CancellationContext,
    poll_interval: Duration,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || {
            let guard = raw::RawInputGuard::enable();
            let reader = guard.as_ref().map(|_| io::stdin());
            InputListener::new(reader, poll_interval).listen(&cancel);
            drop(guard);
        })
}

#[cfg(unix)]
mod raw {
    use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
    use std::{io, os::fd::AsFd};

    /// Restores the original stdin attributes on drop
    pub struct RawInputGuard {
        original: Termios,
    }

    impl RawInputGuard {
        /// Disable echo and line buffering and make reads return immediately.
        /// Returns `None` when stdin is not a terminal.
        pub fn enable() -> Option<Self> {
            let stdin = io::stdin();
            let original = match termios::tcgetattr(stdin.as_fd()) {
                Ok(original) => original,
                Err(e) => {
                    log::debug!("stdin is not a terminal, keyboard input disabled: {}", e);
                    return None;
                }
            };

            let mut attrs = original.clone();
            attrs.local_flags.remove(LocalFlags::ECHO | LocalFlags::ICANON);
            attrs.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
            attrs.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

            if let Err(e) = termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &attrs) {
                log::warn!("failed to configure stdin: {}", e);
                return None;
            }

            Some(Self { original })
        }
    }

    impl Drop for RawInputGuard {
        fn drop(&mut self) {
            let stdin = io::stdin();
            if let Err(e) = termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &self.original) {
                log::warn!("failed to restore stdin: {}", e);
            }
        }
    }
}

#[cfg(not(unix))]
mod raw {
    /// Keyboard input is only supported on unix terminals
    pub struct RawInputGuard;

    impl RawInputGuard {
        pub fn enable() -> Option<Self> {
            None
        }
    }
}

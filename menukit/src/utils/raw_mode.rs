//! # Raw Keystroke Input
//!
//! Reads a single key straight from the keyboard, without waiting for
//! Enter. The terminal is switched to raw mode (no line buffering, no echo)
//! for exactly one keystroke and switched back afterwards.
//!
//! Switching is scoped by [`RawModeGuard`]: the mode saved on acquisition is
//! restored when the guard drops, on every path. Attribute failures are
//! reported on stderr and through `tracing`, but never abort the read.
//!
//! - Unix: `termios` via `libc`.
//! - Windows: console mode via `crossterm`.
use std::io::{self, Read};

use cfg_if::cfg_if;
use tracing::warn;

/// Query and switch the input device mode.
///
/// Implemented per platform; tests plug in a recording fake.
pub trait ModeControl {
    type Mode;

    /// Returns the current mode so it can be restored later.
    fn query(&self) -> io::Result<Self::Mode>;

    /// Switches to raw mode, derived from the `saved` mode.
    fn enter_raw(&self, saved: &Self::Mode) -> io::Result<()>;

    /// Puts the `saved` mode back.
    fn restore(&self, saved: &Self::Mode) -> io::Result<()>;
}

/// Holds raw mode for as long as it lives.
pub struct RawModeGuard<'a, C: ModeControl> {
    control: &'a C,
    saved: Option<C::Mode>,
}

impl<'a, C: ModeControl> RawModeGuard<'a, C> {
    /// Saves the current mode and enters raw mode.
    ///
    /// If the mode cannot be queried nothing is switched (and nothing will be
    /// restored). If entering raw mode fails, the saved mode is still
    /// restored on drop.
    pub fn acquire(control: &'a C) -> Self {
        let saved = match control.query() {
            Ok(saved) => saved,
            Err(e) => {
                report("query terminal mode", &e);
                return Self {
                    control,
                    saved: None,
                };
            }
        };

        if let Err(e) = control.enter_raw(&saved) {
            report("enter raw mode", &e);
        }

        Self {
            control,
            saved: Some(saved),
        }
    }
}

impl<C: ModeControl> Drop for RawModeGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if let Err(e) = self.control.restore(&saved) {
                report("restore terminal mode", &e);
            }
        }
    }
}

/// Reads one byte, retrying reads interrupted by a signal.
///
/// Returns `Ok(None)` at end of input.
pub(crate) fn read_byte(input: &mut impl Read) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn report(action: &str, err: &io::Error) {
    warn!(error = %err, "failed to {action}");
    eprintln!("Couldn't {action}: {err}");
}

cfg_if! {
    if #[cfg(unix)] {
        use std::os::fd::RawFd;

        /// `termios` attributes of a file descriptor.
        pub struct Termios {
            fd: RawFd,
        }

        impl Termios {
            pub fn stdin() -> Self {
                Self { fd: libc::STDIN_FILENO }
            }
        }

        impl ModeControl for Termios {
            type Mode = libc::termios;

            fn query(&self) -> io::Result<libc::termios> {
                let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
                if unsafe { libc::tcgetattr(self.fd, &mut attrs) } < 0 {
                    return Err(io::Error::last_os_error());
                }
                Ok(attrs)
            }

            fn enter_raw(&self, saved: &libc::termios) -> io::Result<()> {
                let mut raw = *saved;
                raw.c_lflag &= !(libc::ICANON | libc::ECHO);
                raw.c_cc[libc::VMIN] = 1;
                raw.c_cc[libc::VTIME] = 0;
                set_attrs(self.fd, libc::TCSANOW, &raw)
            }

            fn restore(&self, saved: &libc::termios) -> io::Result<()> {
                set_attrs(self.fd, libc::TCSADRAIN, saved)
            }
        }

        fn set_attrs(fd: RawFd, when: libc::c_int, attrs: &libc::termios) -> io::Result<()> {
            if unsafe { libc::tcsetattr(fd, when, attrs) } < 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        }

        /// Reads one keystroke from stdin in raw mode.
        ///
        /// Returns `Ok(None)` at end of input.
        pub fn read_keystroke() -> io::Result<Option<char>> {
            let termios = Termios::stdin();
            let _guard = RawModeGuard::acquire(&termios);
            // Through the std lock, so bytes already buffered by line reads come first.
            Ok(read_byte(&mut io::stdin().lock())?.map(char::from))
        }
    } else if #[cfg(windows)] {
        use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

        /// Console raw mode as exposed by `crossterm`.
        pub struct ConsoleMode;

        impl ModeControl for ConsoleMode {
            type Mode = bool;

            fn query(&self) -> io::Result<bool> {
                crossterm::terminal::is_raw_mode_enabled()
            }

            fn enter_raw(&self, _saved: &bool) -> io::Result<()> {
                crossterm::terminal::enable_raw_mode()
            }

            fn restore(&self, saved: &bool) -> io::Result<()> {
                if *saved {
                    Ok(())
                } else {
                    crossterm::terminal::disable_raw_mode()
                }
            }
        }

        /// Reads one keystroke from the console in raw mode.
        ///
        /// Keys without a character (arrows, function keys) are skipped.
        /// Ctrl+C fails with [`io::ErrorKind::Interrupted`].
        pub fn read_keystroke() -> io::Result<Option<char>> {
            let _guard = RawModeGuard::acquire(&ConsoleMode);
            loop {
                if let Event::Key(key) = event::read()? {
                    if let Some(c) = key_char(&key)? {
                        return Ok(Some(c));
                    }
                }
            }
        }

        /// The character a key press stands for, if any.
        fn key_char(key: &KeyEvent) -> io::Result<Option<char>> {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by Ctrl+C"))
                }
                _ if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(None),
                KeyCode::Char(c) => Ok(Some(c)),
                _ => Ok(None),
            }
        }
    } else {
        /// No raw mode on this platform: falls back to one byte of stdin.
        pub fn read_keystroke() -> io::Result<Option<char>> {
            Ok(read_byte(&mut io::stdin().lock())?.map(char::from))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeControl {
        fail_query: bool,
        fail_enter: bool,
        fail_restore: bool,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeControl {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    impl ModeControl for FakeControl {
        type Mode = u32;

        fn query(&self) -> io::Result<u32> {
            self.calls.borrow_mut().push("query");
            if self.fail_query {
                return Err(io::Error::other("tcgetattr"));
            }
            Ok(7)
        }

        fn enter_raw(&self, saved: &u32) -> io::Result<()> {
            assert_eq!(*saved, 7);
            self.calls.borrow_mut().push("enter_raw");
            if self.fail_enter {
                return Err(io::Error::other("tcsetattr"));
            }
            Ok(())
        }

        fn restore(&self, saved: &u32) -> io::Result<()> {
            assert_eq!(*saved, 7);
            self.calls.borrow_mut().push("restore");
            if self.fail_restore {
                return Err(io::Error::other("tcsetattr"));
            }
            Ok(())
        }
    }

    /// Fails with `Interrupted` a few times before reading.
    struct Flaky<R> {
        interrupts: usize,
        inner: R,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupts > 0 {
                self.interrupts -= 1;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_read_byte_retries_interrupted_reads() {
        let mut input = Flaky {
            interrupts: 2,
            inner: io::Cursor::new(b"7".to_vec()),
        };
        assert_eq!(read_byte(&mut input).unwrap(), Some(b'7'));
        assert_eq!(read_byte(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_byte_propagates_other_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("gone"))
            }
        }
        assert!(read_byte(&mut Broken).is_err());
    }

    #[test]
    fn test_read_byte_sees_bytes_left_by_line_reads() {
        use std::io::BufRead;

        let mut input = io::BufReader::new(io::Cursor::new(b"1\n10".to_vec()));
        let mut line = Vec::new();
        input.read_until(b'\n', &mut line).unwrap();
        assert_eq!(line, b"1\n");
        // The rest is already in the reader's buffer, not in the source.
        assert_eq!(read_byte(&mut input).unwrap(), Some(b'1'));
        assert_eq!(read_byte(&mut input).unwrap(), Some(b'0'));
        assert_eq!(read_byte(&mut input).unwrap(), None);
    }

    #[cfg(windows)]
    #[test]
    fn test_key_char_ctrl_c_interrupts() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let err = key_char(&ctrl_c).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);

        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(key_char(&ctrl_x).unwrap(), None);

        let digit = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(key_char(&digit).unwrap(), Some('3'));
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let control = FakeControl::default();
        {
            let _guard = RawModeGuard::acquire(&control);
            assert_eq!(control.calls(), vec!["query", "enter_raw"]);
        }
        assert_eq!(control.calls(), vec!["query", "enter_raw", "restore"]);
    }

    #[test]
    fn test_guard_restores_when_enter_raw_fails() {
        let control = FakeControl {
            fail_enter: true,
            ..Default::default()
        };
        drop(RawModeGuard::acquire(&control));
        assert_eq!(control.calls(), vec!["query", "enter_raw", "restore"]);
    }

    #[test]
    fn test_guard_skips_switch_when_query_fails() {
        let control = FakeControl {
            fail_query: true,
            ..Default::default()
        };
        drop(RawModeGuard::acquire(&control));
        assert_eq!(control.calls(), vec!["query"]);
    }

    #[test]
    fn test_guard_restore_failure_does_not_panic() {
        let control = FakeControl {
            fail_restore: true,
            ..Default::default()
        };
        drop(RawModeGuard::acquire(&control));
        assert_eq!(control.calls(), vec!["query", "enter_raw", "restore"]);
    }

    #[test]
    fn test_guard_restores_during_unwind() {
        let control = FakeControl::default();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = RawModeGuard::acquire(&control);
            panic!("read failed");
        }));
        assert!(res.is_err());
        assert_eq!(control.calls(), vec!["query", "enter_raw", "restore"]);
    }
}

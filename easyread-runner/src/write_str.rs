// Copyright (c) The easyread Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! String-only sinks for rendered output.
//!
//! Reporters render into either a terminal or an in-memory buffer. Everything they write is
//! text, so this trait accepts `&str` rather than bytes, while still returning [`io::Error`] so
//! that terminal failures propagate with `?`.

use std::{
    fmt,
    io::{self, BufWriter, Write},
};

/// A writer that accepts strings.
///
/// For more, see the [module-level documentation](self).
pub trait WriteStr {
    /// Writes a string to the writer.
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    /// Flushes any buffered output to its destination.
    fn write_str_flush(&mut self) -> io::Result<()>;

    /// Writes formatted text to the writer.
    ///
    /// This makes `write!` and `writeln!` work on any `WriteStr`.
    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        // Route through fmt::Write, stashing the underlying io::Error so it isn't lost.
        struct Adapter<'a, T: ?Sized> {
            inner: &'a mut T,
            error: Option<io::Error>,
        }

        impl<T: ?Sized + WriteStr> fmt::Write for Adapter<'_, T> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.inner.write_str(s).map_err(|error| {
                    self.error = Some(error);
                    fmt::Error
                })
            }
        }

        let mut adapter = Adapter {
            inner: self,
            error: None,
        };
        match fmt::write(&mut adapter, fmt) {
            Ok(()) => Ok(()),
            Err(_) => Err(adapter
                .error
                .unwrap_or_else(|| io::Error::other("formatter error"))),
        }
    }
}

impl WriteStr for String {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteStr for Vec<u8> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write> WriteStr for BufWriter<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<T: WriteStr + ?Sized> WriteStr for &mut T {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }

    fn write_str_flush(&mut self) -> io::Result<()> {
        (**self).write_str_flush()
    }

    fn write_fmt(&mut self, fmt: fmt::Arguments<'_>) -> io::Result<()> {
        (**self).write_fmt(fmt)
    }
}

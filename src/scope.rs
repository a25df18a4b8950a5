use std::ops::{Deref, DerefMut};

use crate::{HeaderStackError, Printer};

/// RAII guard that keeps a header pushed on a [`Printer`] for its lifetime.
///
/// Created by [`Printer::scoped_header`]. Dropping the guard pops the header it
/// pushed. The guard derefs to the printer, so printing goes through it
/// directly and nested scopes can be opened from it.
#[must_use = "dropping the scope immediately pops its header"]
pub struct HeaderScope<'a> {
    printer: &'a mut Printer,
    header: String,
    depth: usize,
}

impl<'a> HeaderScope<'a> {
    pub(crate) fn new(printer: &'a mut Printer, header: String) -> Self {
        printer.push_header(header.clone());
        let depth = printer.depth();
        Self {
            printer,
            header,
            depth,
        }
    }

    /// The header this scope pushed and will pop.
    pub fn header(&self) -> &str {
        &self.header
    }
}

impl Drop for HeaderScope<'_> {
    fn drop(&mut self) {
        let result = if self.printer.depth() != self.depth {
            Err(HeaderStackError::Unbalanced {
                header: self.header.clone(),
                expected: self.depth,
                actual: self.printer.depth(),
            })
        } else {
            self.printer.try_pop_header(&self.header)
        };
        if let Err(violation) = result {
            // A second panic while unwinding would abort and hide the first.
            if !std::thread::panicking() {
                panic!("{}", violation);
            }
        }
    }
}

impl Deref for HeaderScope<'_> {
    type Target = Printer;

    fn deref(&self) -> &Self::Target {
        self.printer
    }
}

impl DerefMut for HeaderScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.printer
    }
}

use alloc::string::String;
use core::cell::RefCell;
use core::fmt::{self, Write};

/// Append-only record of completed operations and what each one cost.
#[derive(Clone, Default)]
pub(crate) struct AuditLog {
    buffer: RefCell<String>,
}

impl AuditLog {
    pub(crate) const fn new() -> Self {
        Self {
            buffer: RefCell::new(String::new()),
        }
    }

    /// Appends one line for a completed operation.
    pub(crate) fn record(&self, operation: fmt::Arguments<'_>, comparisons: usize) {
        log::trace!("{operation} used {comparisons} comparison(s)");
        // Writing into a `String` cannot fail.
        let _ = writeln!(
            self.buffer.borrow_mut(),
            "Operation {operation} completed using {comparisons} comparison(s)."
        );
    }

    /// Returns everything recorded so far and starts a fresh log.
    pub(crate) fn take(&self) -> String {
        self.buffer.take()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn take_drains() {
        let log = AuditLog::new();
        log.record(format_args!("add({})", 5), 0);
        log.record(format_args!("min()"), 1);
        assert_eq!(
            log.take(),
            "Operation add(5) completed using 0 comparison(s).\nOperation min() completed using 1 comparison(s).\n"
        );
        assert_eq!(log.take(), "");
    }
}

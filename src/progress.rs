// src/progress.rs
/// Lightweight progress reporting used by long-running stages.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (a page, a company).
    fn item_done(&mut self, _label: &str) {}

    /// Called when one logical unit failed but the stage carries on.
    fn item_failed(&mut self, _label: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints every status line to stdout, the way the pipeline has always been watched.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        if self.total > 0 {
            println!("  ✓ {label} ({}/{})", self.done, self.total);
        }
    }
    fn item_failed(&mut self, label: &str, err: &str) {
        self.failed += 1;
        println!("  ❌ {label}: {err}");
    }
    fn finish(&mut self) {
        if self.failed > 0 {
            println!("{} ok, {} failed", self.done, self.failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_counts_done_and_failed() {
        let mut p = ConsoleProgress::new();
        p.begin(3);
        p.item_done("a");
        p.item_failed("b", "timeout");
        p.item_done("c");
        p.finish();
        assert_eq!((p.total, p.done, p.failed), (3, 2, 1));
    }
}

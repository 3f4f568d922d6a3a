use std::time::{Duration, Instant};

/// Logs how long a scope took when dropped, plus a per-item rate once a
/// count has been recorded.
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
    items: Option<usize>,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            items: None,
        }
    }

    pub fn record_items(&mut self, items: usize) {
        self.items = Some(items);
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        match self.items {
            Some(n) if n > 0 => log::info!(
                "{}: {} items in {:?} ({:?}/item)",
                self.label,
                n,
                elapsed,
                per_item(elapsed, n)
            ),
            _ => log::info!("{} took {:?}", self.label, elapsed),
        }
    }
}

fn per_item(elapsed: Duration, items: usize) -> Duration {
    elapsed.div_f64(items as f64)
}

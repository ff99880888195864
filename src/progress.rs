/// Monotonic relay of fractional completion to a caller-provided callback.
///
/// The relayed value never decreases within one job: late or out-of-order
/// reports are clamped up to the highest value seen so far. Values are clamped
/// into `[0, 1]`. The reporter is scoped to one job and not persisted.
///
/// Capture-phase steps map into `[0, 0.5]` and encode-phase steps into
/// `[0.5, 1.0]`, mirroring the two-phase cost split of a render job.
pub struct ProgressReporter<F: FnMut(f64)> {
    last: f64,
    emit: F,
}

impl<F: FnMut(f64)> ProgressReporter<F> {
    /// Wrap a callback.
    pub fn new(emit: F) -> Self {
        Self { last: 0.0, emit }
    }

    /// Highest fraction reported so far.
    pub fn last(&self) -> f64 {
        self.last
    }

    /// Relay an absolute fraction, clamped into `[0, 1]` and never below the
    /// previously reported value.
    pub fn report(&mut self, fraction: f64) {
        let f = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.last = self.last.max(f);
        (self.emit)(self.last);
    }

    /// Report `done / total` capture steps scaled into `[0, 0.5]`.
    pub fn capture_step(&mut self, done: u64, total: u64) {
        self.report(0.5 * Self::ratio(done, total));
    }

    /// Report `done / total` encode steps scaled into `[0.5, 1.0]`.
    pub fn encode_step(&mut self, done: u64, total: u64) {
        self.report(0.5 + 0.5 * Self::ratio(done, total));
    }

    fn ratio(done: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (done as f64 / total as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../tests/unit/progress.rs"]
mod tests;

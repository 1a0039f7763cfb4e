/// Snapshot of one completed training iteration.
///
/// The drivers in `train::trainer` return one of these per call; the
/// CLI prints the error and the `log` facade records the full line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Mean squared error after the iteration (for the genetic mode,
    /// the current leader's error).
    pub mse: f64,
    /// Wall-clock duration of the iteration in milliseconds.
    pub elapsed_ms: u64,
}

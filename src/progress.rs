// src/progress.rs
/// Status reporting for a run. Frontends implement this to surface progress;
/// every method defaults to a no-op.
///
/// Item callbacks fire in completion order, which differs from source order
/// once more than one worker runs. `index` is the position in the source list.
pub trait Progress {
    /// Called once with the number of sources.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A source produced a product.
    fn item_done(&mut self, _index: usize, _name: &str) {}

    /// A source was skipped.
    fn item_failed(&mut self, _index: usize, _url: &str, _reason: &str) {}

    /// Called after the last source, before unification.
    fn finish(&mut self) {}
}

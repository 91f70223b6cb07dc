//! Random source port for pipe gap placement.

/// Source of uniform integers in `[0, upper_bound)`.
///
/// The simulator draws one value per spawned pipe pair. Production runs use a
/// seeded RNG; tests substitute a fixed sequence so that episodes are fully
/// reproducible.
pub trait GapSource {
    /// Draw a value in `[0, upper_bound)`. `upper_bound` is always positive.
    fn next_below(&mut self, upper_bound: u32) -> u32;
}

impl<G: GapSource + ?Sized> GapSource for &mut G {
    fn next_below(&mut self, upper_bound: u32) -> u32 {
        (**self).next_below(upper_bound)
    }
}

impl<G: GapSource + ?Sized> GapSource for Box<G> {
    fn next_below(&mut self, upper_bound: u32) -> u32 {
        (**self).next_below(upper_bound)
    }
}

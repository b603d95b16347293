// File: crates/bento-core/src/size.rs
// Summary: Size oracle: derives a widget's {width, height} from its container width.

use tracing::debug;

use crate::types::{Size, DEFAULT_WIDTH, MIN_WIDTH};

/// Observes a container's width and publishes the widget size.
///
/// Width is floored at [`MIN_WIDTH`]. With an aspect ratio the height follows
/// the width (`round(width * aspect)`), otherwise it is the fixed default.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeOracle {
    default_height: f32,
    aspect: Option<f32>,
    current: Size,
    published: u64,
}

impl SizeOracle {
    pub fn new(default_height: f32, aspect: Option<f32>) -> Self {
        Self {
            default_height,
            aspect: aspect.filter(|a| a.is_finite() && *a > 0.0),
            current: Size::new(DEFAULT_WIDTH, default_height),
            published: 0,
        }
    }

    /// Size for a measured container width; pure, publishes nothing.
    pub fn compute(&self, container_width: f32) -> Size {
        let measured = if container_width.is_finite() { container_width } else { 0.0 };
        let width = measured.max(MIN_WIDTH);
        let height = match self.aspect {
            Some(a) => (width * a).round(),
            None => self.default_height,
        };
        Size::new(width, height)
    }

    /// Measure once (mount). `None` means no container: nothing happens.
    pub fn observe(&mut self, container_width: Option<f32>) -> Option<Size> {
        let w = container_width?;
        Some(self.publish(self.compute(w)))
    }

    /// Handle one batch of resize entries (container widths in arrival order).
    /// Publishes exactly once per non-empty batch, using the last entry.
    pub fn observe_batch(&mut self, entries: &[Option<f32>]) -> Option<Size> {
        let last = entries.iter().rev().find_map(|e| *e)?;
        Some(self.publish(self.compute(last)))
    }

    fn publish(&mut self, size: Size) -> Size {
        self.current = size;
        self.published += 1;
        debug!(width = size.width, height = size.height, n = self.published, "size published");
        size
    }

    /// Last published size (or the initial `{600, default_height}`).
    pub fn size(&self) -> Size { self.current }

    /// How many sizes have been published so far.
    pub fn publications(&self) -> u64 { self.published }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_drives_height() {
        let o = SizeOracle::new(300.0, Some(0.42));
        assert_eq!(o.compute(1000.0), Size::new(1000.0, 420.0));
    }

    #[test]
    fn zero_width_clamps_to_floor_before_aspect() {
        let o = SizeOracle::new(300.0, Some(0.42));
        assert_eq!(o.compute(0.0), Size::new(320.0, 134.0));
        let fixed = SizeOracle::new(280.0, None);
        assert_eq!(fixed.compute(0.0), Size::new(320.0, 280.0));
        assert_eq!(fixed.compute(f32::NAN).width, 320.0);
    }

    #[test]
    fn absent_container_is_a_noop() {
        let mut o = SizeOracle::new(300.0, None);
        assert_eq!(o.observe(None), None);
        assert_eq!(o.observe_batch(&[None, None]), None);
        assert_eq!(o.observe_batch(&[]), None);
        assert_eq!(o.publications(), 0);
        assert_eq!(o.size(), Size::new(600.0, 300.0));
    }

    #[test]
    fn one_publication_per_batch() {
        let mut o = SizeOracle::new(300.0, Some(0.5));
        o.observe(Some(800.0));
        let s = o.observe_batch(&[Some(900.0), Some(1000.0), Some(640.0)]);
        assert_eq!(s, Some(Size::new(640.0, 320.0)));
        assert_eq!(o.publications(), 2);
        assert_eq!(o.size(), Size::new(640.0, 320.0));
    }
}

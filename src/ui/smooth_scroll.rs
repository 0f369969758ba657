//! Row-level smooth scroll with exponential ease-out.
//!
//! The page's own scroll position jumps; the preview lags behind it by a
//! row displacement that decays every frame, so anchor jumps and wheel
//! scrolls glide instead of snapping.

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Rows between what is drawn and where the page really is.  Positive
    /// while catching up downwards.
    row_offset: f64,
    prev_target: i64,
    /// Damping: `offset *= (1 - speed)` per frame.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            row_offset: 0.0,
            prev_target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Feed the page's current top row.  A change injects the distance
    /// travelled as displacement.
    pub fn set_target(&mut self, target: i64) {
        if target != self.prev_target {
            self.row_offset += (target - self.prev_target) as f64;
            self.prev_target = target;
        }
    }

    /// Decay toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.row_offset *= 1.0 - self.speed;
        if self.row_offset.abs() < 0.4 {
            self.row_offset = 0.0;
        }
    }

    /// First document row to draw.
    pub fn visible_row(&self) -> i64 {
        self.prev_target - self.row_offset.round() as i64
    }

    pub fn is_animating(&self) -> bool {
        self.row_offset != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glides_to_the_target() {
        let mut scroll = SmoothScroll::new(0.5);
        scroll.set_target(20);
        assert_eq!(scroll.visible_row(), 0);
        scroll.tick();
        assert_eq!(scroll.visible_row(), 10);
        while scroll.is_animating() {
            scroll.tick();
        }
        assert_eq!(scroll.visible_row(), 20);
    }

    #[test]
    fn unchanged_target_is_still() {
        let mut scroll = SmoothScroll::new(0.35);
        scroll.set_target(0);
        assert!(!scroll.is_animating());
    }
}

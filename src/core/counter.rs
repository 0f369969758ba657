//! Coffee counter and footer year, the date-driven bits of the page.

use chrono::{Months, NaiveDate};

use super::dom::{Dom, ElementId, Selector};

/// Whole liters drunk over the last `years` years at one cup a day.
pub fn coffee_liters(today: NaiveDate, years: u32, liters_per_cup: f64) -> u64 {
    let start = today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN);
    let days = (today - start).num_days().max(0);
    (days as f64 * liters_per_cup).floor() as u64
}

/// Count-up animation on `#coffee-counter`, one frame per timer tick.
#[derive(Debug)]
pub struct CoffeeCounter {
    el: ElementId,
    target: u64,
    current: f64,
    increment: f64,
    done: bool,
}

impl CoffeeCounter {
    /// `frames` is the number of ticks the count-up should take.
    pub fn mount<D: Dom>(dom: &D, target: u64, frames: u64) -> Option<Self> {
        let el = dom.find(&Selector::id("coffee-counter"))?;
        Some(Self {
            el,
            target,
            current: 0.0,
            increment: target as f64 / frames.max(1) as f64,
            done: false,
        })
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame.  Returns `true` while more frames are needed.
    pub fn frame<D: Dom>(&mut self, dom: &mut D) -> bool {
        if self.done {
            return false;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            dom.set_text(self.el, &format!("{}+", self.target));
            self.done = true;
            false
        } else {
            dom.set_text(self.el, &format!("{}+", self.current.floor() as u64));
            true
        }
    }
}

/// Write the current year into `#year`, if present.
pub fn stamp_year<D: Dom>(dom: &mut D, year: i32) -> bool {
    match dom.find(&Selector::id("year")) {
        Some(el) => {
            dom.set_text(el, &year.to_string());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryDom;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn eight_years_of_coffee() {
        // 2018-06-01 .. 2026-06-01 spans two leap days: 2922 days.
        assert_eq!(coffee_liters(date(2026, 6, 1), 8, 0.24), 701);
        assert_eq!(coffee_liters(date(2026, 6, 1), 0, 0.24), 0);
    }

    #[test]
    fn counts_up_then_stops_on_target() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let el = dom.append(body, "span").id("coffee-counter").done();
        let mut counter = CoffeeCounter::mount(&dom, 10, 4).unwrap();
        assert!(counter.frame(&mut dom));
        assert_eq!(dom.text(el), "2+");
        let mut frames = 1;
        while counter.frame(&mut dom) {
            frames += 1;
        }
        assert_eq!(frames, 3);
        assert_eq!(dom.text(el), "10+");
        assert!(counter.is_done());
        assert!(!counter.frame(&mut dom));
    }

    #[test]
    fn zero_target_finishes_on_first_frame() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let el = dom.append(body, "span").id("coffee-counter").done();
        let mut counter = CoffeeCounter::mount(&dom, 0, 125).unwrap();
        assert!(!counter.frame(&mut dom));
        assert_eq!(dom.text(el), "0+");
    }

    #[test]
    fn year_stamp_is_optional() {
        let mut dom = MemoryDom::new();
        assert!(!stamp_year(&mut dom, 2026));
        let body = dom.body();
        let el = dom.append(body, "span").id("year").done();
        assert!(stamp_year(&mut dom, 2026));
        assert_eq!(dom.text(el), "2026");
    }
}

use super::anim::AnimationSession;
use super::Fill;
use std::time::{Duration, Instant};

pub const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const ANIMATION: Duration = Duration::from_millis(1100);

/// Share of each slot's width the bar occupies; the rest is gutter.
const BAR_WIDTH_RATIO: f64 = 0.7;

/// Default weekly activity percentages when the data supplies none.
pub const DEFAULT_WEEK: [f64; 7] = [72.0, 48.0, 85.0, 61.0, 34.0, 90.0, 55.0];

/// Horizontal span of one bar in normalized [0, 1] chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpan {
    pub left: f64,
    pub right: f64,
}

impl BarSpan {
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.left && x <= self.right
    }
}

pub fn bar_span(index: usize) -> BarSpan {
    let slot = 1.0 / DAY_NAMES.len() as f64;
    let gutter = slot * (1.0 - BAR_WIDTH_RATIO) / 2.0;
    let left = index as f64 * slot + gutter;
    BarSpan {
        left,
        right: left + slot * BAR_WIDTH_RATIO,
    }
}

/// Weekly bar chart: seven rounded-top bars animating from zero height,
/// stripe-patterned when below the target threshold. Hover is by horizontal
/// span only.
#[derive(Debug)]
pub struct BarChart {
    values: [f64; 7],
    threshold: f64,
    anim: AnimationSession,
    hover: Option<usize>,
}

impl BarChart {
    pub fn new(values: [f64; 7], threshold: f64, now: Instant) -> Self {
        BarChart {
            values,
            threshold,
            anim: AnimationSession::start(now, ANIMATION),
            hover: None,
        }
    }

    pub fn with_defaults(now: Instant) -> Self {
        BarChart::new(DEFAULT_WEEK, 50.0, now)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.anim.tick(now)
    }

    pub fn retire(&mut self) {
        self.anim.retire();
    }

    /// Height revealed so far, as a fraction of the chart height.
    pub fn animated_height(&self, index: usize) -> f64 {
        self.values[index] / 100.0 * self.anim.eased()
    }

    pub fn fill(&self, index: usize) -> Fill {
        if self.values[index] < self.threshold {
            Fill::Stripe
        } else {
            Fill::Solid
        }
    }

    /// Bar under the pointer's x position, independent of y.
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        (0..DAY_NAMES.len()).find(|&i| bar_span(i).contains(x))
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Returns true when the hover changed, forcing an immediate redraw
    /// rather than waiting on the animation frame loop.
    pub fn set_hover(&mut self, hover: Option<usize>) -> bool {
        let changed = self.hover != hover;
        self.hover = hover;
        changed
    }

    /// Callout bubble content for a hovered bar.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let day = DAY_NAMES.get(index)?;
        Some(format!("{}: {:.0}%", day, self.values[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_disjoint_and_ordered() {
        for i in 0..6 {
            let a = bar_span(i);
            let b = bar_span(i + 1);
            assert!(a.left < a.right);
            assert!(a.right < b.left);
        }
        assert!(bar_span(0).left > 0.0);
        assert!(bar_span(6).right < 1.0);
    }

    #[test]
    fn hit_test_uses_horizontal_span_only() {
        let chart = BarChart::with_defaults(Instant::now());
        for i in 0..7 {
            assert_eq!(chart.hit_test(bar_span(i).center()), Some(i));
        }
        // Gutter between Monday and Tuesday misses.
        let gap = (bar_span(0).right + bar_span(1).left) / 2.0;
        assert_eq!(chart.hit_test(gap), None);
        assert_eq!(chart.hit_test(-0.1), None);
        assert_eq!(chart.hit_test(1.1), None);
    }

    #[test]
    fn bars_grow_from_zero_to_final_height() {
        let start = Instant::now();
        let mut chart = BarChart::new([100.0; 7], 50.0, start);
        assert_eq!(chart.animated_height(0), 0.0);
        chart.tick(start + Duration::from_millis(550));
        let midway = chart.animated_height(0);
        assert!(midway > 0.0 && midway < 1.0);
        chart.tick(start + ANIMATION);
        assert!((chart.animated_height(0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn below_threshold_bars_use_the_stripe_pattern() {
        let chart = BarChart::new(DEFAULT_WEEK, 50.0, Instant::now());
        assert_eq!(chart.fill(0), Fill::Solid); // 72
        assert_eq!(chart.fill(1), Fill::Stripe); // 48
        assert_eq!(chart.fill(4), Fill::Stripe); // 34
        assert_eq!(chart.fill(5), Fill::Solid); // 90
    }

    #[test]
    fn tooltip_names_the_day_and_percentage() {
        let chart = BarChart::with_defaults(Instant::now());
        assert_eq!(chart.tooltip(2), Some("Wed: 85%".to_string()));
        assert_eq!(chart.tooltip(9), None);
    }

    #[test]
    fn hover_change_forces_redraw_once() {
        let mut chart = BarChart::with_defaults(Instant::now());
        assert!(chart.set_hover(Some(3)));
        assert!(!chart.set_hover(Some(3)));
        assert!(chart.set_hover(None));
    }
}

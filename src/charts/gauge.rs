use super::anim::AnimationSession;
use super::Fill;
use crate::model::ProjectCounts;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

pub const SECTION_LABELS: [&str; 3] = ["Completed", "In Progress", "Pending"];
const ANIMATION: Duration = Duration::from_millis(1400);

/// One angular slice of the half-donut. Angles are standard math radians:
/// the sweep starts at the leftmost point (π) and runs clockwise to 0, so
/// `start_angle >= end_angle` and the three spans cover exactly π when the
/// project total is non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSection {
    pub label: &'static str,
    pub percent: u32,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Fill,
}

impl GaugeSection {
    pub fn span(&self) -> f64 {
        self.start_angle - self.end_angle
    }
}

/// Integer section percentages summing to 100, with the rounding remainder
/// given to the pending section. The first two shares truncate so pending is
/// always the exact remainder. A zero total divides by one instead, so every
/// section reads 0%.
pub fn percentages(counts: ProjectCounts) -> [u32; 3] {
    if counts.total == 0 {
        return [0, 0, 0];
    }
    let total = counts.total as u32;
    let completed = counts.completed as u32 * 100 / total;
    let running = counts.running as u32 * 100 / total;
    let pending = 100 - completed - running;
    [completed, running, pending]
}

/// The three sections in fixed draw order, spans proportional to counts.
pub fn sections(counts: ProjectCounts) -> [GaugeSection; 3] {
    let denominator = counts.total.max(1) as f64;
    let percents = percentages(counts);
    let fractions = [
        counts.completed as f64 / denominator,
        counts.running as f64 / denominator,
        counts.pending as f64 / denominator,
    ];
    let fills = [Fill::Solid, Fill::Solid, Fill::Stripe];
    let mut start = PI;
    let mut out = [GaugeSection {
        label: "",
        percent: 0,
        start_angle: PI,
        end_angle: PI,
        fill: Fill::Solid,
    }; 3];
    for i in 0..3 {
        let end = start - fractions[i] * PI;
        out[i] = GaugeSection {
            label: SECTION_LABELS[i],
            percent: percents[i],
            start_angle: start,
            end_angle: end,
            fill: fills[i],
        };
        start = end;
    }
    out
}

/// Half-donut progress chart over the project counts. Geometry and timing
/// live here; painting is the caller's concern.
#[derive(Debug)]
pub struct GaugeChart {
    pub counts: ProjectCounts,
    pub inner_radius: f64,
    pub outer_radius: f64,
    anim: AnimationSession,
    hover: Option<usize>,
}

impl GaugeChart {
    pub fn new(counts: ProjectCounts, now: Instant) -> Self {
        GaugeChart {
            counts,
            inner_radius: 0.55,
            outer_radius: 1.0,
            anim: AnimationSession::start(now, ANIMATION),
            hover: None,
        }
    }

    /// Advances the entrance animation; true while more frames are wanted.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.anim.tick(now)
    }

    pub fn retire(&mut self) {
        self.anim.retire();
    }

    pub fn sections(&self) -> [GaugeSection; 3] {
        sections(self.counts)
    }

    /// Center text: completed percentage counting up along the ease-out.
    pub fn center_percent(&self) -> u32 {
        let target = percentages(self.counts)[0] as f64;
        (self.anim.eased() * target).round() as u32
    }

    /// The secondary label fades in only over the final 30% of the animation.
    pub fn label_visible(&self) -> bool {
        self.anim.progress() > 0.7
    }

    /// Fraction of each section's sweep revealed so far.
    pub fn reveal(&self) -> f64 {
        self.anim.eased()
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Updates the hover index from a hit test result; returns true when the
    /// state changed and the chart needs an immediate repaint.
    pub fn set_hover(&mut self, hover: Option<usize>) -> bool {
        let changed = self.hover != hover;
        self.hover = hover;
        changed
    }

    /// Maps a point (chart coordinates, center at the origin) to the section
    /// under it. Points outside the annulus or below the horizontal diameter
    /// miss.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let radius = (x * x + y * y).sqrt();
        if radius < self.inner_radius || radius > self.outer_radius {
            return None;
        }
        let angle = y.atan2(x); // in [0, π] for the upper half-plane
        self.sections()
            .iter()
            .position(|s| s.span() > 0.0 && angle <= s.start_angle && angle >= s.end_angle)
    }

    /// Tooltip content for a hovered section.
    pub fn tooltip(&self, section: usize) -> Option<String> {
        let sections = self.sections();
        let section = sections.get(section)?;
        Some(format!("{}: {}%", section.label, section.percent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(total: usize, completed: usize, running: usize, pending: usize) -> ProjectCounts {
        ProjectCounts {
            total,
            completed,
            running,
            pending,
        }
    }

    #[test]
    fn percentages_split_forty_thirty_thirty() {
        assert_eq!(percentages(counts(10, 4, 3, 3)), [40, 30, 30]);
    }

    #[test]
    fn rounding_remainder_goes_to_pending() {
        // 1/3 each truncates to 33/33, pending absorbs the leftover 34.
        assert_eq!(percentages(counts(3, 1, 1, 1)), [33, 33, 34]);
        let [a, b, c] = percentages(counts(7, 2, 2, 3));
        assert_eq!(a + b + c, 100);
    }

    #[test]
    fn sections_sum_to_100_when_both_shares_round_up() {
        // 5/8 and 3/8 would both round up (63 + 38 = 101); truncation keeps
        // the sum at 100 even with nothing pending.
        assert_eq!(percentages(counts(8, 5, 3, 0)), [62, 37, 1]);
        for (completed, running) in [(5, 3), (7, 1), (1, 6), (3, 3)] {
            let [a, b, c] = percentages(counts(8, completed, running, 8 - completed - running));
            assert_eq!(a + b + c, 100);
        }
    }

    #[test]
    fn zero_total_renders_all_zero_without_dividing() {
        assert_eq!(percentages(counts(0, 0, 0, 0)), [0, 0, 0]);
        let sections = sections(counts(0, 0, 0, 0));
        for section in sections {
            assert_eq!(section.percent, 0);
            assert_eq!(section.span(), 0.0);
        }
    }

    #[test]
    fn section_spans_sum_to_pi() {
        let sections = sections(counts(10, 4, 3, 3));
        let total: f64 = sections.iter().map(|s| s.span()).sum();
        assert!((total - PI).abs() < 1e-9);
        // Fixed order, contiguous, sweeping from π down to 0.
        assert_eq!(sections[0].start_angle, PI);
        assert!((sections[2].end_angle).abs() < 1e-9);
        assert!((sections[0].end_angle - sections[1].start_angle).abs() < 1e-12);
        assert!((sections[1].end_angle - sections[2].start_angle).abs() < 1e-12);
    }

    #[test]
    fn pending_section_uses_the_stripe_pattern() {
        let sections = sections(counts(10, 4, 3, 3));
        assert_eq!(sections[0].fill, Fill::Solid);
        assert_eq!(sections[1].fill, Fill::Solid);
        assert_eq!(sections[2].fill, Fill::Stripe);
    }

    #[test]
    fn hit_test_maps_angles_to_sections() {
        let chart = GaugeChart::new(counts(10, 4, 3, 3), Instant::now());
        // Leftmost edge of the sweep belongs to the first section.
        assert_eq!(chart.hit_test(-0.8, 0.01), Some(0));
        // Straight up: fraction 0.5 of the sweep, inside In Progress
        // (completed covers the first 0.4).
        assert_eq!(chart.hit_test(0.0, 0.8), Some(1));
        // Rightmost edge: pending.
        assert_eq!(chart.hit_test(0.8, 0.01), Some(2));
    }

    #[test]
    fn hit_test_misses_outside_the_annulus() {
        let chart = GaugeChart::new(counts(10, 4, 3, 3), Instant::now());
        // Below the horizontal diameter.
        assert_eq!(chart.hit_test(0.0, -0.8), None);
        // Inside the hole.
        assert_eq!(chart.hit_test(0.0, 0.2), None);
        // Beyond the rim.
        assert_eq!(chart.hit_test(0.0, 1.5), None);
    }

    #[test]
    fn empty_gauge_never_reports_a_hover() {
        let chart = GaugeChart::new(counts(0, 0, 0, 0), Instant::now());
        assert_eq!(chart.hit_test(0.0, 0.8), None);
    }

    #[test]
    fn center_percent_counts_up_with_the_animation() {
        let start = Instant::now();
        let mut chart = GaugeChart::new(counts(10, 4, 3, 3), start);
        assert_eq!(chart.center_percent(), 0);
        assert!(!chart.label_visible());
        chart.tick(start + Duration::from_millis(700));
        let midway = chart.center_percent();
        assert!(midway > 0 && midway < 40);
        chart.tick(start + ANIMATION);
        assert_eq!(chart.center_percent(), 40);
        assert!(chart.label_visible());
    }

    #[test]
    fn hover_change_is_reported_once() {
        let mut chart = GaugeChart::new(counts(10, 4, 3, 3), Instant::now());
        assert!(chart.set_hover(Some(1)));
        assert!(!chart.set_hover(Some(1)));
        assert!(chart.set_hover(None));
        assert_eq!(chart.tooltip(1), Some("In Progress: 30%".to_string()));
    }
}

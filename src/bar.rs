/*
Segbar - by David Petnick
*/
use bevy::log::debug;

use crate::events::{ChangeEvent, QuantityEvent, SetEvent};
use crate::fill::fill_fraction;
use crate::follow::{FollowAnimator, FollowLayer, FollowStep};
use crate::segments::{reconcile, segment_count, SegmentEdit, SegmentMode, SegmentShape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub shape: SegmentShape,
    pub fill: f32,
    pub follow_fill: f32,
}

/// Color Family Currently Shown on the Follow Layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowTint {
    #[default]
    Gain,
    Lose,
}

/// Plain (Engine-Free) State of One Segmented Bar
#[derive(Debug, Clone)]
pub struct SegmentBar {
    segments: Vec<Segment>,
    mode: SegmentMode,
    unit: f32,
    max_amount: f32,
    current_amount: f32,
    follow_enabled: bool,
    follow_tint: FollowTint,
    animator: FollowAnimator,
}

impl SegmentBar {
    pub fn new(mode: SegmentMode, follow_enabled: bool, follow_duration: f32) -> Self {
        Self {
            segments: Vec::new(),
            mode,
            unit: 0.0,
            max_amount: 0.0,
            current_amount: 0.0,
            follow_enabled,
            follow_tint: FollowTint::default(),
            animator: FollowAnimator::new(follow_duration),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn max_amount(&self) -> f32 {
        self.max_amount
    }

    pub fn current_amount(&self) -> f32 {
        self.current_amount
    }

    pub fn follow_tint(&self) -> FollowTint {
        self.follow_tint
    }

    pub fn animator(&self) -> &FollowAnimator {
        &self.animator
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn primary_fills(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.fill).collect()
    }

    pub fn follow_fills(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.follow_fill).collect()
    }

    /// Route Either Event Kind; Returns Structural Edits (Empty for Changes)
    pub fn handle(&mut self, event: QuantityEvent) -> Vec<SegmentEdit> {
        match event {
            QuantityEvent::Set(ev) => self.on_set(ev),
            QuantityEvent::Change(ev) => {
                self.on_change(ev);
                Vec::new()
            }
        }
    }

    /// Rebuild Structure for New Capacity; Returns Edits Applied
    pub fn on_set(&mut self, ev: SetEvent) -> Vec<SegmentEdit> {
        self.cancel_follow();

        self.unit = ev.unit;
        self.max_amount = ev.max_amount.max(0.0);
        self.current_amount = self.clamp_amount(ev.amount);

        let current = self.segments.len();
        let target = segment_count(self.max_amount, self.unit);
        let edits = reconcile(current, target, self.mode);
        if !edits.is_empty() {
            debug!(
                "segment bar: {} -> {} segments ({} edits)",
                current,
                target,
                edits.len()
            );
        }

        for edit in &edits {
            match *edit {
                SegmentEdit::PopTail => {
                    self.segments.pop();
                }
                SegmentEdit::Push(shape) => {
                    let index = self.segments.len();
                    self.segments.push(Segment {
                        index,
                        shape,
                        fill: 0.0,
                        follow_fill: 0.0,
                    });
                }
            }
        }

        self.write_layer(FollowLayer::Primary, self.current_amount);
        self.write_layer(FollowLayer::Follow, 0.0);
        edits
    }

    pub fn on_change(&mut self, ev: ChangeEvent) {
        self.cancel_follow();

        let new_amount = self.clamp_amount(ev.new_amount);
        let old_amount = self.clamp_amount(ev.old_amount);
        self.current_amount = new_amount;

        if !self.follow_enabled {
            self.write_layer(FollowLayer::Primary, new_amount);
            return;
        }

        let step = if ev.gained {
            self.follow_tint = FollowTint::Gain;
            self.write_layer(FollowLayer::Follow, new_amount);
            self.animator.start(old_amount, new_amount, FollowLayer::Primary)
        } else {
            self.follow_tint = FollowTint::Lose;
            self.write_layer(FollowLayer::Primary, new_amount);
            self.animator.start(old_amount, new_amount, FollowLayer::Follow)
        };
        self.apply_step(step);
    }

    /// One Frame of Follow Animation; `dt` in Seconds
    pub fn tick(&mut self, dt: f32) -> Option<FollowStep> {
        let step = self.animator.tick(dt)?;
        self.apply_step(step);
        Some(step)
    }

    fn cancel_follow(&mut self) {
        if let Some(anim) = self.animator.cancel() {
            debug!(
                "segment bar: follow {:?} {} -> {} cancelled at {:.3}s",
                anim.layer, anim.from, anim.to, anim.elapsed
            );
        }
    }

    fn apply_step(&mut self, step: FollowStep) {
        self.write_layer(step.layer, step.value);
    }

    fn write_layer(&mut self, layer: FollowLayer, amount: f32) {
        let unit = self.unit;
        for seg in &mut self.segments {
            let f = fill_fraction(amount, seg.index, unit);
            match layer {
                FollowLayer::Primary => seg.fill = f,
                FollowLayer::Follow => seg.follow_fill = f,
            }
        }
    }

    fn clamp_amount(&self, amount: f32) -> f32 {
        amount.clamp(0.0, self.max_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::EdgeType;

    fn set(amount: f32, max_amount: f32, unit: f32) -> SetEvent {
        SetEvent { amount, max_amount, unit }
    }

    fn change(new_amount: f32, old_amount: f32, gained: bool) -> ChangeEvent {
        ChangeEvent { new_amount, old_amount, gained }
    }

    fn assert_fills(got: &[f32], want: &[f32]) {
        assert_eq!(got.len(), want.len(), "{got:?} vs {want:?}");
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-5, "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn test_initial_set_builds_four_segments() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 0.5);
        bar.on_set(set(60.0, 100.0, 25.0));

        let shapes: Vec<_> = bar.segments().iter().map(|s| s.shape).collect();
        assert_eq!(
            shapes,
            vec![
                SegmentShape::Edged(EdgeType::First),
                SegmentShape::Edged(EdgeType::Middle),
                SegmentShape::Edged(EdgeType::Middle),
                SegmentShape::Edged(EdgeType::Last),
            ]
        );
        assert_fills(&bar.primary_fills(), &[1.0, 1.0, 0.4, 0.0]);
        assert_fills(&bar.follow_fills(), &[0.0; 4]);
    }

    #[test]
    fn test_gain_snaps_follow_and_animates_primary() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 1.0);
        bar.on_set(set(40.0, 100.0, 25.0));
        bar.on_change(change(60.0, 40.0, true));

        assert_eq!(bar.follow_tint(), FollowTint::Gain);
        assert_fills(&bar.follow_fills(), &[1.0, 1.0, 0.4, 0.0]);
        assert_fills(&bar.primary_fills(), &[1.0, 0.6, 0.0, 0.0]);

        bar.tick(0.75);
        assert_fills(&bar.primary_fills(), &[1.0, 1.0, 0.2, 0.0]);

        let step = bar.tick(0.6).unwrap();
        assert!(step.finished);
        assert_fills(&bar.primary_fills(), &[1.0, 1.0, 0.4, 0.0]);
        assert!(!bar.is_animating());
    }

    #[test]
    fn test_loss_snaps_primary_and_drains_follow() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 1.0);
        bar.on_set(set(100.0, 100.0, 25.0));
        bar.on_change(change(50.0, 100.0, false));

        assert_eq!(bar.follow_tint(), FollowTint::Lose);
        assert_fills(&bar.primary_fills(), &[1.0, 1.0, 0.0, 0.0]);
        assert_fills(&bar.follow_fills(), &[1.0, 1.0, 1.0, 1.0]);

        while bar.tick(0.1).is_some_and(|s| !s.finished) {}
        assert_fills(&bar.follow_fills(), &[1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_finished_animation_matches_target_exactly() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 0.3);
        bar.on_set(set(20.0, 90.0, 10.0));
        bar.on_change(change(73.0, 20.0, true));
        for _ in 0..10 {
            bar.tick(1.0 / 60.0);
        }
        bar.tick(1.0);

        let want: Vec<f32> = (0..9).map(|i| fill_fraction(73.0, i, 10.0)).collect();
        assert_eq!(bar.primary_fills(), want);
    }

    #[test]
    fn test_new_change_cancels_in_flight_animation() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 1.0);
        bar.on_set(set(100.0, 100.0, 25.0));
        bar.on_change(change(80.0, 100.0, false));
        bar.tick(0.5);

        bar.on_change(change(30.0, 80.0, false));
        let anim = match bar.animator().state() {
            crate::follow::FollowState::Animating(a) => a,
            other => panic!("expected animating, got {other:?}"),
        };
        assert_eq!(anim.from, 80.0);
        assert_eq!(anim.to, 30.0);
        assert_eq!(anim.elapsed, 0.0);

        // Restarted From New Old Amount, Not Old Animation's Midpoint
        assert_fills(&bar.follow_fills(), &[1.0, 1.0, 1.0, 0.2]);
    }

    #[test]
    fn test_set_cancels_animation_and_clears_follow() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 1.0);
        bar.on_set(set(100.0, 100.0, 25.0));
        bar.on_change(change(10.0, 100.0, false));
        bar.tick(0.2);

        bar.on_set(set(40.0, 50.0, 25.0));
        assert!(!bar.is_animating());
        assert_eq!(bar.segments().len(), 2);
        assert_fills(&bar.primary_fills(), &[1.0, 0.6]);
        assert_fills(&bar.follow_fills(), &[0.0, 0.0]);
        assert_eq!(bar.tick(0.1), None);
    }

    #[test]
    fn test_follow_disabled_writes_primary_directly() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, false, 1.0);
        bar.on_set(set(100.0, 100.0, 25.0));
        bar.on_change(change(35.0, 100.0, false));

        assert!(!bar.is_animating());
        assert_fills(&bar.primary_fills(), &[1.0, 0.4, 0.0, 0.0]);
        assert_fills(&bar.follow_fills(), &[0.0; 4]);
    }

    #[test]
    fn test_amounts_clamped_to_capacity() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, false, 1.0);
        bar.on_set(set(250.0, 100.0, 25.0));
        assert_eq!(bar.current_amount(), 100.0);

        bar.on_change(change(-40.0, 100.0, false));
        assert_eq!(bar.current_amount(), 0.0);
        assert_fills(&bar.primary_fills(), &[0.0; 4]);
    }

    #[test]
    fn test_shrink_reports_edits_and_reindexes() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 1.0);
        bar.on_set(set(100.0, 100.0, 25.0));
        let edits = bar.on_set(set(50.0, 50.0, 25.0));

        assert_eq!(edits.len(), 4);
        let idx: Vec<usize> = bar.segments().iter().map(|s| s.index).collect();
        assert_eq!(idx, vec![0, 1]);
        assert_eq!(bar.segments()[1].shape, SegmentShape::Edged(EdgeType::Last));
    }

    #[test]
    fn test_zero_capacity_bar_is_empty() {
        let mut bar = SegmentBar::new(SegmentMode::Edged, true, 1.0);
        bar.on_set(set(30.0, 75.0, 25.0));
        bar.on_set(set(0.0, 0.0, 25.0));
        assert!(bar.segments().is_empty());

        bar.on_change(change(0.0, 0.0, false));
        assert_eq!(bar.tick(2.0).map(|s| s.finished), Some(true));

        bar.on_set(set(25.0, 25.0, 25.0));
        assert_eq!(bar.segments()[0].shape, SegmentShape::Edged(EdgeType::Single));
        assert_fills(&bar.primary_fills(), &[1.0]);
    }

    #[test]
    fn test_handle_routes_both_kinds() {
        let mut bar = SegmentBar::new(SegmentMode::Uniform, true, 1.0);
        let edits = bar.handle(set(10.0, 30.0, 10.0).into());
        assert_eq!(edits.len(), 3);
        assert!(bar.handle(change(20.0, 10.0, true).into()).is_empty());
        assert!(bar.is_animating());
    }
}

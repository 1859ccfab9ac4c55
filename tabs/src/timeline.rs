use std::time::Duration;

use tracing::debug;

use crate::layout::Span;
use crate::view::ViewId;

/// Duration of every tab transition unless configured otherwise.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(250);

/// Handle for a scheduled transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

/// One view's width moving from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidthChange {
    pub view: ViewId,
    pub from: u16,
    pub to: u16,
}

/// Visual change handed to the timeline.
///
/// The model is already in its final state when a transition is scheduled;
/// the timeline only describes where the picture starts from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A batch of tab resizes, optionally moving the selection indicator
    /// away from `indicator_from`.
    Strip {
        widths: Vec<WidthChange>,
        indicator_from: Option<Span>,
    },
    /// The content viewport sliding between two horizontal offsets.
    Viewport { from: u32, to: u32 },
}

#[derive(Debug)]
struct Running {
    id: TransitionId,
    transition: Transition,
    duration: Duration,
    elapsed: Duration,
}

impl Running {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        ease_in_out(t)
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Smoothstep easing, `3t² - 2t³`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Timed transitions, advanced explicitly by the host's frame clock.
///
/// There is no cancellation: a newer transition touching the same target
/// simply wins when the picture is interpolated.
#[derive(Debug)]
pub struct Timeline {
    duration: Duration,
    next_id: u64,
    running: Vec<Running>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::with_duration(DEFAULT_TRANSITION)
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self { duration, next_id: 0, running: Vec::new() }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Change the duration used for transitions scheduled from now on.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Schedule `transition`; its id is reported by [`Timeline::tick`] once
    /// the duration has elapsed.
    pub fn animate(&mut self, transition: Transition) -> TransitionId {
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        debug!(?id, duration_ms = self.duration.as_millis() as u64, "transition scheduled");
        self.running.push(Running { id, transition, duration: self.duration, elapsed: Duration::ZERO });
        id
    }

    /// Advance every running transition by `dt` and return the ids that
    /// finished, in the order they were scheduled.
    pub fn tick(&mut self, dt: Duration) -> Vec<TransitionId> {
        for running in &mut self.running {
            running.elapsed = running.elapsed.saturating_add(dt);
        }
        let (done, still_running): (Vec<_>, Vec<_>) =
            self.running.drain(..).partition(Running::is_done);
        self.running = still_running;
        done.into_iter().map(|r| r.id).collect()
    }

    /// Jump every running transition to its end.
    pub fn finish_all(&mut self) -> Vec<TransitionId> {
        self.running.drain(..).map(|r| r.id).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    #[cfg(test)]
    fn is_running(&self, id: TransitionId) -> bool {
        self.running.iter().any(|r| r.id == id)
    }

    /// Width to draw for `view` whose settled width is `target`.
    pub fn width_of(&self, view: ViewId, target: u16) -> u16 {
        let newest = self.running.iter().rev().find_map(|r| match &r.transition {
            Transition::Strip { widths, .. } => widths
                .iter()
                .rev()
                .find(|change| change.view == view)
                .map(|change| (change.from, r.progress())),
            Transition::Viewport { .. } => None,
        });
        match newest {
            Some((from, t)) => lerp(from as f32, target as f32, t).round() as u16,
            None => target,
        }
    }

    /// Where the selection indicator is drawn while it travels towards
    /// `target`.
    pub fn indicator_span(&self, target: Span) -> Span {
        let newest = self.running.iter().rev().find_map(|r| match &r.transition {
            Transition::Strip { indicator_from: Some(from), .. } => Some((*from, r.progress())),
            _ => None,
        });
        match newest {
            Some((from, t)) => Span {
                x: lerp(from.x as f32, target.x as f32, t).round() as u16,
                width: lerp(from.width as f32, target.width as f32, t).round() as u16,
            },
            None => target,
        }
    }

    /// Horizontal offset of the content viewport heading for `target`.
    pub fn viewport_offset(&self, target: u32) -> u32 {
        let newest = self.running.iter().rev().find_map(|r| match &r.transition {
            Transition::Viewport { from, .. } => Some((*from, r.progress())),
            Transition::Strip { .. } => None,
        });
        match newest {
            Some((from, t)) => lerp(from as f32, target as f32, t).round() as u32,
            None => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resize(view: u64, from: u16, to: u16) -> Transition {
        Transition::Strip {
            widths: vec![WidthChange { view: ViewId(view), from, to }],
            indicator_from: None,
        }
    }

    #[test]
    fn completions_are_reported_in_schedule_order() {
        let mut timeline = Timeline::with_duration(Duration::from_millis(100));
        let first = timeline.animate(resize(1, 4, 8));
        let second = timeline.animate(Transition::Viewport { from: 0, to: 40 });

        assert!(timeline.tick(Duration::from_millis(60)).is_empty());
        assert_eq!(timeline.tick(Duration::from_millis(40)), vec![first, second]);
        assert!(timeline.is_idle());
    }

    #[test]
    fn later_transitions_keep_their_own_clock() {
        let mut timeline = Timeline::with_duration(Duration::from_millis(100));
        let first = timeline.animate(resize(1, 4, 8));
        timeline.tick(Duration::from_millis(50));
        let second = timeline.animate(resize(2, 4, 8));

        assert_eq!(timeline.tick(Duration::from_millis(50)), vec![first]);
        assert!(timeline.is_running(second));
        assert_eq!(timeline.tick(Duration::from_millis(50)), vec![second]);
    }

    #[test]
    fn width_interpolates_towards_target() {
        let mut timeline = Timeline::with_duration(Duration::from_millis(100));
        timeline.animate(resize(1, 0, 10));

        assert_eq!(timeline.width_of(ViewId(1), 10), 0);
        timeline.tick(Duration::from_millis(50));
        assert_eq!(timeline.width_of(ViewId(1), 10), 5);
        assert_eq!(timeline.width_of(ViewId(2), 7), 7);
        timeline.tick(Duration::from_millis(50));
        assert_eq!(timeline.width_of(ViewId(1), 10), 10);
    }

    #[test]
    fn zero_duration_finishes_on_next_tick() {
        let mut timeline = Timeline::with_duration(Duration::ZERO);
        let id = timeline.animate(Transition::Viewport { from: 0, to: 80 });
        assert_eq!(timeline.viewport_offset(80), 80);
        assert_eq!(timeline.tick(Duration::ZERO), vec![id]);
    }

    #[test]
    fn newest_viewport_slide_wins() {
        let mut timeline = Timeline::with_duration(Duration::from_millis(100));
        timeline.animate(Transition::Viewport { from: 0, to: 100 });
        timeline.tick(Duration::from_millis(50));
        timeline.animate(Transition::Viewport { from: 50, to: 0 });
        assert_eq!(timeline.viewport_offset(0), 50);
    }

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.25) + ease_in_out(0.75) - 1.0).abs() < 1e-6);
    }
}

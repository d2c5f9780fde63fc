//! Checked/unchecked state machine driving the ripple.
//!
//! [`RippleController`] owns the selection state and the in-flight
//! [`AnimationRun`]. Toggles replace the run synchronously; the host's frame
//! clock calls [`RippleController::tick`] until it reports
//! [`FrameAction::Finished`], then paints with [`RippleController::visuals`].

use crate::animation::{AnimationRun, Easing};
use crate::geometry::{Point, Size, longest_radius};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionState {
    #[default]
    Unchecked,
    Checked,
}

impl SelectionState {
    pub fn is_checked(self) -> bool {
        self == SelectionState::Checked
    }
}

/// Tunable animation constants.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RippleTiming {
    #[serde(rename = "expand_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub expand: Duration,
    #[serde(rename = "shrink_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub shrink: Duration,
    pub decelerate_factor: f64,
    /// Subtracted from the ripple alpha while unchecked so the fade-out
    /// completes before the radius reaches zero.
    pub hide_bias: u8,
}

impl Default for RippleTiming {
    fn default() -> Self {
        Self {
            expand: Duration::from_millis(1200),
            shrink: Duration::from_millis(800),
            decelerate_factor: Easing::DEFAULT_FACTOR,
            hide_bias: 60,
        }
    }
}

impl RippleTiming {
    pub fn easing(&self) -> Easing {
        Easing::Decelerate(self.decelerate_factor)
    }
}

type SelectionCallback = Box<dyn FnMut(bool)>;
type ProgressCallback = Box<dyn FnMut(bool, f64)>;

/// Optional callbacks fired synchronously by the controller.
///
/// - `on_start(selected)` once per toggle
/// - `on_progress(selected, percent)` on every tick of an active run
/// - `on_complete(selected)` once when a run finishes
#[derive(Default)]
pub struct RippleListener {
    on_start: Option<SelectionCallback>,
    on_progress: Option<ProgressCallback>,
    on_complete: Option<SelectionCallback>,
}

impl RippleListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_progress(mut self, f: impl FnMut(bool, f64) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    fn started(&mut self, selected: bool) {
        if let Some(f) = &mut self.on_start {
            f(selected);
        }
    }

    fn progressed(&mut self, selected: bool, percent: f64) {
        if let Some(f) = &mut self.on_progress {
            f(selected, percent);
        }
    }

    fn completed(&mut self, selected: bool) {
        if let Some(f) = &mut self.on_complete {
            f(selected);
        }
    }
}

impl fmt::Debug for RippleListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RippleListener")
            .field("on_start", &self.on_start.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Per-frame paint inputs. Recomputed every tick, never stored by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisualParams {
    pub center: Point,
    pub radius: f64,
    pub alpha: u8,
}

impl VisualParams {
    pub fn opacity(&self) -> f64 {
        f64::from(self.alpha) / 255.0
    }
}

/// What the host should do with its frame clock after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// No run in flight; stop requesting frames.
    Idle,
    /// Repaint and request another frame.
    Continue,
    /// The run completed on this tick; repaint once more and stop.
    Finished,
}

impl FrameAction {
    pub fn wants_more_frames(self) -> bool {
        self == FrameAction::Continue
    }
}

#[derive(Debug)]
pub struct RippleController {
    state: SelectionState,
    size: Size,
    center: Point,
    longest_radius: f64,
    radius: f64,
    alpha: u8,
    run: Option<AnimationRun>,
    timing: RippleTiming,
    listener: RippleListener,
}

impl RippleController {
    pub fn new(size: Size, timing: RippleTiming) -> Self {
        Self {
            state: SelectionState::Unchecked,
            size,
            center: size.center(),
            longest_radius: 0.0,
            radius: 0.0,
            alpha: 0,
            run: None,
            timing,
            listener: RippleListener::default(),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn longest_radius(&self) -> f64 {
        self.longest_radius
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn timing(&self) -> &RippleTiming {
        &self.timing
    }

    /// The run currently in flight, if any.
    pub fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.run.as_ref().is_some_and(AnimationRun::is_active)
    }

    /// Fraction of the reference radius currently covered, in `[0, 1]`.
    pub fn percent(&self) -> f64 {
        if self.longest_radius > 0.0 {
            (self.radius / self.longest_radius).abs().min(1.0)
        } else {
            0.0
        }
    }

    pub fn visuals(&self) -> VisualParams {
        VisualParams {
            center: self.center,
            radius: self.radius,
            alpha: self.alpha,
        }
    }

    pub fn set_listener(&mut self, listener: RippleListener) {
        self.listener = listener;
    }

    /// Applies to runs started after this call.
    pub fn set_timing(&mut self, timing: RippleTiming) {
        self.timing = timing;
        self.update_alpha();
    }

    /// An expand in flight is retargeted to cover the new bounds. A shrink in
    /// flight is left alone; it ends at zero whatever the size.
    pub fn resize(&mut self, size: Size) {
        let previous = self.size;
        self.size = size;
        match self.run.as_mut() {
            Some(run) if self.state.is_checked() => {
                // an expand started before layout has no meaningful center yet
                if previous.width <= 0.0 || previous.height <= 0.0 {
                    self.center = size.center();
                }
                self.longest_radius = longest_radius(self.center, size);
                run.retarget(self.longest_radius);
                self.update_alpha();
            }
            Some(_) => {}
            None => {
                self.center = size.center();
                if self.state.is_checked() {
                    self.cover_bounds();
                }
            }
        }
    }

    /// Pointer-down: always flips the state. The point only matters for an
    /// expand; a shrink keeps the last center.
    pub fn press(&mut self, point: Point) {
        match self.state {
            SelectionState::Unchecked => self.expand(point),
            SelectionState::Checked => self.shrink(),
        }
    }

    /// Returns `false` without side effects when already checked.
    pub fn check(&mut self) -> bool {
        if self.state.is_checked() {
            return false;
        }
        self.expand(self.size.center());
        true
    }

    /// Returns `false` without side effects when already unchecked.
    pub fn uncheck(&mut self) -> bool {
        if !self.state.is_checked() {
            return false;
        }
        self.shrink();
        true
    }

    pub fn change_state(&mut self) -> bool {
        match self.state {
            SelectionState::Unchecked => self.check(),
            SelectionState::Checked => self.uncheck(),
        }
    }

    fn expand(&mut self, center: Point) {
        self.center = center;
        self.longest_radius = longest_radius(center, self.size);
        self.run = Some(AnimationRun::new(
            0.0,
            self.longest_radius,
            self.timing.expand,
            self.timing.easing(),
        ));
        self.radius = 0.0;
        self.state = SelectionState::Checked;
        self.update_alpha();
        log::debug!(
            "ripple expand from ({:.1}, {:.1}) to radius {:.1}",
            center.x,
            center.y,
            self.longest_radius
        );
        self.listener.started(true);
    }

    fn shrink(&mut self) {
        let from = self
            .run
            .as_mut()
            .map_or(self.radius, |run| run.cancel());
        // percent and alpha are measured against where the shrink began
        self.longest_radius = from;
        self.radius = from;
        self.run = Some(AnimationRun::new(
            from,
            0.0,
            self.timing.shrink,
            self.timing.easing(),
        ));
        self.state = SelectionState::Unchecked;
        self.update_alpha();
        log::debug!("ripple shrink from radius {from:.1}");
        self.listener.started(false);
    }

    /// Advances the active run to the frame timestamp `now`.
    pub fn tick(&mut self, now: Duration) -> FrameAction {
        let Some(run) = self.run.as_mut() else {
            return FrameAction::Idle;
        };
        let tick = run.tick(now);

        self.radius = tick.value;
        self.update_alpha();

        let selected = self.state.is_checked();
        let percent = self.percent();
        self.listener.progressed(selected, percent);

        if !tick.finished {
            return FrameAction::Continue;
        }

        self.run = None;
        self.center = self.size.center();
        if selected {
            // the touch-point radius already covers the bounds from the center
            let needed = longest_radius(self.center, self.size);
            self.longest_radius = needed;
            self.radius = self.radius.max(needed);
            self.update_alpha();
        }
        log::trace!("ripple run finished, selected={selected}");
        self.listener.completed(selected);
        FrameAction::Finished
    }

    fn cover_bounds(&mut self) {
        self.longest_radius = longest_radius(self.center, self.size);
        self.radius = self.longest_radius;
        self.update_alpha();
    }

    fn update_alpha(&mut self) {
        let scaled = (self.percent() * 255.0) as i32;
        let biased = match self.state {
            SelectionState::Unchecked => scaled - i32::from(self.timing.hide_bias),
            SelectionState::Checked => scaled,
        };
        self.alpha = biased.clamp(0, 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Start(bool),
        Progress(bool, f64),
        Complete(bool),
    }

    type Events = Rc<RefCell<Vec<Event>>>;

    fn controller_with_events(size: Size, timing: RippleTiming) -> (RippleController, Events) {
        let events: Events = Rc::default();
        let mut controller = RippleController::new(size, timing);
        let (start, progress, complete) = (events.clone(), events.clone(), events.clone());
        controller.set_listener(
            RippleListener::new()
                .on_start(move |s| start.borrow_mut().push(Event::Start(s)))
                .on_progress(move |s, p| progress.borrow_mut().push(Event::Progress(s, p)))
                .on_complete(move |s| complete.borrow_mut().push(Event::Complete(s))),
        );
        (controller, events)
    }

    fn square() -> (RippleController, Events) {
        controller_with_events(Size::new(300.0, 300.0), RippleTiming::default())
    }

    /// Ticks every frame starting at `start` until the run finishes.
    /// Returns the radius after each tick and the timestamp of the last tick.
    fn drive(controller: &mut RippleController, start: Duration) -> (Vec<f64>, Duration) {
        let mut radii = Vec::new();
        let mut now = start;
        loop {
            let action = controller.tick(now);
            radii.push(controller.radius());
            if action != FrameAction::Continue {
                return (radii, now);
            }
            now += FRAME;
        }
    }

    fn count(events: &Events, wanted: fn(&Event) -> bool) -> usize {
        events.borrow().iter().filter(|e| wanted(e)).count()
    }

    #[test]
    fn test_check_is_synchronous_and_completes_once() {
        let (mut controller, events) = square();

        assert!(controller.check());
        assert_eq!(controller.state(), SelectionState::Checked);
        assert_eq!(*events.borrow(), vec![Event::Start(true)]);

        let (_, finished_at) = drive(&mut controller, Duration::ZERO);
        assert_eq!(finished_at, Duration::from_millis(1200));
        assert_eq!(count(&events, |e| *e == Event::Complete(true)), 1);
        assert!((controller.radius() - 150.0 * 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(controller.visuals().alpha, 255);

        assert_eq!(controller.tick(Duration::from_secs(10)), FrameAction::Idle);
        assert_eq!(count(&events, |e| matches!(e, Event::Complete(_))), 1);
    }

    #[test]
    fn test_check_twice_emits_one_pair() {
        let (mut controller, events) = square();
        assert!(controller.check());
        assert!(!controller.check());
        drive(&mut controller, Duration::ZERO);
        assert!(!controller.check());

        assert_eq!(count(&events, |e| matches!(e, Event::Start(_))), 1);
        assert_eq!(count(&events, |e| matches!(e, Event::Complete(_))), 1);
    }

    #[test]
    fn test_uncheck_when_unchecked_is_noop() {
        let (mut controller, events) = square();
        assert!(!controller.uncheck());
        assert_eq!(controller.tick(Duration::ZERO), FrameAction::Idle);
        assert!(events.borrow().is_empty());
        assert!(controller.run().is_none());
    }

    #[test]
    fn test_change_state_toggles() {
        let (mut controller, events) = square();
        assert!(controller.change_state());
        assert_eq!(controller.state(), SelectionState::Checked);
        assert!(controller.change_state());
        assert_eq!(controller.state(), SelectionState::Unchecked);
        assert_eq!(
            *events.borrow(),
            vec![Event::Start(true), Event::Start(false)]
        );
    }

    #[test]
    fn test_press_expands_from_touch_point() {
        let (mut controller, _) = square();
        controller.press(Point::new(280.0, 280.0));
        assert_eq!(controller.center(), Point::new(280.0, 280.0));
        assert!((controller.longest_radius() - 395.979_797).abs() < 1e-3);
        let run = controller.run().unwrap();
        assert_eq!(run.from(), 0.0);
        assert_eq!(run.to(), controller.longest_radius());
    }

    #[test]
    fn test_press_while_checked_shrinks_around_last_center() {
        let (mut controller, _) = square();
        controller.press(Point::new(280.0, 280.0));
        controller.tick(Duration::ZERO);
        controller.tick(Duration::from_millis(100));

        controller.press(Point::new(10.0, 10.0));
        assert_eq!(controller.state(), SelectionState::Unchecked);
        assert_eq!(controller.center(), Point::new(280.0, 280.0));
    }

    #[test]
    fn test_shrink_preempts_expand_from_current_radius() {
        let (mut controller, _) = square();
        controller.check();
        controller.tick(Duration::ZERO);
        controller.tick(Duration::from_millis(160));
        let reached = controller.radius();
        assert!(reached > 0.0 && reached < controller.longest_radius());

        controller.uncheck();
        let run = controller.run().unwrap();
        assert_eq!(run.from(), reached);
        assert_eq!(run.to(), 0.0);
        assert_eq!(run.duration(), Duration::from_millis(800));
    }

    #[test]
    fn test_uncheck_from_full_radius_finishes_at_zero() {
        let (mut controller, events) = square();
        controller.check();
        drive(&mut controller, Duration::ZERO);
        let full = controller.radius();
        events.borrow_mut().clear();

        controller.uncheck();
        assert_eq!(controller.run().unwrap().from(), full);

        let start = Duration::from_secs(3);
        let (radii, finished_at) = drive(&mut controller, start);
        assert_eq!(finished_at - start, Duration::from_millis(800));
        assert_eq!(radii.last().copied(), Some(0.0));
        assert_eq!(count(&events, |e| *e == Event::Complete(false)), 1);
        assert_eq!(controller.visuals().alpha, 0);
    }

    #[test]
    fn test_radius_is_monotonic_per_run() {
        let (mut controller, _) = square();
        controller.press(Point::new(40.0, 250.0));
        let (expand, _) = drive(&mut controller, Duration::ZERO);
        assert!(expand.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(expand.last().copied(), Some(controller.longest_radius()));

        controller.uncheck();
        let (shrink, _) = drive(&mut controller, Duration::from_secs(2));
        assert!(shrink.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(shrink.last().copied(), Some(0.0));
    }

    #[test]
    fn test_recenters_after_completion() {
        let (mut controller, _) = square();
        controller.press(Point::new(280.0, 280.0));
        drive(&mut controller, Duration::ZERO);
        assert_eq!(controller.center(), Point::new(150.0, 150.0));
        // the touch-point radius still covers the bounds from the center
        assert!(controller.radius() >= longest_radius(controller.center(), controller.size()));
    }

    #[test]
    fn test_progress_reports_selection_and_percent() {
        let (mut controller, events) = square();
        controller.check();
        drive(&mut controller, Duration::ZERO);
        let progress: Vec<_> = events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Progress(selected, percent) => Some((*selected, *percent)),
                _ => None,
            })
            .collect();
        assert!(progress.iter().all(|(selected, _)| *selected));
        assert_eq!(progress.first().map(|p| p.1), Some(0.0));
        assert_eq!(progress.last().map(|p| p.1), Some(1.0));
    }

    #[test]
    fn test_hide_bias_applies_only_when_unchecked() {
        let (mut controller, _) = square();
        controller.check();
        drive(&mut controller, Duration::ZERO);
        assert_eq!(controller.visuals().alpha, 255);

        controller.uncheck();
        controller.tick(Duration::from_secs(5));
        assert_eq!(controller.visuals().alpha, 255 - 60);
    }

    #[test]
    fn test_zero_size_never_divides_by_zero() {
        let (mut controller, events) =
            controller_with_events(Size::new(0.0, 0.0), RippleTiming::default());
        controller.check();
        drive(&mut controller, Duration::ZERO);
        assert_eq!(controller.longest_radius(), 0.0);
        assert!(
            events
                .borrow()
                .iter()
                .all(|e| !matches!(e, Event::Progress(_, p) if *p != 0.0))
        );
        assert_eq!(controller.visuals().alpha, 0);
    }

    #[test]
    fn test_uncheck_before_first_tick_shrinks_from_zero() {
        let (mut controller, events) = square();
        controller.check();
        controller.uncheck();
        assert_eq!(controller.run().unwrap().from(), 0.0);
        drive(&mut controller, Duration::ZERO);
        assert_eq!(count(&events, |e| *e == Event::Complete(false)), 1);
        assert_eq!(count(&events, |e| matches!(e, Event::Complete(true))), 0);
    }

    #[test]
    fn test_resize_while_checked_keeps_full_cover() {
        let (mut controller, _) = square();
        controller.check();
        drive(&mut controller, Duration::ZERO);

        controller.resize(Size::new(600.0, 800.0));
        assert_eq!(controller.center(), Point::new(300.0, 400.0));
        assert!((controller.radius() - 500.0).abs() < 1e-9);
        assert_eq!(controller.visuals().alpha, 255);
    }

    #[test]
    fn test_resize_during_run_keeps_center() {
        let (mut controller, _) = square();
        controller.press(Point::new(20.0, 20.0));
        controller.tick(Duration::ZERO);
        controller.resize(Size::new(100.0, 100.0));
        assert_eq!(controller.center(), Point::new(20.0, 20.0));
        assert!(controller.is_animating());

        drive(&mut controller, Duration::from_millis(16));
        let needed = longest_radius(controller.center(), controller.size());
        assert!(controller.radius() >= needed - 1e-9);
        assert_eq!(controller.visuals().alpha, 255);
    }

    #[test]
    fn test_check_before_layout_covers_after_first_resize() {
        let (mut controller, events) =
            controller_with_events(Size::default(), RippleTiming::default());
        controller.check();
        controller.tick(Duration::ZERO);
        controller.resize(Size::new(300.0, 300.0));
        assert_eq!(controller.center(), Point::new(150.0, 150.0));

        let (radii, _) = drive(&mut controller, Duration::from_millis(16));
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
        let needed = longest_radius(Point::new(150.0, 150.0), Size::new(300.0, 300.0));
        assert!((controller.radius() - needed).abs() < 1e-9);
        assert_eq!(controller.state(), SelectionState::Checked);
        assert_eq!(controller.visuals().alpha, 255);
        assert_eq!(count(&events, |e| *e == Event::Complete(true)), 1);
    }

    #[test]
    fn test_grow_during_expand_retargets_run() {
        let (mut controller, _) =
            controller_with_events(Size::new(100.0, 100.0), RippleTiming::default());
        controller.check();
        controller.tick(Duration::ZERO);
        controller.tick(Duration::from_millis(300));
        controller.resize(Size::new(600.0, 600.0));
        assert_eq!(controller.center(), Point::new(50.0, 50.0));

        drive(&mut controller, Duration::from_millis(316));
        assert_eq!(controller.center(), Point::new(300.0, 300.0));
        let needed = longest_radius(controller.center(), controller.size());
        assert!(controller.radius() >= needed - 1e-9, "radius {}", controller.radius());
        assert_eq!(controller.visuals().alpha, 255);
    }

    #[test]
    fn test_resize_during_shrink_still_ends_at_zero() {
        let (mut controller, _) = square();
        controller.check();
        drive(&mut controller, Duration::ZERO);
        controller.uncheck();
        controller.tick(Duration::from_secs(2));
        controller.resize(Size::new(600.0, 600.0));
        drive(&mut controller, Duration::from_secs(2) + FRAME);
        assert_eq!(controller.radius(), 0.0);
        assert_eq!(controller.visuals().alpha, 0);
    }

    #[test]
    fn test_durations_follow_timing() {
        for (expand_ms, shrink_ms) in [(1200, 800), (300, 150), (2000, 2000)] {
            let timing = RippleTiming {
                expand: Duration::from_millis(expand_ms),
                shrink: Duration::from_millis(shrink_ms),
                ..RippleTiming::default()
            };
            let (mut controller, _) = controller_with_events(Size::new(100.0, 50.0), timing);
            controller.check();
            let (_, expanded_at) = drive(&mut controller, Duration::ZERO);
            assert!(expanded_at >= Duration::from_millis(expand_ms));
            assert!(expanded_at < Duration::from_millis(expand_ms) + FRAME);

            controller.uncheck();
            let start = Duration::from_secs(10);
            let (_, shrunk_at) = drive(&mut controller, start);
            assert!(shrunk_at - start >= Duration::from_millis(shrink_ms));
            assert!(shrunk_at - start < Duration::from_millis(shrink_ms) + FRAME);
        }
    }

    #[test]
    fn test_timing_deserializes_milliseconds() {
        let timing: RippleTiming =
            serde_json::from_str(r#"{"expand_ms": 500, "hide_bias": 0}"#).unwrap();
        assert_eq!(timing.expand, Duration::from_millis(500));
        assert_eq!(timing.shrink, Duration::from_millis(800));
        assert_eq!(timing.hide_bias, 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Press(f64, f64),
        Check,
        Uncheck,
        Toggle,
        Tick(u64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(x, y)| Op::Press(x, y)),
            Just(Op::Check),
            Just(Op::Uncheck),
            Just(Op::Toggle),
            (0u64..400).prop_map(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_percent_and_radius_stay_bounded(
            w in 0.0f64..800.0,
            h in 0.0f64..800.0,
            expand_ms in 0u64..3000,
            shrink_ms in 0u64..3000,
            factor in 0.5f64..6.0,
            hide_bias in any::<u8>(),
            ops in prop::collection::vec(op(), 1..80),
        ) {
            let timing = RippleTiming {
                expand: Duration::from_millis(expand_ms),
                shrink: Duration::from_millis(shrink_ms),
                decelerate_factor: factor,
                hide_bias,
            };
            let size = Size::new(w, h);
            let (mut controller, events) = controller_with_events(size, timing);
            let max_radius = size.width.hypot(size.height);
            let mut now = Duration::ZERO;

            for op in ops {
                match op {
                    Op::Press(fx, fy) => { controller.press(Point::new(w * fx, h * fy)); }
                    Op::Check => { controller.check(); }
                    Op::Uncheck => { controller.uncheck(); }
                    Op::Toggle => { controller.change_state(); }
                    Op::Tick(ms) => {
                        now += Duration::from_millis(ms);
                        controller.tick(now);
                    }
                }
                let visuals = controller.visuals();
                prop_assert!(visuals.radius.is_finite());
                prop_assert!(visuals.radius >= 0.0 && visuals.radius <= max_radius + 1e-9);
                let percent = controller.percent();
                prop_assert!((0.0..=1.0).contains(&percent));
                if controller.state() == SelectionState::Unchecked {
                    prop_assert!(u16::from(visuals.alpha) + u16::from(hide_bias) <= 255
                        || visuals.alpha == 0);
                }
            }

            for event in events.borrow().iter() {
                if let Event::Progress(_, p) = event {
                    prop_assert!((0.0..=1.0).contains(p));
                }
            }
        }
    }
}

//! Stroke state machine turning pointer events into composited segments.

use super::drawing::DrawingConfig;
use super::events::{PointerEvent, PointerId, PointerPhase};
use crate::draw::{Compositor, Point, SurfaceError};

/// Offset used to turn a tap into a segment that still rasterizes.
///
/// A true zero-length line produces nothing under round caps in some
/// rasterizers, so taps are drawn as a near-zero diagonal instead.
pub const TAP_NUDGE: f64 = 0.01;

/// Current stroke, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    /// No pointer owns the surface
    #[default]
    Idle,
    /// A pointer is captured and drawing
    Drawing {
        /// The capturing pointer; events from any other pointer are ignored
        pointer: PointerId,
        /// Where the previous segment ended
        last_point: Point,
    },
}

/// What the router did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Event did not affect the stroke
    Ignored,
    /// Pointer captured and a dot composited
    StrokeStarted,
    /// A segment was composited
    StrokeExtended,
    /// Pointer released
    StrokeEnded,
}

/// Routes pointer events to a [`Compositor`].
///
/// Drawing settings are passed with every event rather than captured at
/// stroke start, so a change between two moves applies to the next segment.
#[derive(Debug, Default)]
pub struct InputRouter {
    state: StrokeState,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// The pointer currently holding capture.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        match self.state {
            StrokeState::Drawing { pointer, .. } => Some(pointer),
            StrokeState::Idle => None,
        }
    }

    /// Processes one pointer event.
    ///
    /// The state transition happens before compositing, so a segment that
    /// fails to draw is reported without wedging the stroke.
    pub fn handle<C: Compositor + ?Sized>(
        &mut self,
        event: PointerEvent,
        config: &DrawingConfig,
        target: &mut C,
    ) -> Result<RouteOutcome, SurfaceError> {
        let point = event.position;

        match self.state {
            StrokeState::Idle => {
                if event.phase != PointerPhase::Down {
                    return Ok(RouteOutcome::Ignored);
                }
                self.state = StrokeState::Drawing {
                    pointer: event.pointer,
                    last_point: point,
                };
                log::debug!(
                    "Pointer {} captured at ({:.1}, {:.1})",
                    event.pointer,
                    point.x,
                    point.y
                );
                target.composite_segment(
                    point,
                    point.offset(TAP_NUDGE, TAP_NUDGE),
                    &config.stroke_params(),
                )?;
                Ok(RouteOutcome::StrokeStarted)
            }
            StrokeState::Drawing {
                pointer,
                last_point,
            } => {
                if event.pointer != pointer {
                    log::debug!(
                        "Ignoring {:?} from pointer {} while pointer {} holds capture",
                        event.phase,
                        event.pointer,
                        pointer
                    );
                    return Ok(RouteOutcome::Ignored);
                }

                match event.phase {
                    PointerPhase::Move => {
                        self.state = StrokeState::Drawing {
                            pointer,
                            last_point: point,
                        };
                        target.composite_segment(last_point, point, &config.stroke_params())?;
                        Ok(RouteOutcome::StrokeExtended)
                    }
                    phase if phase.ends_stroke() => {
                        self.state = StrokeState::Idle;
                        log::debug!("Pointer {} released ({:?})", pointer, phase);
                        Ok(RouteOutcome::StrokeEnded)
                    }
                    _ => Ok(RouteOutcome::Ignored),
                }
            }
        }
    }

    /// Drops any active stroke without drawing. Returns whether one was active.
    pub fn interrupt(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        if was_drawing {
            log::debug!("Interrupting active stroke");
        }
        self.state = StrokeState::Idle;
        was_drawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{StrokeParams, Viewport};
    use crate::input::{PointerEvent, ToolMode};

    #[derive(Default)]
    struct RecordingCompositor {
        segments: Vec<(Point, Point, StrokeParams)>,
        fail: bool,
    }

    impl Compositor for RecordingCompositor {
        fn composite_segment(
            &mut self,
            from: Point,
            to: Point,
            stroke: &StrokeParams,
        ) -> Result<(), SurfaceError> {
            self.segments.push((from, to, *stroke));
            if self.fail {
                Err(SurfaceError::Cairo(cairo::Error::NoMemory))
            } else {
                Ok(())
            }
        }
    }

    fn widths(recorder: &RecordingCompositor) -> Vec<f64> {
        recorder
            .segments
            .iter()
            .map(|(_, _, p)| p.line_width())
            .collect()
    }

    #[test]
    fn down_captures_and_draws_a_dot() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let config = DrawingConfig::default();

        let outcome = router
            .handle(PointerEvent::down(1, 10.0, 20.0), &config, &mut recorder)
            .unwrap();

        assert_eq!(outcome, RouteOutcome::StrokeStarted);
        assert_eq!(router.captured_pointer(), Some(1));
        assert_eq!(recorder.segments.len(), 1);
        let (from, to, _) = recorder.segments[0];
        assert_eq!(from, Point::new(10.0, 20.0));
        assert_eq!(to, Point::new(10.0 + TAP_NUDGE, 20.0 + TAP_NUDGE));
        assert_ne!(from, to);
    }

    #[test]
    fn each_move_produces_a_connected_segment() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let config = DrawingConfig::default();

        router
            .handle(PointerEvent::down(1, 0.0, 0.0), &config, &mut recorder)
            .unwrap();
        for (x, y) in [(5.0, 0.0), (10.0, 5.0), (12.0, 9.0)] {
            let outcome = router
                .handle(PointerEvent::moved(1, x, y), &config, &mut recorder)
                .unwrap();
            assert_eq!(outcome, RouteOutcome::StrokeExtended);
        }

        let moves = &recorder.segments[1..];
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].0, Point::new(0.0, 0.0));
        assert_eq!(moves[1].0, moves[0].1);
        assert_eq!(moves[2].0, moves[1].1);
        assert_eq!(moves[2].1, Point::new(12.0, 9.0));
    }

    #[test]
    fn idle_events_never_draw() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let config = DrawingConfig::default();

        for event in [
            PointerEvent::moved(1, 3.0, 3.0),
            PointerEvent::up(1, 3.0, 3.0),
            PointerEvent::new(1, PointerPhase::Leave, 3.0, 3.0),
        ] {
            assert_eq!(
                router.handle(event, &config, &mut recorder).unwrap(),
                RouteOutcome::Ignored
            );
        }
        assert!(recorder.segments.is_empty());
    }

    #[test]
    fn up_cancel_and_leave_all_end_the_stroke() {
        let config = DrawingConfig::default();
        for phase in [PointerPhase::Up, PointerPhase::Cancel, PointerPhase::Leave] {
            let mut router = InputRouter::new();
            let mut recorder = RecordingCompositor::default();
            router
                .handle(PointerEvent::down(4, 1.0, 1.0), &config, &mut recorder)
                .unwrap();
            let outcome = router
                .handle(PointerEvent::new(4, phase, 1.0, 1.0), &config, &mut recorder)
                .unwrap();
            assert_eq!(outcome, RouteOutcome::StrokeEnded);
            assert_eq!(router.state(), StrokeState::Idle);

            router
                .handle(PointerEvent::moved(4, 9.0, 9.0), &config, &mut recorder)
                .unwrap();
            assert_eq!(recorder.segments.len(), 1, "no segment after {:?}", phase);
        }
    }

    #[test]
    fn other_pointers_are_ignored_while_captured() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let config = DrawingConfig::default();

        router
            .handle(PointerEvent::down(1, 0.0, 0.0), &config, &mut recorder)
            .unwrap();
        assert_eq!(
            router
                .handle(PointerEvent::down(2, 50.0, 50.0), &config, &mut recorder)
                .unwrap(),
            RouteOutcome::Ignored
        );
        assert_eq!(
            router
                .handle(PointerEvent::moved(2, 60.0, 60.0), &config, &mut recorder)
                .unwrap(),
            RouteOutcome::Ignored
        );
        assert_eq!(
            router
                .handle(PointerEvent::up(2, 60.0, 60.0), &config, &mut recorder)
                .unwrap(),
            RouteOutcome::Ignored
        );
        assert_eq!(router.captured_pointer(), Some(1));

        router
            .handle(PointerEvent::moved(1, 5.0, 5.0), &config, &mut recorder)
            .unwrap();
        assert_eq!(recorder.segments.len(), 2);
        assert_eq!(recorder.segments[1].0, Point::new(0.0, 0.0));
    }

    #[test]
    fn pen_size_change_mid_stroke_applies_to_next_segment() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let thin = DrawingConfig::default().with_pen_size(2.0);
        let thick = thin.with_pen_size(12.0);

        router
            .handle(PointerEvent::down(1, 0.0, 0.0), &thin, &mut recorder)
            .unwrap();
        router
            .handle(PointerEvent::moved(1, 10.0, 0.0), &thin, &mut recorder)
            .unwrap();
        router
            .handle(PointerEvent::moved(1, 20.0, 0.0), &thick, &mut recorder)
            .unwrap();

        assert_eq!(widths(&recorder), vec![2.0, 2.0, 12.0]);
    }

    #[test]
    fn tool_switch_mid_stroke_switches_compositing() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let pen = DrawingConfig::default();
        let eraser = pen.with_tool(ToolMode::Eraser);

        router
            .handle(PointerEvent::down(1, 0.0, 0.0), &pen, &mut recorder)
            .unwrap();
        router
            .handle(PointerEvent::moved(1, 4.0, 0.0), &eraser, &mut recorder)
            .unwrap();

        assert_eq!(recorder.segments[0].2.tool, ToolMode::Pen);
        assert_eq!(recorder.segments[1].2.tool, ToolMode::Eraser);
        assert_eq!(recorder.segments[1].2.size, pen.eraser_size);
    }

    #[test]
    fn failed_segment_still_advances_state() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor {
            fail: true,
            ..Default::default()
        };
        let config = DrawingConfig::default();

        assert!(
            router
                .handle(PointerEvent::down(1, 0.0, 0.0), &config, &mut recorder)
                .is_err()
        );
        assert!(router.is_drawing());
        assert!(
            router
                .handle(PointerEvent::moved(1, 3.0, 0.0), &config, &mut recorder)
                .is_err()
        );
        assert_eq!(
            router.state(),
            StrokeState::Drawing {
                pointer: 1,
                last_point: Point::new(3.0, 0.0)
            }
        );
    }

    #[test]
    fn interrupt_returns_to_idle() {
        let mut router = InputRouter::new();
        let mut recorder = RecordingCompositor::default();
        let config = DrawingConfig::default();
        assert!(!router.interrupt());

        router
            .handle(PointerEvent::down(1, 0.0, 0.0), &config, &mut recorder)
            .unwrap();
        assert!(router.interrupt());
        assert_eq!(router.captured_pointer(), None);
    }

    #[test]
    fn drives_a_real_surface() {
        let mut router = InputRouter::new();
        let mut surface = crate::draw::AnnotationSurface::new(Viewport::new(30.0, 30.0, 1.0)).unwrap();
        let config = DrawingConfig::default().with_pen_size(4.0);

        router
            .handle(PointerEvent::down(1, 15.0, 15.0), &config, &mut surface)
            .unwrap();
        router
            .handle(PointerEvent::up(1, 15.0, 15.0), &config, &mut surface)
            .unwrap();

        assert!(surface.opaque_pixel_count().unwrap() > 0);
    }
}

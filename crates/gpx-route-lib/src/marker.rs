//! Click marker with a linear position tween

use crate::Coordinate;
use std::time::Duration;

/// How long the marker takes to travel to a new click
pub const ANIMATION_DURATION: Duration = Duration::from_secs(1);

/// Linear move from one coordinate to another over a fixed duration
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: Coordinate,
    to: Coordinate,
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    pub fn new(from: Coordinate, to: Coordinate, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Fraction of the way travelled, in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current position. Exactly `to` once finished.
    pub fn position(&self) -> Coordinate {
        if self.is_finished() {
            self.to
        } else {
            self.from.lerp(self.to, self.progress())
        }
    }

    /// Move the clock forward and return the new position
    pub fn advance(&mut self, dt: Duration) -> Coordinate {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.position()
    }

    pub fn target(&self) -> Coordinate {
        self.to
    }
}

/// Result of feeding a click to the marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Marker hidden, nothing changed
    Ignored,
    /// First placement; the marker must be added to the scene
    Placed(Coordinate),
    /// A tween towards the click has started
    Animating { from: Coordinate, to: Coordinate },
}

/// The single marker that follows map clicks
#[derive(Debug, Clone)]
pub struct ClickMarker {
    visible: bool,
    position: Option<Coordinate>,
    tween: Option<Tween>,
    duration: Duration,
}

impl Default for ClickMarker {
    fn default() -> Self {
        Self::new(ANIMATION_DURATION)
    }
}

impl ClickMarker {
    /// A hidden marker without position
    pub fn new(duration: Duration) -> Self {
        Self {
            visible: false,
            position: None,
            tween: None,
            duration,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Displayed position, absent until the first click while visible
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Show or hide the marker. Hiding completes a running tween at its target.
    pub fn set_visible(&mut self, visible: bool) {
        if !visible && let Some(tween) = self.tween.take() {
            self.position = Some(tween.target());
        }
        self.visible = visible;
    }

    /// Handle a click on the map.
    ///
    /// A click during a running tween restarts it from the current interpolated
    /// position with the full duration.
    pub fn click(&mut self, target: Coordinate) -> ClickOutcome {
        if !self.visible {
            return ClickOutcome::Ignored;
        }

        match self.position {
            None => {
                self.position = Some(target);
                ClickOutcome::Placed(target)
            }
            Some(from) => {
                self.tween = Some(Tween::new(from, target, self.duration));
                ClickOutcome::Animating { from, to: target }
            }
        }
    }

    /// Advance a running tween. Returns the new position if the marker moved.
    pub fn advance(&mut self, dt: Duration) -> Option<Coordinate> {
        let tween = self.tween.as_mut()?;
        let position = tween.advance(dt);
        if tween.is_finished() {
            self.tween = None;
        }
        self.position = Some(position);
        Some(position)
    }
}

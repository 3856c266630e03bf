use raylib::prelude::Vector2;
use crate::constants::*;
use crate::state::Screen;

/// On-screen controls that can be activated by a click or tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Next,
    Previous,
    Home,
    Dot(usize),
    Audio(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

/// Raw input already reduced to what the presentation cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stimulus {
    Activate(Control),
    Key(NavKey),
    /// Vertical wheel delta in pixels, positive when scrolling down.
    Wheel(f32),
    /// Displacement `start - end`, so positive `dy` means the pointer moved up.
    Swipe { dx: f32, dy: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Advance,
    Retreat,
    GoTo(usize),
    Reset,
    ToggleAudio(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
}

/// Navigational swipes must exceed the threshold on their larger axis and be vertical-dominant.
pub fn classify_swipe(dx: f32, dy: f32) -> Option<SwipeDirection> {
    if dx.abs().max(dy.abs()) <= SWIPE_THRESHOLD {
        return None;
    }
    if dy.abs() <= dx.abs() {
        return None;
    }
    if dy > 0.0 {
        Some(SwipeDirection::Up)
    } else {
        Some(SwipeDirection::Down)
    }
}

/// Raylib reports notches with positive values when scrolling up.
pub fn wheel_delta_from_notches(notches: f32) -> f32 {
    -notches * WHEEL_PIXELS_PER_NOTCH
}

pub fn map_stimulus(stimulus: Stimulus, screen: Screen, transitioning: bool) -> Option<Action> {
    match stimulus {
        Stimulus::Activate(Control::Home) => Some(Action::Reset),
        Stimulus::Activate(Control::Start) if screen == Screen::Landing => Some(Action::Start),
        Stimulus::Wheel(delta) if screen == Screen::Landing => {
            if !transitioning && delta > WHEEL_THRESHOLD {
                Some(Action::Start)
            } else {
                None
            }
        }
        _ if screen != Screen::Experience => None,

        Stimulus::Activate(control) => match control {
            Control::Next => Some(Action::Advance),
            Control::Previous => Some(Action::Retreat),
            Control::Dot(index) if !transitioning => Some(Action::GoTo(index)),
            Control::Audio(index) => Some(Action::ToggleAudio(index)),
            _ => None,
        },
        Stimulus::Key(NavKey::Right | NavKey::Down) => Some(Action::Advance),
        Stimulus::Key(NavKey::Left | NavKey::Up) => Some(Action::Retreat),
        Stimulus::Wheel(_) if transitioning => None,
        Stimulus::Wheel(delta) if delta > WHEEL_THRESHOLD => Some(Action::Advance),
        Stimulus::Wheel(delta) if delta < -WHEEL_THRESHOLD => Some(Action::Retreat),
        Stimulus::Wheel(_) => None,
        Stimulus::Swipe { dx, dy } => match classify_swipe(dx, dy)? {
            SwipeDirection::Up => Some(Action::Advance),
            SwipeDirection::Down => Some(Action::Retreat),
        },
    }
}

/// Result of one press/release pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Tap(Vector2),
    Swipe { dx: f32, dy: f32 },
}

/// Tracks a pointer (mouse or touch) between press and release.
#[derive(Debug, Default)]
pub struct PointerTracker {
    start: Option<Vector2>,
}

impl PointerTracker {
    pub fn press(&mut self, position: Vector2) {
        self.start = Some(position);
    }

    /// Movements beyond the swipe threshold never count as taps, even when horizontal.
    pub fn release(&mut self, position: Vector2) -> Option<Gesture> {
        let start = self.start.take()?;
        let dx = start.x - position.x;
        let dy = start.y - position.y;
        if dx.abs().max(dy.abs()) > SWIPE_THRESHOLD {
            Some(Gesture::Swipe { dx, dy })
        } else {
            Some(Gesture::Tap(position))
        }
    }
}

use raylib::prelude::*;
use crate::constants::*;
use crate::input::Control;
use crate::state::Screen;
use crate::view::View;

// All coordinates are in render-texture space (RENDER_WIDTH x RENDER_HEIGHT).

pub const BUTTON_HEIGHT: f32 = 64.0;
pub const NAV_BUTTON_SIZE: f32 = 64.0;
pub const DOT_RADIUS: f32 = 8.0;
pub const DOT_HIT_RADIUS: f32 = 18.0;
pub const DOT_SPACING: f32 = 40.0;
pub const AUDIO_BUTTON_RADIUS: f32 = 32.0;

pub const TITLE_FONT_SIZE: i32 = 56;
pub const BODY_FONT_SIZE: i32 = 28;
pub const BODY_LINE_HEIGHT: i32 = 40;

pub fn start_button() -> Rectangle {
    let width = 320.0;
    Rectangle::new(
        (RENDER_WIDTH as f32 - width) * 0.5,
        RENDER_HEIGHT as f32 * 0.66,
        width,
        BUTTON_HEIGHT,
    )
}

/// Home control: top-left on the landing and slide screens, centered on the closing screen.
pub fn home_button(screen: Screen) -> Rectangle {
    match screen {
        Screen::Landing | Screen::Experience => Rectangle::new(40.0, 40.0, 160.0, 56.0),
        Screen::Closing => {
            let width = 360.0;
            Rectangle::new(
                (RENDER_WIDTH as f32 - width) * 0.5,
                RENDER_HEIGHT as f32 * 0.66,
                width,
                BUTTON_HEIGHT,
            )
        }
    }
}

pub fn previous_button() -> Rectangle {
    Rectangle::new(
        RENDER_WIDTH as f32 - 3.0 * NAV_BUTTON_SIZE - 80.0 - 120.0,
        RENDER_HEIGHT as f32 - NAV_BUTTON_SIZE - 48.0,
        NAV_BUTTON_SIZE,
        NAV_BUTTON_SIZE,
    )
}

pub fn next_button() -> Rectangle {
    Rectangle::new(
        RENDER_WIDTH as f32 - NAV_BUTTON_SIZE - 80.0,
        RENDER_HEIGHT as f32 - NAV_BUTTON_SIZE - 48.0,
        NAV_BUTTON_SIZE,
        NAV_BUTTON_SIZE,
    )
}

/// Counter text sits between the previous and next buttons.
pub fn counter_anchor() -> Vector2 {
    let previous = previous_button();
    let next = next_button();
    Vector2::new(
        (previous.x + previous.width + next.x) * 0.5,
        previous.y + NAV_BUTTON_SIZE * 0.5,
    )
}

/// Indicator dots are stacked vertically along the right edge.
pub fn dot_center(index: usize, count: usize) -> Vector2 {
    let column_height = DOT_SPACING * count.saturating_sub(1) as f32;
    let top = (RENDER_HEIGHT as f32 - column_height) * 0.5;
    Vector2::new(
        RENDER_WIDTH as f32 - 48.0,
        top + DOT_SPACING * index as f32,
    )
}

/// Image fills the left half of a slide, text the right half.
pub fn image_area() -> Rectangle {
    Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32 * 0.5, RENDER_HEIGHT as f32)
}

pub fn text_area() -> Rectangle {
    let left = RENDER_WIDTH as f32 * 0.5 + 96.0;
    Rectangle::new(left, 200.0, RENDER_WIDTH as f32 - left - 160.0, RENDER_HEIGHT as f32 - 420.0)
}

pub fn audio_button_center() -> Vector2 {
    let text = text_area();
    Vector2::new(text.x + AUDIO_BUTTON_RADIUS, text.y + text.height + 80.0)
}

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

fn within(center: Vector2, radius: f32, point: Vector2) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

/// Finds the control under `point` for what is currently shown.
pub fn hit_test(view: &View, point: Vector2) -> Option<Control> {
    if contains(&home_button(view.screen), point) {
        return Some(Control::Home);
    }

    match view.screen {
        Screen::Landing => contains(&start_button(), point).then_some(Control::Start),
        Screen::Closing => None,
        Screen::Experience => {
            if !view.previous_disabled && contains(&previous_button(), point) {
                return Some(Control::Previous);
            }
            if !view.next_disabled && contains(&next_button(), point) {
                return Some(Control::Next);
            }
            let count = view.dots.len();
            if let Some(index) = (0..count).find(|&i| within(dot_center(i, count), DOT_HIT_RADIUS, point)) {
                return Some(Control::Dot(index));
            }
            let current = view.slides.get(view.current_index)?;
            if current.has_audio && within(audio_button_center(), AUDIO_BUTTON_RADIUS, point) {
                return Some(Control::Audio(view.current_index));
            }
            None
        }
    }
}

/// Decorative shapes drift opposite to the pointer.
pub fn parallax_offset(pointer: Vector2) -> Vector2 {
    Vector2::new(
        (RENDER_WIDTH as f32 * 0.5 - pointer.x) / PARALLAX_DIVISOR,
        (RENDER_HEIGHT as f32 * 0.5 - pointer.y) / PARALLAX_DIVISOR,
    )
}

/// Greedy word wrap. `measure` returns the pixel width of a string.
pub fn wrap_text(text: &str, max_width: i32, measure: impl Fn(&str) -> i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", line, word);
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Scale that makes an image of `width` x `height` cover `area` completely.
pub fn cover_scale(width: f32, height: f32, area: &Rectangle) -> f32 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }
    (area.width / width).max(area.height / height)
}

/// Maps a window-space position into render-texture space.
pub fn to_render_space(point: Vector2, screen_width: f32, screen_height: f32) -> Vector2 {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return point;
    }
    Vector2::new(
        point.x * RENDER_WIDTH as f32 / screen_width,
        point.y * RENDER_HEIGHT as f32 / screen_height,
    )
}

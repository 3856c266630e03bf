use rand::Rng;
use raylib::prelude::*;
use crate::constants::*;
use crate::input::{wheel_delta_from_notches, Gesture, NavKey, PointerTracker, Stimulus};
use crate::layout::*;
use crate::slide::Slide;
use crate::state::Screen;
use crate::view::{Curtain, View};

const KEY_BINDINGS: [(KeyboardKey, NavKey); 4] = [
    (KeyboardKey::KEY_RIGHT, NavKey::Right),
    (KeyboardKey::KEY_DOWN, NavKey::Down),
    (KeyboardKey::KEY_LEFT, NavKey::Left),
    (KeyboardKey::KEY_UP, NavKey::Up),
];

/// Decorative outline drawn over a slide, in slide-relative coordinates.
struct OverlayShape {
    position: Vector2,
    size: f32,
    rotation: f32,
}

impl OverlayShape {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            position: Vector2::new(rng.random_range(0.05..0.45), rng.random_range(0.1..0.9)),
            size: rng.random_range(80.0..220.0),
            rotation: rng.random_range(-30.0..30.0),
        }
    }
}

/// The raylib side of the presentation: turns window input into stimuli and draws a `View`.
pub struct Stage {
    textures: Vec<Option<Texture2D>>,
    overlays: Vec<[OverlayShape; 2]>,

    tracker: PointerTracker,
    pointer: Vector2, // Last pointer position in render space

    scroll: f32,        // Fractional slide index at the top of the screen
    scroll_target: usize,
    scroll_tween: Option<ease::Tween>,
    scroll_elapsed: f32,
}

impl Stage {
    pub fn new(textures: Vec<Option<Texture2D>>) -> Self {
        let mut rng = rand::rng();
        let overlays = (0..textures.len())
            .map(|_| [OverlayShape::random(&mut rng), OverlayShape::random(&mut rng)])
            .collect();

        Self {
            textures,
            overlays,
            tracker: PointerTracker::default(),
            pointer: Vector2::new(RENDER_WIDTH as f32 * 0.5, RENDER_HEIGHT as f32 * 0.5),
            scroll: 0.0,
            scroll_target: 0,
            scroll_tween: None,
            scroll_elapsed: 0.0,
        }
    }

    /// Collects this frame's stimuli. Taps are resolved against the controls of `view`.
    pub fn poll(&mut self, rl: &RaylibHandle, view: &View) -> Vec<Stimulus> {
        let mut stimuli = Vec::new();

        for (key, nav) in KEY_BINDINGS {
            if rl.is_key_pressed(key) {
                stimuli.push(Stimulus::Key(nav));
            }
        }

        let notches = rl.get_mouse_wheel_move();
        if notches != 0.0 {
            stimuli.push(Stimulus::Wheel(wheel_delta_from_notches(notches)));
        }

        // Touch input is reported through the left mouse button as well
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let mouse = rl.get_mouse_position();
        self.pointer = to_render_space(mouse, screen_width, screen_height);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            self.tracker.press(mouse);
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            match self.tracker.release(mouse) {
                Some(Gesture::Tap(position)) => {
                    let point = to_render_space(position, screen_width, screen_height);
                    if let Some(control) = hit_test(view, point) {
                        stimuli.push(Stimulus::Activate(control));
                    }
                }
                Some(Gesture::Swipe { dx, dy }) => stimuli.push(Stimulus::Swipe { dx, dy }),
                None => {}
            }
        }

        stimuli
    }

    pub fn update(&mut self, dt: f32, view: &View) {
        if view.current_index != self.scroll_target {
            self.scroll_target = view.current_index;
            if view.screen == Screen::Experience {
                self.scroll_tween = Some(ease::Tween::new(
                    ease::cubic_out,
                    self.scroll,
                    self.scroll_target as f32,
                    TRANSITION_DURATION,
                ));
                self.scroll_elapsed = 0.0;
            } else {
                // Jump when the slides are not visible
                self.scroll = self.scroll_target as f32;
                self.scroll_tween = None;
            }
        }

        if let Some(tween) = self.scroll_tween.as_mut() {
            self.scroll = tween.apply(dt);
            self.scroll_elapsed += dt;
            if self.scroll_elapsed >= TRANSITION_DURATION {
                self.scroll = self.scroll_target as f32;
                self.scroll_tween = None;
            }
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, view: &View, slides: &[Slide]) {
        d.clear_background(if view.dark_backdrop() { Color::BLACK } else { CREAM });

        match view.screen {
            Screen::Landing => self.draw_landing(d),
            Screen::Experience => {
                for (index, slide) in slides.iter().enumerate() {
                    let offset = (index as f32 - self.scroll) * RENDER_HEIGHT as f32;
                    // Only slides intersecting the screen
                    if offset.abs() < RENDER_HEIGHT as f32 {
                        self.draw_slide(d, view, index, slide, offset);
                    }
                }
                self.draw_controls(d, view);
            }
            Screen::Closing => self.draw_closing(d),
        }

        draw_curtain(d, view.curtain);
    }

    fn draw_landing(&self, d: &mut RaylibDrawHandle) {
        self.draw_parallax_shapes(d);

        draw_centered_text(d, "AUDIENCIAS DIGITALES", RENDER_HEIGHT / 2 - 200, 36, ACCENT);
        draw_centered_text(d, "Rompiendo la sociología espontánea", RENDER_HEIGHT / 2 - 120, 72, INK);
        draw_centered_text(d, "Una reflexión en cinco momentos", RENDER_HEIGHT / 2 - 20, 32, MUTED);

        draw_button(d, start_button(), "Comenzar", INK, CREAM);

        let home = home_button(Screen::Landing);
        d.draw_rectangle_lines_ex(home, 2.0, INK);
        draw_text_in(d, home, "Inicio", 28, INK);
        draw_centered_text(d, "o desplaza hacia abajo", RENDER_HEIGHT - 100, 24, MUTED);
    }

    fn draw_closing(&self, d: &mut RaylibDrawHandle) {
        self.draw_parallax_shapes(d);

        draw_centered_text(d, "Gracias", RENDER_HEIGHT / 2 - 180, 96, INK);
        draw_centered_text(
            d,
            "Diseñar desde el conocimiento real de los usuarios.",
            RENDER_HEIGHT / 2 - 40,
            32,
            MUTED,
        );
        draw_button(d, home_button(Screen::Closing), "Volver al inicio", ACCENT, CREAM);
    }

    fn draw_parallax_shapes(&self, d: &mut RaylibDrawHandle) {
        let offset = parallax_offset(self.pointer);
        let w = RENDER_WIDTH as f32;
        let h = RENDER_HEIGHT as f32;

        // Rotated square
        d.draw_rectangle_pro(
            Rectangle::new(w * 0.15 + offset.x, h * 0.25 + offset.y, 180.0, 180.0),
            Vector2::new(90.0, 90.0),
            45.0,
            with_alpha(ACCENT, 0.35),
        );
        d.draw_circle_v(
            Vector2::new(w * 0.82 - offset.x * 2.0, h * 0.30 - offset.y * 2.0),
            140.0,
            with_alpha(INK, 0.12),
        );
        d.draw_rectangle_rec(
            Rectangle::new(w * 0.70 + offset.x * 1.5, h * 0.72 - offset.y * 0.5, 260.0, 24.0),
            with_alpha(ACCENT, 0.5),
        );
    }

    fn draw_slide(&self, d: &mut RaylibDrawHandle, view: &View, index: usize, slide: &Slide, offset: f32) {
        let Some(slide_view) = view.slides.get(index) else {
            return;
        };

        let area = image_area();
        let area = Rectangle::new(area.x, area.y + offset, area.width, area.height);

        match self.textures.get(index).and_then(|t| t.as_ref()) {
            Some(texture) => {
                let tex_width = texture.width() as f32;
                let tex_height = texture.height() as f32;
                let scale = cover_scale(tex_width, tex_height, &area);

                // Crop the centre of the texture to the area's aspect ratio
                let source_width = area.width / scale;
                let source_height = area.height / scale;
                let source = Rectangle::new(
                    (tex_width - source_width) * 0.5,
                    (tex_height - source_height) * 0.5,
                    source_width,
                    source_height,
                );
                d.draw_texture_pro(texture, source, area, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
            }
            None => {
                d.draw_rectangle_rec(area, with_alpha(MUTED, 0.3));
                d.draw_text(slide.image, area.x as i32 + 40, (area.y + area.height * 0.5) as i32, 24, MUTED);
            }
        }
        d.draw_rectangle_rec(area, with_alpha(Color::BLACK, slide_view.image_shade()));

        if let Some(shapes) = self.overlays.get(index) {
            for shape in shapes {
                d.draw_rectangle_pro(
                    Rectangle::new(
                        RENDER_WIDTH as f32 * shape.position.x,
                        RENDER_HEIGHT as f32 * shape.position.y + offset,
                        shape.size,
                        shape.size,
                    ),
                    Vector2::new(shape.size * 0.5, shape.size * 0.5),
                    shape.rotation,
                    with_alpha(ACCENT, 0.18),
                );
            }
        }

        // Text and audio control are revealed on the active slide only
        if !slide_view.shows_content() {
            return;
        }

        let text = text_area();
        let mut y = text.y + offset;
        d.draw_text(&slide.number_label(), text.x as i32, y as i32, 32, ACCENT);
        y += 64.0;

        for line in wrap_text(slide.title, text.width as i32, |s| d.measure_text(s, TITLE_FONT_SIZE)) {
            d.draw_text(&line, text.x as i32, y as i32, TITLE_FONT_SIZE, Color::WHITE);
            y += TITLE_FONT_SIZE as f32 + 8.0;
        }
        y += 24.0;

        for line in wrap_text(slide.description, text.width as i32, |s| d.measure_text(s, BODY_FONT_SIZE)) {
            d.draw_text(&line, text.x as i32, y as i32, BODY_FONT_SIZE, Color::LIGHTGRAY);
            y += BODY_LINE_HEIGHT as f32;
        }

        if slide_view.has_audio {
            let center = audio_button_center();
            draw_audio_button(d, Vector2::new(center.x, center.y + offset), slide_view.audio_playing);
            d.draw_text(
                "Audio Reflection",
                (center.x + AUDIO_BUTTON_RADIUS + 24.0) as i32,
                (center.y + offset) as i32 - 12,
                24,
                Color::LIGHTGRAY,
            );
        }
    }

    fn draw_controls(&self, d: &mut RaylibDrawHandle, view: &View) {
        let home = home_button(Screen::Experience);
        d.draw_rectangle_lines_ex(home, 2.0, Color::WHITE);
        draw_text_in(d, home, "Inicio", 28, Color::WHITE);

        let previous = previous_button();
        let previous_color = if view.previous_disabled { with_alpha(Color::WHITE, 0.25) } else { Color::WHITE };
        d.draw_rectangle_lines_ex(previous, 2.0, previous_color);
        draw_arrow(d, previous, -1.0, previous_color);

        let next = next_button();
        let next_color = if view.next_disabled { with_alpha(Color::WHITE, 0.25) } else { Color::WHITE };
        d.draw_rectangle_lines_ex(next, 2.0, next_color);
        draw_arrow(d, next, 1.0, next_color);

        let anchor = counter_anchor();
        let width = d.measure_text(&view.counter, 28);
        d.draw_text(&view.counter, anchor.x as i32 - width / 2, anchor.y as i32 - 14, 28, Color::WHITE);

        let count = view.dots.len();
        for (index, dot) in view.dots.iter().enumerate() {
            let center = dot_center(index, count);
            if dot.active {
                d.draw_circle_v(center, DOT_RADIUS * 1.5, ACCENT);
            } else if dot.completed {
                d.draw_circle_v(center, DOT_RADIUS, Color::WHITE);
            } else {
                d.draw_circle_lines(center.x as i32, center.y as i32, DOT_RADIUS, Color::WHITE);
            }
        }
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn draw_centered_text(d: &mut RaylibDrawHandle, text: &str, y: i32, size: i32, color: Color) {
    let width = d.measure_text(text, size);
    d.draw_text(text, (RENDER_WIDTH - width) / 2, y, size, color);
}

fn draw_text_in(d: &mut RaylibDrawHandle, rect: Rectangle, text: &str, size: i32, color: Color) {
    let width = d.measure_text(text, size);
    d.draw_text(
        text,
        (rect.x + (rect.width - width as f32) * 0.5) as i32,
        (rect.y + (rect.height - size as f32) * 0.5) as i32,
        size,
        color,
    );
}

fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str, fill: Color, text: Color) {
    d.draw_rectangle_rec(rect, fill);
    draw_text_in(d, rect, label, 30, text);
}

/// `direction` is -1.0 for a left-pointing arrow and 1.0 for a right-pointing one.
fn draw_arrow(d: &mut RaylibDrawHandle, rect: Rectangle, direction: f32, color: Color) {
    let cx = rect.x + rect.width * 0.5;
    let cy = rect.y + rect.height * 0.5;
    let tip = Vector2::new(cx + 12.0 * direction, cy);
    let top = Vector2::new(cx - 8.0 * direction, cy - 14.0);
    let bottom = Vector2::new(cx - 8.0 * direction, cy + 14.0);
    // Vertices must be counter-clockwise
    if direction > 0.0 {
        d.draw_triangle(top, bottom, tip, color);
    } else {
        d.draw_triangle(top, tip, bottom, color);
    }
}

fn draw_audio_button(d: &mut RaylibDrawHandle, center: Vector2, playing: bool) {
    d.draw_circle_v(center, AUDIO_BUTTON_RADIUS, ACCENT);
    if playing {
        d.draw_rectangle_rec(Rectangle::new(center.x - 11.0, center.y - 12.0, 8.0, 24.0), Color::WHITE);
        d.draw_rectangle_rec(Rectangle::new(center.x + 3.0, center.y - 12.0, 8.0, 24.0), Color::WHITE);
    } else {
        d.draw_triangle(
            Vector2::new(center.x - 8.0, center.y - 14.0),
            Vector2::new(center.x - 8.0, center.y + 14.0),
            Vector2::new(center.x + 14.0, center.y),
            Color::WHITE,
        );
    }
}

fn draw_curtain(d: &mut RaylibDrawHandle, curtain: Curtain) {
    let height = RENDER_HEIGHT as f32;
    let covered = match curtain {
        Curtain::Hidden => return,
        Curtain::Covering(progress) => ease::cubic_in_out(progress, 0.0, 1.0, 1.0),
        Curtain::Lifting(progress) => 1.0 - ease::cubic_in_out(progress, 0.0, 1.0, 1.0),
    };
    d.draw_rectangle_rec(Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, height * covered), INK);
}

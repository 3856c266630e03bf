use raylib::prelude::Color;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const TRANSITION_DURATION: f32 = 0.8;     // Curtain and slide scroll duration (seconds)

pub const WHEEL_THRESHOLD: f32 = 30.0;        // Minimum wheel delta that navigates (pixels)
pub const WHEEL_PIXELS_PER_NOTCH: f32 = 100.0; // One wheel notch expressed as a pixel delta
pub const SWIPE_THRESHOLD: f32 = 50.0;        // Minimum swipe displacement (pixels)

pub const PARALLAX_DIVISOR: f32 = 30.0;       // Pointer offset divisor for decorative shapes

pub const CREAM: Color = Color::new(245, 240, 230, 255);
pub const INK: Color = Color::new(20, 20, 20, 255);
pub const ACCENT: Color = Color::new(214, 90, 49, 255);
pub const MUTED: Color = Color::new(150, 150, 150, 255);

use crate::slide::Slide;
use crate::state::{AudioState, PresentationState, Screen};

/// Curtain covering screen changes. Progress runs from 0.0 to 1.0 in each phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curtain {
    Hidden,
    Covering(f32),
    Lifting(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideView {
    pub active: bool,
    pub past: bool,
    pub has_audio: bool,
    pub audio_playing: bool,
}

impl SlideView {
    /// Badge, title, description and audio control are only revealed on the active slide.
    pub fn shows_content(&self) -> bool {
        self.active
    }

    /// Opacity of the dark wash drawn over the slide image. Past slides are dimmed most.
    pub fn image_shade(&self) -> f32 {
        if self.active {
            0.25
        } else if self.past {
            0.7
        } else {
            0.45
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotView {
    pub active: bool,
    pub completed: bool,
}

/// Everything the window needs to draw, derived from `PresentationState` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub screen: Screen,
    pub current_index: usize,
    pub slides: Vec<SlideView>,
    pub dots: Vec<DotView>,
    pub counter: String,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub curtain: Curtain,
}

impl View {
    pub fn from_state(state: &PresentationState, slides: &[Slide], curtain: Curtain) -> Self {
        let current = state.current_index;

        let slide_views = slides
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideView {
                active: index == current,
                past: index < current,
                has_audio: slide.audio.is_some(),
                audio_playing: state.audio == AudioState::Playing(index),
            })
            .collect();

        let dots = (0..slides.len())
            .map(|index| DotView {
                active: index == current,
                completed: index < current,
            })
            .collect();

        Self {
            screen: state.screen,
            current_index: current,
            slides: slide_views,
            dots,
            counter: format!("{} / {}", current + 1, slides.len()),
            previous_disabled: current == 0,
            next_disabled: false,
            curtain,
        }
    }

    /// Dark backdrop while slides are shown, light otherwise.
    pub fn dark_backdrop(&self) -> bool {
        self.screen == Screen::Experience
    }
}

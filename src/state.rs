/// Top-level view currently shown.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Screen {
    Landing,    // Title screen with the start control
    Experience, // Slides are shown one at a time
    Closing,    // Final screen after the last slide
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AudioState {
    Stopped,
    Playing(usize), // Index of the slide whose narration is playing
}

/// All mutable presentation state. Owned by exactly one `Presentation`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PresentationState {
    pub current_index: usize,
    pub screen: Screen,
    pub transitioning: bool,
    pub audio: AudioState,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            current_index: 0,
            screen: Screen::Landing,
            transitioning: false,
            audio: AudioState::Stopped,
        }
    }
}

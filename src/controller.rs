use anyhow::{bail, Result};
use tracing::{debug, info};
use crate::constants::*;
use crate::input::{map_stimulus, Action, Stimulus};
use crate::media::{MediaPlayer, PlaybackOutcome};
use crate::slide::Slide;
use crate::state::{AudioState, PresentationState, Screen};
use crate::view::{Curtain, View};

/// The presentation controller: sole owner of `PresentationState` and sole user of the media player.
///
/// Time only moves through `update(dt)`. The transition lock is released by that timer,
/// never by the end of a drawn animation, so stimuli arriving during the window are dropped.
pub struct Presentation<M: MediaPlayer> {
    slides: &'static [Slide],
    state: PresentationState,
    media: M,

    lock_remaining: f32,          // Seconds until `transitioning` clears
    pending_screen: Option<Screen>, // Screen shown once the covering curtain has closed
    curtain: Curtain,
    curtain_timer: f32,

    view: View,
}

impl<M: MediaPlayer> Presentation<M> {
    pub fn new(slides: &'static [Slide], media: M) -> Result<Self> {
        if slides.is_empty() {
            bail!("a presentation needs at least one slide");
        }
        let state = PresentationState::default();
        let view = View::from_state(&state, slides, Curtain::Hidden);
        Ok(Self {
            slides,
            state,
            media,
            lock_remaining: 0.0,
            pending_screen: None,
            curtain: Curtain::Hidden,
            curtain_timer: 0.0,
            view,
        })
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn slides(&self) -> &'static [Slide] {
        self.slides
    }

    #[cfg(test)]
    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Routes one input stimulus to the matching operation, if any.
    pub fn dispatch(&mut self, stimulus: Stimulus) {
        let Some(action) = map_stimulus(stimulus, self.state.screen, self.state.transitioning) else {
            return;
        };
        debug!("{:?} -> {:?}", stimulus, action);
        match action {
            Action::Start => self.start(),
            Action::Advance => self.advance(),
            Action::Retreat => self.retreat(),
            Action::GoTo(index) => self.go_to(index),
            Action::Reset => self.reset(),
            Action::ToggleAudio(index) => self.toggle_audio(index),
        }
    }

    pub fn start(&mut self) {
        if self.state.transitioning || self.state.screen != Screen::Landing {
            debug!("start ignored (screen {:?}, transitioning {})", self.state.screen, self.state.transitioning);
            return;
        }
        info!("Starting presentation");
        self.begin_screen_change(Screen::Experience);
    }

    pub fn advance(&mut self) {
        if self.state.transitioning {
            return;
        }
        if self.state.current_index == self.slides.len() - 1 {
            self.finish();
            return;
        }
        self.go_to(self.state.current_index + 1);
    }

    pub fn retreat(&mut self) {
        if self.state.transitioning || self.state.current_index == 0 {
            return;
        }
        self.go_to(self.state.current_index - 1);
    }

    pub fn go_to(&mut self, index: usize) {
        if self.state.transitioning {
            return;
        }
        if index >= self.slides.len() {
            debug!("go_to({}) out of bounds", index);
            return;
        }

        self.state.transitioning = true;
        self.lock_remaining = TRANSITION_DURATION;
        self.state.current_index = index;
        debug!("Slide {} / {}", index + 1, self.slides.len());
        self.render();
        self.autoplay();
    }

    pub fn finish(&mut self) {
        if self.state.screen != Screen::Experience || self.pending_screen.is_some() {
            return;
        }
        info!("Closing presentation");
        self.stop_audio();
        self.begin_screen_change(Screen::Closing);
    }

    pub fn reset(&mut self) {
        info!("Back to landing from {:?}", self.state.screen);
        self.stop_audio();
        self.state.screen = Screen::Landing;
        self.state.current_index = 0;
        self.state.transitioning = false;
        self.lock_remaining = 0.0;
        self.pending_screen = None;
        self.curtain = Curtain::Hidden;
        self.render();
    }

    pub fn toggle_audio(&mut self, index: usize) {
        if self.state.screen != Screen::Experience || self.pending_screen.is_some() {
            return;
        }
        if index >= self.slides.len() {
            return;
        }

        if self.state.audio == AudioState::Playing(index) {
            self.media.pause();
            self.state.audio = AudioState::Stopped;
            debug!("Paused narration for slide {}", index + 1);
        } else {
            self.stop_audio();
            self.play_audio(index);
        }
        self.render();
    }

    /// Advances timers by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.media.update();

        if let AudioState::Playing(index) = self.state.audio {
            if self.media.track_finished() {
                debug!("Narration for slide {} ended", index + 1);
                self.state.audio = AudioState::Stopped;
                self.render();
            }
        }

        if self.state.transitioning {
            self.lock_remaining -= dt;
            if self.lock_remaining <= 0.0 {
                self.lock_remaining = 0.0;
                self.state.transitioning = false;
                if let Some(screen) = self.pending_screen.take() {
                    self.enter_screen(screen);
                }
                self.render();
            }
        }

        match self.curtain {
            Curtain::Hidden => {}
            Curtain::Covering(_) => {
                // Flipping to Lifting happens in enter_screen
                self.curtain_timer += dt;
                self.curtain = Curtain::Covering((self.curtain_timer / TRANSITION_DURATION).min(1.0));
                self.render();
            }
            Curtain::Lifting(_) => {
                self.curtain_timer += dt;
                self.curtain = if self.curtain_timer >= TRANSITION_DURATION {
                    Curtain::Hidden
                } else {
                    Curtain::Lifting(self.curtain_timer / TRANSITION_DURATION)
                };
                self.render();
            }
        }
    }

    fn begin_screen_change(&mut self, target: Screen) {
        self.state.transitioning = true;
        self.lock_remaining = TRANSITION_DURATION;
        self.pending_screen = Some(target);
        self.curtain = Curtain::Covering(0.0);
        self.curtain_timer = 0.0;
        self.render();
    }

    fn enter_screen(&mut self, screen: Screen) {
        debug!("Entering {:?}", screen);
        self.state.screen = screen;
        self.curtain = Curtain::Lifting(0.0);
        self.curtain_timer = 0.0;
        self.render();
        self.autoplay();
    }

    /// Restarts narration for the current slide. Only runs while slides are on screen.
    fn autoplay(&mut self) {
        if self.state.screen != Screen::Experience {
            return;
        }
        self.stop_audio();
        self.play_audio(self.state.current_index);
        self.render();
    }

    fn play_audio(&mut self, index: usize) {
        let Some(track) = self.slides[index].audio else {
            debug!("Slide {} has no narration", index + 1);
            return;
        };
        match self.media.play(track) {
            PlaybackOutcome::Started => {
                debug!("Playing {} for slide {}", track, index + 1);
                self.state.audio = AudioState::Playing(index);
            }
            PlaybackOutcome::Rejected(reason) => {
                info!("Narration for slide {} not started: {}", index + 1, reason);
                self.state.audio = AudioState::Stopped;
            }
        }
    }

    fn stop_audio(&mut self) {
        self.media.pause();
        self.media.rewind();
        self.state.audio = AudioState::Stopped;
    }

    fn render(&mut self) {
        self.view = View::from_state(&self.state, self.slides, self.curtain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Control, NavKey};
    use crate::media::testing::{Call, RecordingPlayer};
    use crate::slide::SLIDES;

    const FRAME: f32 = 1.0 / 60.0;

    fn presentation() -> Presentation<RecordingPlayer> {
        Presentation::new(&SLIDES, RecordingPlayer::default()).unwrap()
    }

    fn run(p: &mut Presentation<RecordingPlayer>, seconds: f32) {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            p.update(FRAME);
        }
    }

    /// Started presentation with the curtain fully lifted.
    fn in_experience() -> Presentation<RecordingPlayer> {
        let mut p = presentation();
        p.start();
        run(&mut p, TRANSITION_DURATION * 2.0 + 0.1);
        p
    }

    fn settle(p: &mut Presentation<RecordingPlayer>) {
        run(p, TRANSITION_DURATION + 0.05);
    }

    #[test]
    fn test_initial_state() {
        let p = presentation();
        assert_eq!(*p.state(), PresentationState::default());
        assert_eq!(p.view().curtain, Curtain::Hidden);
        assert!(p.media().calls.is_empty());
    }

    #[test]
    fn test_empty_deck_rejected() {
        static EMPTY: [Slide; 0] = [];
        assert!(Presentation::new(&EMPTY, RecordingPlayer::default()).is_err());
    }

    #[test]
    fn test_start_enters_experience_after_curtain() {
        let mut p = presentation();
        p.start();
        assert_eq!(p.state().screen, Screen::Landing);
        assert!(p.state().transitioning);
        assert_eq!(p.view().curtain, Curtain::Covering(0.0));

        run(&mut p, TRANSITION_DURATION / 2.0);
        assert_eq!(p.state().screen, Screen::Landing);
        assert!(p.media().plays().is_empty());

        run(&mut p, TRANSITION_DURATION / 2.0 + 0.05);
        assert_eq!(p.state().screen, Screen::Experience);
        assert_eq!(p.state().current_index, 0);
        assert!(!p.state().transitioning);
        assert_eq!(p.media().plays(), vec!["audio1.mp3"]);
        assert_eq!(p.state().audio, AudioState::Playing(0));
        assert!(matches!(p.view().curtain, Curtain::Lifting(_)));

        run(&mut p, TRANSITION_DURATION);
        assert_eq!(p.view().curtain, Curtain::Hidden);
    }

    #[test]
    fn test_start_is_not_reentrant() {
        let mut p = presentation();
        p.start();
        p.start();
        settle(&mut p);
        p.start();
        settle(&mut p);
        assert_eq!(p.media().plays().len(), 1);
        assert_eq!(p.state().screen, Screen::Experience);
    }

    #[test]
    fn test_go_to_every_slide() {
        for index in 0..SLIDES.len() {
            let mut p = in_experience();
            p.go_to(index);
            assert_eq!(p.state().current_index, index);
            assert!(p.state().transitioning);
            assert_eq!(p.state().audio, AudioState::Playing(index));
            assert_eq!(p.media().plays().last().copied(), SLIDES[index].audio);
        }
    }

    #[test]
    fn test_go_to_out_of_bounds() {
        let mut p = in_experience();
        let before = *p.state();
        p.go_to(SLIDES.len());
        assert_eq!(*p.state(), before);
    }

    #[test]
    fn test_audio_stopped_before_restart() {
        let mut p = in_experience();
        p.media_mut().calls.clear();
        p.advance();
        assert_eq!(
            p.media().calls,
            vec![Call::Pause, Call::Rewind, Call::Play("audio2.mp3".to_string())]
        );
    }

    #[test]
    fn test_navigation_while_transitioning_is_noop() {
        let mut p = in_experience();
        p.advance();
        let locked = *p.state();
        let calls = p.media().calls.len();

        p.advance();
        p.retreat();
        p.go_to(3);
        assert_eq!(*p.state(), locked);
        assert_eq!(p.media().calls.len(), calls);

        settle(&mut p);
        assert!(!p.state().transitioning);
        p.advance();
        assert_eq!(p.state().current_index, 2);
    }

    #[test]
    fn test_retreat_at_first_slide_is_noop() {
        let mut p = in_experience();
        let before = *p.state();
        let calls = p.media().calls.len();
        p.retreat();
        assert_eq!(*p.state(), before);
        assert_eq!(p.media().calls.len(), calls);
    }

    #[test]
    fn test_retreat() {
        let mut p = in_experience();
        p.go_to(3);
        settle(&mut p);
        p.retreat();
        assert_eq!(p.state().current_index, 2);
        assert_eq!(p.state().audio, AudioState::Playing(2));
    }

    #[test]
    fn test_advance_on_last_slide_closes() {
        let mut p = in_experience();
        p.go_to(4);
        settle(&mut p);

        p.advance();
        assert_eq!(p.state().audio, AudioState::Stopped);
        assert_eq!(p.state().current_index, 4);
        assert_eq!(p.media().last(), Some(&Call::Rewind));

        settle(&mut p);
        assert_eq!(p.state().screen, Screen::Closing);
        assert_eq!(p.state().current_index, 4);
        assert_eq!(p.state().audio, AudioState::Stopped);
        assert_eq!(p.media().plays().last().copied(), Some("audio5.mp3"));
    }

    #[test]
    fn test_finish_only_from_experience() {
        let mut p = presentation();
        p.finish();
        settle(&mut p);
        assert_eq!(p.state().screen, Screen::Landing);
    }

    #[test]
    fn test_reset_from_every_screen() {
        let expected = (Screen::Landing, 0, AudioState::Stopped);

        let mut landing = presentation();
        landing.reset();

        let mut experience = in_experience();
        experience.go_to(2);
        experience.reset();

        let mut closing = in_experience();
        closing.go_to(4);
        settle(&mut closing);
        closing.advance();
        settle(&mut closing);
        assert_eq!(closing.state().screen, Screen::Closing);
        closing.reset();

        for p in [landing, experience, closing] {
            let s = p.state();
            assert_eq!((s.screen, s.current_index, s.audio), expected);
            assert!(!s.transitioning);
            assert_eq!(p.view().curtain, Curtain::Hidden);
        }
    }

    #[test]
    fn test_reset_cancels_pending_start() {
        let mut p = presentation();
        p.start();
        run(&mut p, TRANSITION_DURATION / 2.0);
        p.reset();
        settle(&mut p);
        assert_eq!(p.state().screen, Screen::Landing);
        assert!(p.media().plays().is_empty());
    }

    #[test]
    fn test_toggle_audio() {
        let mut p = in_experience();
        assert_eq!(p.state().audio, AudioState::Playing(0));

        p.toggle_audio(0);
        assert_eq!(p.state().audio, AudioState::Stopped);
        assert_eq!(p.media().last(), Some(&Call::Pause));

        p.toggle_audio(0);
        assert_eq!(p.state().audio, AudioState::Playing(0));

        p.toggle_audio(2);
        assert_eq!(p.state().audio, AudioState::Playing(2));
        assert_eq!(p.media().plays().last().copied(), Some("audio3.mp3"));
        assert!(p.view().slides[2].audio_playing);
        assert!(!p.view().slides[0].audio_playing);
    }

    #[test]
    fn test_toggle_audio_outside_experience_is_noop() {
        let mut p = presentation();
        p.toggle_audio(0);
        assert_eq!(p.state().audio, AudioState::Stopped);
        assert!(p.media().calls.is_empty());
    }

    #[test]
    fn test_rejected_playback_stays_stopped() {
        let mut p = Presentation::new(&SLIDES, RecordingPlayer::rejecting()).unwrap();
        p.start();
        settle(&mut p);
        assert_eq!(p.state().screen, Screen::Experience);
        assert_eq!(p.media().plays(), vec!["audio1.mp3"]);
        assert_eq!(p.state().audio, AudioState::Stopped);

        p.toggle_audio(0);
        assert_eq!(p.state().audio, AudioState::Stopped);
        assert_eq!(p.media().plays().len(), 2);
    }

    #[test]
    fn test_track_end_stops_audio() {
        let mut p = in_experience();
        p.media_mut().finished = true;
        p.update(FRAME);
        assert_eq!(p.state().audio, AudioState::Stopped);
        assert!(!p.view().slides[0].audio_playing);
    }

    #[test]
    fn test_at_most_one_track_playing() {
        let mut p = in_experience();
        let steps: [fn(&mut Presentation<RecordingPlayer>); 10] = [
            |p| p.toggle_audio(3),
            |p| p.advance(),
            |p| p.toggle_audio(1),
            |p| p.toggle_audio(1),
            |p| p.toggle_audio(2),
            |p| p.go_to(4),
            |p| p.toggle_audio(0),
            |p| p.retreat(),
            |p| p.go_to(4),
            |p| p.advance(),
        ];
        for step in steps {
            step(&mut p);
            settle(&mut p);
        }
        assert_eq!(p.state().screen, Screen::Closing);

        // Every play after the first must be preceded by a pause since the previous play
        let mut started = false;
        let mut plays = 0;
        for call in &p.media().calls {
            match call {
                Call::Play(track) => {
                    assert!(!started, "{} started while another track was playing", track);
                    started = true;
                    plays += 1;
                }
                Call::Pause => started = false,
                Call::Rewind => {}
            }
        }
        assert!(plays >= 8);
        assert!(!started);
    }

    #[test]
    fn test_dispatch_routes_stimuli() {
        let mut p = presentation();
        p.dispatch(Stimulus::Key(NavKey::Right));
        assert_eq!(p.state().screen, Screen::Landing);

        p.dispatch(Stimulus::Wheel(120.0));
        settle(&mut p);
        assert_eq!(p.state().screen, Screen::Experience);

        p.dispatch(Stimulus::Key(NavKey::Down));
        assert_eq!(p.state().current_index, 1);
        settle(&mut p);

        p.dispatch(Stimulus::Swipe { dx: 10.0, dy: -60.0 });
        assert_eq!(p.state().current_index, 0);
        settle(&mut p);

        p.dispatch(Stimulus::Swipe { dx: 70.0, dy: 20.0 });
        assert_eq!(p.state().current_index, 0);
        assert!(!p.state().transitioning);

        p.dispatch(Stimulus::Activate(Control::Dot(3)));
        assert_eq!(p.state().current_index, 3);

        p.dispatch(Stimulus::Activate(Control::Home));
        assert_eq!(p.state().screen, Screen::Landing);
    }

    #[test]
    fn test_view_tracks_every_mutation() {
        let mut p = in_experience();
        p.go_to(2);
        assert_eq!(p.view().counter, "3 / 5");
        assert!(!p.view().previous_disabled);
        p.reset();
        assert_eq!(p.view().counter, "1 / 5");
        assert!(p.view().previous_disabled);
        assert_eq!(p.view().screen, Screen::Landing);
    }
}

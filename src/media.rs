use std::path::PathBuf;
use raylib::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Why a play request did not start.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackRejection {
    #[error("no audio device available")]
    NoDevice,
    #[error("audio file not found: {0:?}")]
    Missing(PathBuf),
    #[error("could not open {path:?}: {reason}")]
    Unplayable { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackOutcome {
    Started,
    Rejected(PlaybackRejection),
}

/// Playback backend driven by the presentation controller.
///
/// `play` replaces whatever track was loaded before. `track_finished` is only
/// meaningful after a successful `play` that has not been paused since.
pub trait MediaPlayer {
    fn play(&mut self, track: &str) -> PlaybackOutcome;
    fn pause(&mut self);
    fn rewind(&mut self);

    /// Called once per frame to keep streamed audio fed.
    fn update(&mut self) {}

    fn track_finished(&self) -> bool {
        false
    }
}

/// Streams narration tracks from the asset directory through raylib's audio device.
pub struct RaylibMediaPlayer<'aud> {
    audio: Option<&'aud RaylibAudio>,
    root: PathBuf,
    volume: f32,
    current: Option<Music<'aud>>,
}

impl<'aud> RaylibMediaPlayer<'aud> {
    /// `audio` is `None` when the device could not be opened; every play is then rejected.
    pub fn new(audio: Option<&'aud RaylibAudio>, root: PathBuf, volume: f32) -> Self {
        Self {
            audio,
            root,
            volume: volume.clamp(0.0, 1.0),
            current: None,
        }
    }
}

impl MediaPlayer for RaylibMediaPlayer<'_> {
    fn play(&mut self, track: &str) -> PlaybackOutcome {
        // Unloads the previous stream
        self.current = None;

        let Some(audio) = self.audio else {
            return PlaybackOutcome::Rejected(PlaybackRejection::NoDevice);
        };

        let path = self.root.join(track);
        if !path.is_file() {
            return PlaybackOutcome::Rejected(PlaybackRejection::Missing(path));
        }
        let Some(path_str) = path.to_str() else {
            return PlaybackOutcome::Rejected(PlaybackRejection::Unplayable {
                path,
                reason: "path is not valid UTF-8".to_string(),
            });
        };

        match audio.new_music(path_str) {
            Ok(mut music) => {
                // Narration plays once
                music.looping = false;
                music.set_volume(self.volume);
                music.play_stream();
                debug!("Streaming {:?} ({:.1}s)", path, music.get_time_length());
                self.current = Some(music);
                PlaybackOutcome::Started
            }
            Err(e) => PlaybackOutcome::Rejected(PlaybackRejection::Unplayable {
                path,
                reason: e.to_string(),
            }),
        }
    }

    fn pause(&mut self) {
        if let Some(music) = self.current.as_mut() {
            music.pause_stream();
        }
    }

    fn rewind(&mut self) {
        if let Some(music) = self.current.as_mut() {
            music.seek_stream(0.0);
        }
    }

    fn update(&mut self) {
        if let Some(music) = self.current.as_mut() {
            music.update_stream();
        }
    }

    fn track_finished(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|music| !music.is_stream_playing())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_without_device_rejects() {
        let mut player = RaylibMediaPlayer::new(None, PathBuf::from("assets"), 1.0);
        assert_eq!(
            player.play("audio1.mp3"),
            PlaybackOutcome::Rejected(PlaybackRejection::NoDevice)
        );
        assert!(!player.track_finished());
    }

    #[test]
    fn test_volume_is_clamped() {
        let player = RaylibMediaPlayer::new(None, PathBuf::from("assets"), 3.0);
        assert_eq!(player.volume, 1.0);
    }

    #[test]
    fn test_rejection_messages() {
        let missing = PlaybackRejection::Missing(PathBuf::from("assets/audio9.mp3"));
        assert_eq!(missing.to_string(), "audio file not found: \"assets/audio9.mp3\"");
        assert_eq!(PlaybackRejection::NoDevice.to_string(), "no audio device available");
    }
}

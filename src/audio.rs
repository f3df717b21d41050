//! Background music and sound effects
//!
//! The simulation never talks to audio directly. It raises `GameEvent`s and
//! `dispatch` turns them into calls on an `AudioSink`. Playback failures
//! (autoplay restrictions, missing files) are logged and otherwise ignored.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bomb blew up
    Explosion,
}

/// Anything that can play the game's audio
pub trait AudioSink {
    /// Start (or resume) the looping background track
    fn play_looping_track(&mut self);
    /// Stop the background track and rewind it
    fn stop_track(&mut self);
    /// Play a one-shot effect from the start
    fn play_one_shot(&mut self, effect: SoundEffect);
    /// Whether the background track is currently paused
    fn track_paused(&self) -> bool;
}

/// Forward simulation events to the audio sink
pub fn dispatch(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for event in events {
        match event {
            GameEvent::Restarted => sink.play_looping_track(),
            GameEvent::Flap => {
                if sink.track_paused() {
                    sink.play_looping_track();
                }
            }
            GameEvent::Collision => sink.play_one_shot(SoundEffect::Explosion),
            GameEvent::ExplosionFinished => sink.stop_track(),
            GameEvent::SessionStarted | GameEvent::RunStarted | GameEvent::Scored => {}
        }
    }
}

/// Audio sink that plays nothing (native builds, tests)
#[derive(Debug, Default)]
pub struct SilentAudio {
    playing: bool,
}

impl AudioSink for SilentAudio {
    fn play_looping_track(&mut self) {
        self.playing = true;
    }

    fn stop_track(&mut self) {
        self.playing = false;
    }

    fn play_one_shot(&mut self, effect: SoundEffect) {
        log::debug!("(silent) {:?}", effect);
    }

    fn track_paused(&self) -> bool {
        !self.playing
    }
}

/// Effective music volume for the settings
pub fn music_volume(settings: &Settings) -> f64 {
    if settings.muted {
        0.0
    } else {
        settings.music_volume.clamp(0.0, 1.0) as f64
    }
}

/// Effective effects volume for the settings
pub fn sfx_volume(settings: &Settings) -> f64 {
    if settings.muted {
        0.0
    } else {
        settings.sfx_volume.clamp(0.0, 1.0) as f64
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::{AudioSink, SoundEffect, music_volume, sfx_volume};
    use crate::settings::Settings;

    const BACKGROUND_TRACK: &str = "assets/sounds/background.mp3";
    const EXPLOSION_TRACK: &str = "assets/sounds/explosion.mp3";

    /// Browser audio backed by `<audio>` elements
    pub struct WebAudio {
        background: Option<HtmlAudioElement>,
        explosion: Option<HtmlAudioElement>,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            let background = load_track(BACKGROUND_TRACK, music_volume(settings));
            if let Some(track) = &background {
                track.set_loop(true);
            }
            let explosion = load_track(EXPLOSION_TRACK, sfx_volume(settings));
            Self {
                background,
                explosion,
            }
        }

        /// Start loading both tracks (browsers require a user gesture first)
        pub fn preload(&self) {
            for track in [&self.background, &self.explosion].into_iter().flatten() {
                track.load();
            }
        }

        /// Pause or resume the background track without rewinding
        pub fn toggle_track(&mut self) {
            let Some(track) = &self.background else { return };
            if track.paused() {
                play(track);
            } else if let Err(e) = track.pause() {
                log::warn!("Audio pause failed: {:?}", e);
            }
        }
    }

    impl AudioSink for WebAudio {
        fn play_looping_track(&mut self) {
            if let Some(track) = &self.background {
                play(track);
            }
        }

        fn stop_track(&mut self) {
            let Some(track) = &self.background else { return };
            if let Err(e) = track.pause() {
                log::warn!("Audio pause failed: {:?}", e);
            }
            track.set_current_time(0.0);
        }

        fn play_one_shot(&mut self, effect: SoundEffect) {
            let track = match effect {
                SoundEffect::Explosion => &self.explosion,
            };
            if let Some(track) = track {
                track.set_current_time(0.0);
                play(track);
            }
        }

        fn track_paused(&self) -> bool {
            self.background.as_ref().map(|t| t.paused()).unwrap_or(true)
        }
    }

    fn load_track(src: &str, volume: f64) -> Option<HtmlAudioElement> {
        match HtmlAudioElement::new_with_src(src) {
            Ok(track) => {
                track.set_volume(volume);
                Some(track)
            }
            Err(e) => {
                log::warn!("Failed to create audio element for {}: {:?} - audio disabled", src, e);
                None
            }
        }
    }

    /// Start playback, swallowing both sync errors and promise rejections
    fn play(track: &HtmlAudioElement) {
        match track.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("Audio play failed: {:?}", e);
                    }
                });
            }
            Err(e) => log::warn!("Audio play failed: {:?}", e),
        }
    }
}

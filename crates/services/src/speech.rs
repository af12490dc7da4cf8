use std::env;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::SpeechError;

/// Platform text-to-speech seam.
///
/// Implementations hold at most one utterance at a time; `speak` is expected
/// to be preceded by `cancel` so the last call always wins.
pub trait Synthesizer: Send + Sync {
    /// Speak the text aloud.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the platform capability fails.
    fn speak(&self, text: &str, lang: &str, rate: f32) -> Result<(), SpeechError>;

    /// Stop the current utterance, if any.
    fn cancel(&self);
}

/// Fire-and-forget speech for UI callers.
///
/// When no synthesizer is configured every call degrades to a logged no-op;
/// failure never surfaces into view code. Callers check [`enabled`] to render
/// a disabled affordance.
///
/// [`enabled`]: SpeechService::enabled
#[derive(Clone)]
pub struct SpeechService {
    synth: Option<Arc<dyn Synthesizer>>,
}

impl SpeechService {
    #[must_use]
    pub fn new(synth: Option<Arc<dyn Synthesizer>>) -> Self {
        Self { synth }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { synth: None }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.synth.is_some()
    }

    /// Speak `text`, cancelling whatever is currently playing first.
    pub fn speak(&self, text: &str, lang: &str, rate: f32) {
        let Some(synth) = self.synth.as_ref() else {
            debug!("speech synthesis disabled, ignoring utterance");
            return;
        };

        synth.cancel();
        if let Err(err) = synth.speak(text, lang, rate) {
            warn!(%err, "speech synthesis failed");
        }
    }

    /// Stop the current utterance, if any.
    pub fn cancel(&self) {
        if let Some(synth) = self.synth.as_ref() {
            synth.cancel();
        }
    }
}

//
// ─── COMMAND SYNTHESIZER ───────────────────────────────────────────────────────
//

/// Baseline words-per-minute that a speaking rate of 1.0 maps to.
const BASE_WPM: f32 = 175.0;

/// Shells out to a platform TTS binary (`say` on macOS, `espeak` elsewhere).
///
/// Cancellation kills the previous child process, so at most one utterance
/// plays at a time.
pub struct CommandSynthesizer {
    program: String,
    child: Mutex<Option<Child>>,
}

impl CommandSynthesizer {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: Mutex::new(None),
        }
    }

    /// Find a usable TTS binary on `PATH`, if any.
    #[must_use]
    pub fn detect() -> Option<Self> {
        ["say", "espeak", "espeak-ng"]
            .into_iter()
            .find(|program| on_path(program))
            .map(Self::new)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn words_per_minute(rate: f32) -> u32 {
        (BASE_WPM * rate.clamp(0.25, 4.0)).round() as u32
    }
}

fn on_path(program: &str) -> bool {
    let Some(path) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path).any(|dir| Path::new(&dir).join(program).is_file())
}

impl Synthesizer for CommandSynthesizer {
    fn speak(&self, text: &str, lang: &str, rate: f32) -> Result<(), SpeechError> {
        let wpm = Self::words_per_minute(rate);
        let mut command = Command::new(&self.program);
        if self.program == "say" {
            command.arg("-r").arg(wpm.to_string());
        } else {
            let voice = lang.split('-').next().unwrap_or("de");
            command
                .arg("-v")
                .arg(voice)
                .arg("-s")
                .arg(wpm.to_string());
        }
        let child = command
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Ok(mut guard) = self.child.lock() {
            *guard = Some(child);
        }
        Ok(())
    }

    fn cancel(&self) {
        let Ok(mut guard) = self.child.lock() else {
            return;
        };
        if let Some(mut child) = guard.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingSynthesizer {
        calls: StdMutex<Vec<String>>,
        fail: bool,
    }

    impl Synthesizer for RecordingSynthesizer {
        fn speak(&self, text: &str, _lang: &str, _rate: f32) -> Result<(), SpeechError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("speak:{text}"));
            if self.fail {
                return Err(SpeechError::Disabled);
            }
            Ok(())
        }

        fn cancel(&self) {
            self.calls.lock().unwrap().push("cancel".into());
        }
    }

    #[test]
    fn disabled_service_is_a_silent_no_op() {
        let service = SpeechService::disabled();
        assert!(!service.enabled());
        service.speak("Hallo", "de-DE", 1.0);
        service.cancel();
    }

    #[test]
    fn speak_cancels_the_previous_utterance_first() {
        let recorder = Arc::new(RecordingSynthesizer::default());
        let service = SpeechService::new(Some(recorder.clone()));

        service.speak("Hallo", "de-DE", 1.0);
        service.speak("Tschüss", "de-DE", 1.0);

        let calls = recorder.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec!["cancel", "speak:Hallo", "cancel", "speak:Tschüss"]
        );
    }

    #[test]
    fn synthesizer_failure_never_escapes() {
        let recorder = Arc::new(RecordingSynthesizer {
            fail: true,
            ..RecordingSynthesizer::default()
        });
        let service = SpeechService::new(Some(recorder));
        service.speak("Hallo", "de-DE", 1.0);
    }

    #[test]
    fn rate_maps_onto_a_sane_wpm_range() {
        assert_eq!(CommandSynthesizer::words_per_minute(1.0), 175);
        assert_eq!(CommandSynthesizer::words_per_minute(0.0), 44);
        assert!(CommandSynthesizer::words_per_minute(100.0) <= 700);
    }
}

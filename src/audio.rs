use crate::aids::ToneCue;

/// Plays tone cues without blocking the frame loop
pub trait ToneSink {
    fn play(&mut self, cue: ToneCue);
}

/// Drops every cue; used when no output device is available
#[derive(Debug, Default)]
pub struct SilentToneSink;

impl ToneSink for SilentToneSink {
    fn play(&mut self, _cue: ToneCue) {}
}

/// Records cues instead of playing them
#[derive(Debug, Default)]
pub struct RecordingToneSink {
    pub played: Vec<ToneCue>,
}

impl ToneSink for RecordingToneSink {
    fn play(&mut self, cue: ToneCue) {
        self.played.push(cue);
    }
}

#[cfg(feature = "audio")]
mod device {
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::ToneSink;
    use crate::aids::ToneCue;

    const VOLUME: f32 = 0.2;

    pub struct RodioToneSink {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioToneSink {
        pub fn new() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl ToneSink for RodioToneSink {
        fn play(&mut self, cue: ToneCue) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    let source = SineWave::new(cue.frequency_hz)
                        .take_duration(cue.duration)
                        .amplify(VOLUME);
                    sink.append(source);
                    sink.detach();
                }
                Err(err) => tracing::warn!(%err, "could not play tone"),
            }
        }
    }
}

#[cfg(feature = "audio")]
pub use device::RodioToneSink;

/// The best sink this build and machine support
pub fn default_sink() -> Box<dyn ToneSink> {
    #[cfg(feature = "audio")]
    {
        match RodioToneSink::new() {
            Ok(sink) => return Box::new(sink),
            Err(err) => tracing::warn!(%err, "audio device unavailable, tones disabled"),
        }
    }
    #[cfg(not(feature = "audio"))]
    tracing::info!("built without the audio feature, tones disabled");
    Box::new(SilentToneSink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aids::tone_cue;

    #[test]
    fn recording_sink_keeps_cues_in_order() {
        let mut sink = RecordingToneSink::default();
        for frame in [8, 16, 24] {
            if let Some(cue) = tone_cue(frame) {
                sink.play(cue);
            }
        }
        assert_eq!(sink.played.len(), 3);
        assert!(sink.played[0].frequency_hz < sink.played[2].frequency_hz);
    }

    #[test]
    fn silent_sink_accepts_cues() {
        let mut sink = SilentToneSink;
        sink.play(tone_cue(8).unwrap());
    }
}

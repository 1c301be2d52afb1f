//! Browser media plumbing for voice turns.
//!
//! Microphone capture and audio playback run in the webview through
//! `document::eval`; recorded chunks come back to Rust as byte arrays.

use crate::voice::{
    DeviceClass, PlatformCapabilities, PlaybackState, RecordingSession, VoiceError,
};
use dioxus::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

const ALL_MIME_CANDIDATES: &[&str] = &[
    "audio/mp4",
    "audio/aac",
    "audio/m4a",
    "audio/webm",
    "audio/ogg",
    "audio/wav",
];

const DETECT_JS: &str = r#"
const candidates = await dioxus.recv();
const supported = (typeof MediaRecorder !== "undefined" && MediaRecorder.isTypeSupported)
    ? candidates.filter((t) => MediaRecorder.isTypeSupported(t))
    : [];
dioxus.send({
    userAgent: navigator.userAgent || "",
    platform: navigator.platform || "",
    maxTouchPoints: navigator.maxTouchPoints || 0,
    supported,
});
"#;

const RECORDER_JS: &str = r#"
const opts = await dioxus.recv();
let stream;
try {
    stream = await navigator.mediaDevices.getUserMedia({ audio: opts.constraints });
} catch (e) {
    dioxus.send({ type: "error", stage: "microphone", message: `${e.name}: ${e.message}` });
    return;
}
let recorder;
try {
    recorder = new MediaRecorder(stream, {
        mimeType: opts.mimeType,
        audioBitsPerSecond: opts.bitsPerSecond,
    });
} catch (e) {
    stream.getTracks().forEach((t) => t.stop());
    dioxus.send({ type: "error", stage: "recorder", message: `${e.name}: ${e.message}` });
    return;
}
let pending = Promise.resolve();
recorder.ondataavailable = (e) => {
    if (!e.data || e.data.size === 0) return;
    pending = pending.then(async () => {
        const bytes = Array.from(new Uint8Array(await e.data.arrayBuffer()));
        dioxus.send({ type: "chunk", bytes });
    });
};
recorder.onstop = () => {
    stream.getTracks().forEach((t) => t.stop());
    pending.then(() => dioxus.send({ type: "stopped" }));
};
recorder.start(1000);
dioxus.send({ type: "started", mimeType: recorder.mimeType || opts.mimeType });
await dioxus.recv();
if (recorder.state !== "inactive") recorder.stop();
"#;

const PLAY_JS: &str = r#"
const bytes = await dioxus.recv();
const blob = new Blob([new Uint8Array(bytes)], { type: "audio/mpeg" });
const url = URL.createObjectURL(blob);
const audio = window.__republicaAudio || (window.__republicaAudio = new Audio());
// the previous player only hears about its own source, so end it explicitly
if (window.__republicaRelease) window.__republicaRelease();
let done = false;
const finish = () => {
    if (done) return;
    done = true;
    audio.removeEventListener("ended", finish);
    audio.removeEventListener("error", finish);
    if (window.__republicaRelease === finish) window.__republicaRelease = null;
    dioxus.send({ type: "ended", url });
};
audio.pause();
audio.src = url;
window.__republicaRelease = finish;
dioxus.send({ type: "loaded", url });
audio.addEventListener("ended", finish);
audio.addEventListener("error", finish);
try {
    await audio.play();
} catch (e) {
    finish();
}
"#;

const STOP_AUDIO_JS: &str = r#"
const audio = window.__republicaAudio;
if (audio) {
    audio.pause();
    audio.currentTime = 0;
    audio.dispatchEvent(new Event("ended"));
}
"#;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectResult {
    user_agent: String,
    platform: String,
    max_touch_points: u32,
    supported: Vec<String>,
}

/// Ask the webview what kind of device it runs on.
pub async fn detect_platform() -> PlatformCapabilities {
    let mut eval = document::eval(DETECT_JS);
    if let Err(err) = eval.send(ALL_MIME_CANDIDATES) {
        warn!(error = ?err, "platform detection failed");
        return PlatformCapabilities::new(DeviceClass::Standard, Vec::new());
    }

    match eval.recv::<DetectResult>().await {
        Ok(detected) => {
            let device = PlatformCapabilities::detect_device(
                &detected.user_agent,
                &detected.platform,
                detected.max_touch_points,
            );
            debug!(?device, supported = ?detected.supported, "platform detected");
            PlatformCapabilities::new(device, detected.supported)
        }
        Err(err) => {
            warn!(error = ?err, "platform detection failed");
            PlatformCapabilities::new(DeviceClass::Standard, Vec::new())
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RecorderEvent {
    Started {
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Chunk {
        bytes: Vec<u8>,
    },
    Stopped,
    Error {
        stage: String,
        message: String,
    },
}

/// A live microphone recording inside the webview.
pub struct Recorder {
    eval: document::Eval,
    session: RecordingSession,
}

/// Sends the stop request to a running recorder.
#[derive(Clone, Copy)]
pub struct RecorderStop(document::Eval);

impl RecorderStop {
    pub fn stop(&self) {
        if let Err(err) = self.0.send("stop") {
            warn!(error = ?err, "failed to stop recorder");
        }
    }
}

impl Recorder {
    /// Open the microphone and start recording. Resolves once the browser
    /// recorder is running.
    pub async fn start(caps: &PlatformCapabilities) -> Result<Self, VoiceError> {
        let mut eval = document::eval(RECORDER_JS);
        let mime_type = caps.negotiate_mime_type();
        eval.send(json!({
            "constraints": caps.capture_constraints(),
            "mimeType": mime_type,
            "bitsPerSecond": caps.audio_bits_per_second(),
        }))
        .map_err(|err| VoiceError::RecorderUnsupported(format!("{err:?}")))?;

        match eval.recv::<RecorderEvent>().await {
            Ok(RecorderEvent::Started { mime_type }) => {
                debug!(%mime_type, "recorder started");
                Ok(Self {
                    eval,
                    session: RecordingSession::new(mime_type),
                })
            }
            Ok(RecorderEvent::Error { stage, message }) if stage == "microphone" => {
                Err(VoiceError::MicrophoneDenied(message))
            }
            Ok(RecorderEvent::Error { message, .. }) => Err(VoiceError::RecorderUnsupported(message)),
            Ok(_) => Err(VoiceError::RecorderUnsupported("unexpected recorder event".into())),
            Err(err) => Err(VoiceError::RecorderUnsupported(format!("{err:?}"))),
        }
    }

    pub fn stopper(&self) -> RecorderStop {
        RecorderStop(self.eval)
    }

    /// Collect chunks until the recorder reports it has stopped.
    pub async fn collect(mut self) -> RecordingSession {
        loop {
            match self.eval.recv::<RecorderEvent>().await {
                Ok(RecorderEvent::Chunk { bytes }) => self.session.push_chunk(bytes),
                Ok(RecorderEvent::Stopped) => break,
                Ok(_) => {}
                Err(err) => {
                    warn!(error = ?err, "recorder channel closed");
                    break;
                }
            }
        }
        self.session
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PlaybackEvent {
    Loaded { url: String },
    Ended { url: String },
}

fn revoke(url: &str) {
    let _ = document::eval(&format!("URL.revokeObjectURL({});", json!(url)));
}

/// Play synthesized speech through the shared audio element, revoking every
/// object URL once the element lets go of it.
pub async fn play_speech(audio: Vec<u8>, mut state: Signal<PlaybackState>) {
    let mut eval = document::eval(PLAY_JS);
    if let Err(err) = eval.send(audio) {
        warn!(error = ?err, "failed to hand audio to the player");
        return;
    }

    loop {
        match eval.recv::<PlaybackEvent>().await {
            Ok(PlaybackEvent::Loaded { url }) => {
                if let Some(previous) = state.write().load(url) {
                    revoke(&previous);
                }
            }
            Ok(PlaybackEvent::Ended { url }) => {
                if let Some(stale) = state.write().ended(&url) {
                    revoke(&stale);
                }
                break;
            }
            Err(err) => {
                debug!(error = ?err, "playback channel closed");
                break;
            }
        }
    }
}

pub fn stop_speech(mut state: Signal<PlaybackState>) {
    let _ = document::eval(STOP_AUDIO_JS);
    if let Some(url) = state.write().stop() {
        revoke(&url);
    }
}

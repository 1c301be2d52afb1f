use super::VoiceError;
use super::platform::AudioContainer;
use tracing::{debug, warn};

/// Recordings smaller than this almost never contain speech.
pub const MIN_RECORDING_BYTES: usize = 1000;

/// Encoded chunks collected while the microphone is open.
#[derive(Debug)]
pub struct RecordingSession {
    mime_type: String,
    chunks: Vec<Vec<u8>>,
}

impl RecordingSession {
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            chunks: Vec::new(),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        debug!(bytes = chunk.len(), "audio chunk received");
        self.chunks.push(chunk);
    }

    pub fn buffered_bytes(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// Concatenate the chunks into one clip ready for upload.
    pub fn finish(self) -> Result<AudioClip, VoiceError> {
        if self.chunks.is_empty() {
            warn!("no audio data collected");
            return Err(VoiceError::NoAudioCaptured);
        }

        let bytes = self.chunks.concat();
        if bytes.len() < MIN_RECORDING_BYTES {
            warn!(bytes = bytes.len(), "recording too small to contain speech");
            return Err(VoiceError::RecordingTooShort { bytes: bytes.len() });
        }

        Ok(AudioClip {
            container: AudioContainer::from_mime(&self.mime_type),
            bytes,
        })
    }
}

/// A finished recording. Only `RecordingSession::finish` builds one, so every
/// clip has passed the size check.
#[derive(Clone, Debug)]
pub struct AudioClip {
    container: AudioContainer,
    bytes: Vec<u8>,
}

impl AudioClip {
    pub fn container(&self) -> AudioContainer {
        self.container
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// State of the single shared audio element used for spoken replies.
///
/// The element holds one object URL at a time. Each transition hands back the
/// URL the caller must revoke.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    source: Option<String>,
    playing: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Point the element at `url` and start playing. Returns the replaced source.
    pub fn load(&mut self, url: impl Into<String>) -> Option<String> {
        self.playing = true;
        self.source.replace(url.into())
    }

    /// The element fired `ended` for `url`. A stale event for an already
    /// replaced source only hands that URL back for revocation.
    pub fn ended(&mut self, url: &str) -> Option<String> {
        if self.source.as_deref() == Some(url) {
            self.playing = false;
            self.source.take()
        } else {
            Some(url.to_string())
        }
    }

    /// Explicit stop from the user.
    pub fn stop(&mut self) -> Option<String> {
        self.playing = false;
        self.source.take()
    }
}

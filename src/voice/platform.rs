//! Capabilities of the device doing the recording.
//!
//! Built once from browser facts and passed down, so recording code never
//! sniffs the user agent itself.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Ios,
    Standard,
}

const IOS_MIME_CANDIDATES: &[&str] = &["audio/mp4", "audio/aac", "audio/m4a"];
const STANDARD_MIME_CANDIDATES: &[&str] = &["audio/webm", "audio/ogg", "audio/wav"];
pub const DEFAULT_MIME_TYPE: &str = "audio/webm";

/// `getUserMedia` audio constraints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureConstraints {
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
    pub auto_gain_control: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformCapabilities {
    pub device: DeviceClass,
    /// MIME types the platform's recorder accepts.
    pub supported_mime_types: Vec<String>,
}

impl PlatformCapabilities {
    pub fn new(device: DeviceClass, supported_mime_types: Vec<String>) -> Self {
        Self {
            device,
            supported_mime_types,
        }
    }

    /// iPad, iPhone and iPod user agents, plus iPads in desktop mode which
    /// report `MacIntel` with a touch screen.
    pub fn detect_device(user_agent: &str, platform: &str, max_touch_points: u32) -> DeviceClass {
        let ua = user_agent.to_lowercase();
        let ios_agent = ["ipad", "iphone", "ipod"].iter().any(|d| ua.contains(d));
        if ios_agent || (platform == "MacIntel" && max_touch_points > 1) {
            DeviceClass::Ios
        } else {
            DeviceClass::Standard
        }
    }

    pub fn is_ios(&self) -> bool {
        self.device == DeviceClass::Ios
    }

    pub fn capture_constraints(&self) -> CaptureConstraints {
        // iOS records more reliably with every processing stage off.
        let processing = !self.is_ios();
        CaptureConstraints {
            echo_cancellation: processing,
            noise_suppression: processing,
            auto_gain_control: processing,
        }
    }

    pub fn audio_bits_per_second(&self) -> u32 {
        if self.is_ios() { 64_000 } else { 128_000 }
    }

    pub fn mime_candidates(&self) -> &'static [&'static str] {
        match self.device {
            DeviceClass::Ios => IOS_MIME_CANDIDATES,
            DeviceClass::Standard => STANDARD_MIME_CANDIDATES,
        }
    }

    /// First candidate the recorder supports, in preference order.
    pub fn negotiate_mime_type(&self) -> &'static str {
        self.mime_candidates()
            .iter()
            .find(|candidate| {
                self.supported_mime_types
                    .iter()
                    .any(|supported| supported == *candidate)
            })
            .copied()
            .unwrap_or(DEFAULT_MIME_TYPE)
    }
}

/// Container of a finished recording as uploaded for transcription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioContainer {
    pub mime_type: &'static str,
    pub extension: &'static str,
}

impl AudioContainer {
    pub fn from_mime(mime_type: &str) -> Self {
        let base = mime_type.split(';').next().unwrap_or_default().trim();
        match base {
            "audio/mp4" | "audio/aac" | "audio/m4a" | "audio/x-m4a" => Self {
                mime_type: "audio/mp4",
                extension: "m4a",
            },
            "audio/ogg" => Self {
                mime_type: "audio/ogg",
                extension: "ogg",
            },
            "audio/wav" | "audio/wave" => Self {
                mime_type: "audio/wav",
                extension: "wav",
            },
            _ => Self {
                mime_type: "audio/webm",
                extension: "webm",
            },
        }
    }

    pub fn file_name(&self) -> String {
        format!("recording.{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(device: DeviceClass, supported: &[&str]) -> PlatformCapabilities {
        PlatformCapabilities::new(device, supported.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn detects_ios_devices() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        assert_eq!(PlatformCapabilities::detect_device(iphone, "iPhone", 5), DeviceClass::Ios);
        assert_eq!(
            PlatformCapabilities::detect_device("Mozilla/5.0 (Macintosh)", "MacIntel", 5),
            DeviceClass::Ios
        );
        assert_eq!(
            PlatformCapabilities::detect_device("Mozilla/5.0 (Macintosh)", "MacIntel", 0),
            DeviceClass::Standard
        );
        assert_eq!(
            PlatformCapabilities::detect_device("Mozilla/5.0 (X11; Linux x86_64)", "Linux x86_64", 0),
            DeviceClass::Standard
        );
    }

    #[test]
    fn constraints_and_bitrate_follow_device() {
        let ios = caps(DeviceClass::Ios, &[]);
        assert!(!ios.capture_constraints().echo_cancellation);
        assert_eq!(ios.audio_bits_per_second(), 64_000);

        let desktop = caps(DeviceClass::Standard, &[]);
        assert!(desktop.capture_constraints().auto_gain_control);
        assert_eq!(desktop.audio_bits_per_second(), 128_000);
    }

    #[test]
    fn negotiates_first_supported_candidate() {
        assert_eq!(caps(DeviceClass::Ios, &["audio/aac", "audio/mp4"]).negotiate_mime_type(), "audio/mp4");
        assert_eq!(caps(DeviceClass::Ios, &["audio/m4a"]).negotiate_mime_type(), "audio/m4a");
        assert_eq!(caps(DeviceClass::Standard, &["audio/ogg", "audio/wav"]).negotiate_mime_type(), "audio/ogg");
        assert_eq!(caps(DeviceClass::Standard, &[]).negotiate_mime_type(), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn container_matches_recorded_mime() {
        assert_eq!(AudioContainer::from_mime("audio/aac").file_name(), "recording.m4a");
        assert_eq!(AudioContainer::from_mime("audio/webm;codecs=opus").extension, "webm");
        assert_eq!(AudioContainer::from_mime("audio/ogg").mime_type, "audio/ogg");
        assert_eq!(AudioContainer::from_mime("").extension, "webm");
    }

    #[test]
    fn constraints_serialize_for_get_user_media() {
        let json = serde_json::to_value(caps(DeviceClass::Standard, &[]).capture_constraints()).unwrap();
        assert_eq!(json["echoCancellation"], true);
        assert_eq!(json["autoGainControl"], true);
    }
}

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Processing state reported by the video server.
///
/// Tokens the client does not know about are kept verbatim in `Other` so a
/// newer server never breaks listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum VideoStatus {
    Pending,
    Uploading,
    Processing,
    Ready,
    Done,
    Failed,
    Error,
    Other(String),
}

impl VideoStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VideoStatus::Ready | VideoStatus::Done | VideoStatus::Failed | VideoStatus::Error
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, VideoStatus::Failed | VideoStatus::Error)
    }
}

impl Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let video_status = match self {
            VideoStatus::Pending => "pending",
            VideoStatus::Uploading => "uploading",
            VideoStatus::Processing => "processing",
            VideoStatus::Ready => "ready",
            VideoStatus::Done => "done",
            VideoStatus::Failed => "failed",
            VideoStatus::Error => "error",
            VideoStatus::Other(raw) => raw,
        };
        write!(f, "{}", video_status)
    }
}

impl FromStr for VideoStatus {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "pending" => VideoStatus::Pending,
            "uploading" => VideoStatus::Uploading,
            "processing" => VideoStatus::Processing,
            "ready" => VideoStatus::Ready,
            "done" => VideoStatus::Done,
            "failed" => VideoStatus::Failed,
            "error" => VideoStatus::Error,
            other => VideoStatus::Other(other.to_string()),
        })
    }
}

impl From<String> for VideoStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<VideoStatus> for String {
    fn from(value: VideoStatus) -> Self {
        value.to_string()
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{bitrate::BitrateInput, enums::video_statuses::VideoStatus};

/// Video metadata as served by `GET /videos` and `GET /videos/{id}/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoEntity {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    pub status: VideoStatus,
    #[serde(default)]
    pub bitrate: BitrateInput,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub log: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the `202 Accepted` answer to an upload: the freshly created video.
pub type UploadAck = VideoEntity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingLog {
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_finished_video() {
        let video: VideoEntity = serde_json::from_str(
            r#"{
                "id": "3f1c",
                "title": "Holiday",
                "created": "2024-03-15T10:00:00.000001",
                "status": "done",
                "log": "processing.log",
                "thumbnail": "thumbnail.jpg",
                "bitrate": "2500k"
            }"#,
        )
        .unwrap();

        assert_eq!(video.id, "3f1c");
        assert_eq!(video.status, VideoStatus::Done);
        assert_eq!(video.bitrate, BitrateInput::Text("2500k".to_string()));
        assert_eq!(video.thumbnail.as_deref(), Some("thumbnail.jpg"));
        assert!(video.error.is_none());
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let video: VideoEntity =
            serde_json::from_str(r#"{"id": "a", "status": "pending"}"#).unwrap();
        assert_eq!(video.bitrate, BitrateInput::Missing);
        assert!(video.title.is_none());
        assert!(video.created.is_none());
    }

    #[test]
    fn missing_status_is_a_decode_error() {
        let result = serde_json::from_str::<VideoEntity>(r#"{"id": "a"}"#);
        assert!(result.is_err());
    }
}

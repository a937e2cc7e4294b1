use async_trait::async_trait;

use crate::domain::entities::videos::{ProcessingLog, UploadAck, VideoEntity};
use crate::domain::value_objects::{
    gateway_errors::GatewayError,
    uploads::{ProgressCallback, UploadPayload},
};

/// Every call the client makes against the video server.
///
/// Fetches surface failures unchanged; the URL builders never touch the
/// network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoGateway: Send + Sync {
    async fn list_videos(&self) -> Result<Vec<VideoEntity>, GatewayError>;

    async fn get_video_info(&self, video_id: &str) -> Result<VideoEntity, GatewayError>;

    async fn upload_video(
        &self,
        payload: UploadPayload,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadAck, GatewayError>;

    async fn get_processing_log(&self, video_id: &str) -> Result<ProcessingLog, GatewayError>;

    fn manifest_url(&self, video_id: &str) -> String;

    fn thumbnail_url(&self, video_id: &str) -> String;
}

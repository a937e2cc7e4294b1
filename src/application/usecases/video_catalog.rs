use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::application::formatters::{INVALID_DATE, capitalize_status, format_bitrate, format_date};
use crate::domain::{
    entities::videos::VideoEntity,
    repositories::video_gateway::VideoGateway,
    value_objects::{
        gateway_errors::GatewayError,
        uploads::{ProgressCallback, UploadPayload},
    },
};

pub const UNTITLED: &str = "Untitled";

/// A video ready to render: labels normalized, playback URLs resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCard {
    pub id: String,
    pub title: String,
    pub status_label: String,
    pub created_label: String,
    pub bitrate_label: String,
    pub manifest_url: String,
    pub thumbnail_url: String,
    pub playable: bool,
    pub failure: Option<String>,
}

pub struct VideoCatalogUseCase<G>
where
    G: VideoGateway + 'static,
{
    gateway: Arc<G>,
}

impl<G> VideoCatalogUseCase<G>
where
    G: VideoGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn list_cards(&self) -> Result<Vec<VideoCard>, GatewayError> {
        let videos = self.gateway.list_videos().await?;
        debug!(count = videos.len(), "video_catalog: building cards");
        Ok(videos.iter().map(|video| self.to_card(video)).collect())
    }

    pub async fn card(&self, video_id: &str) -> Result<VideoCard, GatewayError> {
        let video = self.gateway.get_video_info(video_id).await?;
        Ok(self.to_card(&video))
    }

    pub async fn upload(
        &self,
        payload: UploadPayload,
        on_progress: Option<ProgressCallback>,
    ) -> Result<VideoCard, GatewayError> {
        let ack = self.gateway.upload_video(payload, on_progress).await?;
        info!(video_id = %ack.id, "video_catalog: upload acknowledged");
        Ok(self.to_card(&ack))
    }

    pub async fn processing_log(&self, video_id: &str) -> Result<String, GatewayError> {
        Ok(self.gateway.get_processing_log(video_id).await?.log)
    }

    fn to_card(&self, video: &VideoEntity) -> VideoCard {
        VideoCard {
            id: video.id.clone(),
            title: video
                .title
                .clone()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            status_label: capitalize_status(&video.status.to_string()),
            created_label: video
                .created
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| INVALID_DATE.to_string()),
            bitrate_label: format_bitrate(video.bitrate.clone()),
            manifest_url: self.gateway.manifest_url(&video.id),
            thumbnail_url: self.gateway.thumbnail_url(&video.id),
            playable: video.status.is_terminal() && !video.status.is_failure(),
            failure: video.error.clone(),
        }
    }
}

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicI16, Ordering};
use tracing::{debug, error, info};

use super::http_transport::{HttpTransport, ReqwestTransport, TransportResponse};
use crate::config::config_model::GatewayConfig;
use crate::domain::{
    entities::videos::{ProcessingLog, UploadAck, VideoEntity},
    repositories::video_gateway::VideoGateway,
    value_objects::{
        gateway_errors::GatewayError,
        uploads::{ByteProgressFn, ProgressCallback, UploadPayload},
    },
};

/// Talks to the video server over any [`HttpTransport`].
///
/// Holds nothing but the base URL and the transport, so one instance can be
/// shared across tasks.
pub struct VideoApiGateway<T>
where
    T: HttpTransport,
{
    transport: T,
    base_url: String,
}

impl VideoApiGateway<ReqwestTransport> {
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Ok(Self::new(config, ReqwestTransport::new(config)?))
    }
}

impl<T> VideoApiGateway<T>
where
    T: HttpTransport,
{
    pub fn new(config: &GatewayConfig, transport: T) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch<D: DeserializeOwned>(&self, path: &str) -> Result<D, GatewayError> {
        let url = self.endpoint(path);
        let response = self.transport.get(&url).await.map_err(|err| {
            error!(%url, error = %err, "gateway: request failed");
            GatewayError::from(err)
        })?;

        decode(path, &response)
    }
}

#[async_trait]
impl<T> VideoGateway for VideoApiGateway<T>
where
    T: HttpTransport,
{
    async fn list_videos(&self) -> Result<Vec<VideoEntity>, GatewayError> {
        let videos: Vec<VideoEntity> = self.fetch("/videos").await?;
        debug!(count = videos.len(), "gateway: listed videos");
        Ok(videos)
    }

    async fn get_video_info(&self, video_id: &str) -> Result<VideoEntity, GatewayError> {
        self.fetch(&format!("/videos/{}/info", video_id)).await
    }

    async fn upload_video(
        &self,
        payload: UploadPayload,
        on_progress: Option<ProgressCallback>,
    ) -> Result<UploadAck, GatewayError> {
        let url = self.endpoint("/videos");
        info!(
            file_name = %payload.file_name,
            size_bytes = payload.len(),
            "gateway: uploading video"
        );

        let response = self
            .transport
            .post_multipart(&url, payload, progress_forwarder(on_progress))
            .await
            .map_err(|err| {
                error!(%url, error = %err, "gateway: upload failed");
                GatewayError::from(err)
            })?;

        let ack: UploadAck = decode("/videos", &response)?;
        info!(video_id = %ack.id, status = %ack.status, "gateway: upload accepted");
        Ok(ack)
    }

    async fn get_processing_log(&self, video_id: &str) -> Result<ProcessingLog, GatewayError> {
        self.fetch(&format!("/videos/{}/log", video_id)).await
    }

    fn manifest_url(&self, video_id: &str) -> String {
        self.endpoint(&format!("/videos/{}/video.mpd", video_id))
    }

    fn thumbnail_url(&self, video_id: &str) -> String {
        self.endpoint(&format!("/videos/{}/thumbnail.jpg", video_id))
    }
}

fn decode<D: DeserializeOwned>(
    endpoint: &str,
    response: &TransportResponse,
) -> Result<D, GatewayError> {
    serde_json::from_slice(&response.body).map_err(|err| {
        error!(endpoint, error = %err, "gateway: response did not match the video model");
        GatewayError::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    })
}

/// Whole percentage for a byte counter pair, `None` when the total is unknown.
///
/// Rounded to the nearest percent, held at 99 until the last byte is out.
pub fn upload_percent(loaded: u64, total: Option<u64>) -> Option<u8> {
    let total = total.filter(|total| *total > 0)?;
    if loaded >= total {
        return Some(100);
    }

    let percent = (loaded as f64 * 100.0 / total as f64).round() as u8;
    Some(percent.min(99))
}

/// Turns transport byte counters into percentages for the caller. Ticks that
/// would move backwards are dropped.
fn progress_forwarder(on_progress: Option<ProgressCallback>) -> ByteProgressFn {
    let last = AtomicI16::new(-1);

    Box::new(move |loaded, total| {
        let Some(callback) = on_progress.as_ref() else {
            return;
        };
        let Some(percent) = upload_percent(loaded, total) else {
            return;
        };

        let previous = last.fetch_max(i16::from(percent), Ordering::SeqCst);
        if i16::from(percent) < previous {
            return;
        }

        callback(percent);
    })
}

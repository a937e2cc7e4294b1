pub mod http_transport;
pub mod video_api_gateway;

pub mod video_gateway;

pub mod video_catalog;

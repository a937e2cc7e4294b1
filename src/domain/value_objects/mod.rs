pub mod bitrate;
pub mod enums;
pub mod gateway_errors;
pub mod uploads;

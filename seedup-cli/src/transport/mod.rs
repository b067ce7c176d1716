//! Cloud upload transports.

pub mod drive;

pub use drive::DriveUploader;

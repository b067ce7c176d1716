//! Collaborator seams: the torrent engine, the session store, the cloud
//! uploader and the mount provider.

pub mod downloader;
pub mod session;
pub mod uploader;
pub mod mount;

//! Torrent engine adapters.

pub mod rqbit;

pub use rqbit::RqbitDownloader;

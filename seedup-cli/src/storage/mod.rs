//! Local persistence for the paused download session.

pub mod session_file;

pub use session_file::SessionFile;

/// Process exit code for a successful command.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code for any validation, collaborator or handler failure.
pub const EXIT_FAILURE: i32 = 1;

/// Process exit code when the user interrupts the run (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Default directory torrents are downloaded into.
pub const DEFAULT_DOWNLOAD_DIR: &str = "/content/downloads";

/// Default directory holding the paused-session record.
pub const DEFAULT_STATE_DIR: &str = ".seedup";

/// File name of the paused-session record inside the state directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Where Google Drive is mounted inside a Colab runtime.
pub const DEFAULT_DRIVE_ROOT: &str = "/content/drive";

/// Sub-directory that only exists once the Drive mount is live.
pub const DRIVE_MOUNT_MARKER: &str = "MyDrive";

/// MIME type Drive uses for folders.
pub const DRIVE_FOLDER_MIME: &str = "application/vnd.google-apps.folder";

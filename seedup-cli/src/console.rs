//! User-facing console output: banners and one-line verdicts.

use std::io::Write;
use std::sync::Mutex;

const BANNER_WIDTH: usize = 60;

pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Print one line. Console failures are not worth failing a command over.
    pub fn line(&self, text: impl AsRef<str>) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text.as_ref());
            let _ = out.flush();
        }
    }

    /// Print a title framed by `=` rules.
    pub fn banner(&self, title: &str) {
        let rule = "=".repeat(BANNER_WIDTH);
        self.line(&rule);
        self.line(title);
        self.line(&rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::Captured;

    #[test]
    fn test_banner_layout() {
        let captured = Captured::default();
        let console = Console::new(Box::new(captured.clone()));
        console.banner("TORRENT DOWNLOADER");

        let out = captured.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 60);
        assert_eq!(lines[1], "TORRENT DOWNLOADER");
        assert_eq!(lines[0], lines[2]);
    }
}

//! Job sink writing search results to stdout.

use groupkit::{CancelCheck, CancellationToken, ErrorKind, InfoKind, JobSink};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error};

#[derive(Serialize)]
struct PackageLine<'a> {
    info: InfoKind,
    package_id: &'a str,
    summary: &'a str,
}

/// Prints each reported package as a tab-separated or JSON line.
pub struct StdoutSink {
    json: bool,
    cancel: CancellationToken,
    reported: AtomicUsize,
}

impl StdoutSink {
    pub fn new(json: bool, cancel: CancellationToken) -> Self {
        Self {
            json,
            cancel,
            reported: AtomicUsize::new(0),
        }
    }

    pub fn reported(&self) -> usize {
        self.reported.load(Ordering::SeqCst)
    }

    fn format_line(&self, info: InfoKind, package_id: &str, summary: &str) -> String {
        if self.json {
            let line = PackageLine {
                info,
                package_id,
                summary,
            };
            // Serializing plain strings and a unit enum cannot fail.
            serde_json::to_string(&line).unwrap_or_default()
        } else {
            format!("{}\t{}\t{}", info, package_id, summary)
        }
    }
}

impl CancelCheck for StdoutSink {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl JobSink for StdoutSink {
    fn report_package(&self, info: InfoKind, package_id: &str, summary: &str) {
        println!("{}", self.format_line(info, package_id, summary));
        self.reported.fetch_add(1, Ordering::SeqCst);
    }

    fn report_error(&self, kind: ErrorKind, message: &str) {
        error!("{}: {}", kind, message);
    }

    fn report_finished(&self) {
        debug!("Search finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_separated_line() {
        let sink = StdoutSink::new(false, CancellationToken::new());
        assert_eq!(
            sink.format_line(InfoKind::Installed, "bash;5.2-1;x86_64;@System", "Shell"),
            "installed\tbash;5.2-1;x86_64;@System\tShell"
        );
    }

    #[test]
    fn test_json_line() {
        let sink = StdoutSink::new(true, CancellationToken::new());
        let line = sink.format_line(InfoKind::Available, "mutt;2.2-1;x86_64;fedora", "Mail");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["info"], "available");
        assert_eq!(value["package_id"], "mutt;2.2-1;x86_64;fedora");
    }

    #[test]
    fn test_cancellation_follows_token() {
        let token = CancellationToken::new();
        let sink = StdoutSink::new(false, token.clone());
        token.cancel();
        assert!(sink.is_cancelled());
    }
}

use tracing::info;

/// Receives human-readable milestones while a pipeline runs.
///
/// Advisory only. Nothing downstream parses these strings.
pub trait ProgressSink: Send {
    fn report(&mut self, message: &str);
}

/// Logs each milestone and keeps it for the response `logs` array.
#[derive(Debug, Default)]
pub struct ProgressLog {
    messages: Vec<String>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl ProgressSink for ProgressLog {
    fn report(&mut self, message: &str) {
        info!("{}", message);
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_log_keeps_order() {
        let mut log = ProgressLog::new();
        log.report("Searching...");
        log.report("+12 from Remotive");
        assert_eq!(log.messages(), ["Searching...", "+12 from Remotive"]);
        assert_eq!(log.into_messages().len(), 2);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseParts {
    pub status: u16,
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponseParts {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// `"<code> <reason>"`, or just the code when no reason phrase is known.
    pub fn status_line(&self) -> String {
        match self.reason.as_deref() {
            Some(reason) if !reason.is_empty() => format!("{} {}", self.status, reason),
            _ => self.status.to_string(),
        }
    }

    pub fn is_canonical_success(&self) -> bool {
        self.status == 200
    }
}

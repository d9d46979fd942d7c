/// Outcome of a single scenario invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub ok: bool,
    pub status_code: Option<String>,
    pub payload: Option<String>,
    pub size_bytes: u64,
}

impl Response {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fail() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status_code(mut self, code: impl Into<String>) -> Self {
        self.status_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    #[must_use]
    pub fn with_size_bytes(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }
}

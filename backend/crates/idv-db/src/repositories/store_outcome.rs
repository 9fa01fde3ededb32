/// Result of an identity upsert. Storage never raises; failures are reported here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOutcome {
    pub stored: bool,
    pub message: String,
    /// Row id of the inserted or updated identity
    pub record_id: Option<i64>,
}

impl StoreOutcome {
    pub fn stored(record_id: i64, message: impl Into<String>) -> Self {
        Self {
            stored: true,
            message: message.into(),
            record_id: Some(record_id),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stored: false,
            message: message.into(),
            record_id: None,
        }
    }
}

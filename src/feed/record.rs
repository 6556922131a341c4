use serde::{Deserialize, Serialize};

/// One entry of the feed. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Record {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Stable display key for a record.
pub fn key_of(record: &Record) -> &str {
    &record.id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_record_id() {
        let record = Record::new("item-7", "User 7", "LastMessage.");
        assert_eq!(key_of(&record), "item-7");
    }
}

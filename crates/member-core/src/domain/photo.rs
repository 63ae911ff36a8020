//! Photo domain entity

use serde::{Deserialize, Serialize};

/// A hosted photo owned by one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Zero until the photo has been persisted.
    pub id: i32,
    pub url: String,
    pub is_main: bool,
    /// Identifier on the media host. Seeded photos may not have one.
    pub public_id: Option<String>,
}

impl Photo {
    pub fn new(url: String, public_id: Option<String>) -> Self {
        Self {
            id: 0,
            url,
            is_main: false,
            public_id,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

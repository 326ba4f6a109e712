use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person's stored details.
///
/// `id` is chosen by the caller (normally from `Database::next_id`) and
/// `date_added` is fixed at creation; everything else may be rewritten by
/// an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_added: DateTime<Utc>,
    pub phone_personal: String,
    pub phone_work: Option<String>,
    pub phone_home: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Contact {
    pub fn new(id: i64, first_name: impl Into<String>, phone_personal: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            date_added: Utc::now(),
            phone_personal: phone_personal.into(),
            phone_work: None,
            phone_home: None,
            email: None,
            address: None,
        }
    }

    /// "First Last", or just the first name when there is no last name.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }

    /// All phone numbers this contact holds, personal first.
    pub fn phones(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.phone_personal.as_str())
            .chain(self.phone_work.as_deref())
            .chain(self.phone_home.as_deref())
    }
}

use serde::{Deserialize, Serialize};

/// A salon client with their messenger handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub telegram: Option<String>,
    pub viber: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub notes: Option<String>,
}

impl Client {
    pub fn new(name: &str) -> Self {
        Client {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    /// Non-empty contact fields in display order: phone, telegram, viber,
    /// whatsapp, instagram.
    pub fn contacts(&self) -> Vec<&str> {
        [&self.phone, &self.telegram, &self.viber, &self.whatsapp, &self.instagram]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .collect()
    }
}

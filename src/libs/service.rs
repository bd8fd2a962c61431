use serde::{Deserialize, Serialize};

/// A salon service with its list price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Option<i64>,
    pub name: String,
    /// Price in minor units (cents, kopecks).
    pub cost: Option<i64>,
    pub currency_code: Option<String>,
    pub default_duration_minutes: Option<i32>,
}

impl Service {
    pub fn new(name: &str, cost: Option<i64>, currency_code: Option<&str>, default_duration_minutes: Option<i32>) -> Self {
        Service {
            id: None,
            name: name.to_string(),
            cost,
            currency_code: currency_code.map(str::to_string),
            default_duration_minutes,
        }
    }
}

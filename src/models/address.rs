use serde::{Deserialize, Serialize};

/// Postal address a products query is scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub house_number: String,
    pub city: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2, e.g. `DE`.
    pub country_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        house_number: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            house_number: house_number.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country_code: country_code.into(),
        }
    }
}

use serde::Deserialize;

/// An organization as listed by `members/me/organizations`. Only the fields
/// needed for name resolution are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationRef {
    pub id: String,
    pub name: String,
}

impl OrganizationRef {
    pub fn matches(&self, selector: &str) -> bool {
        self.name.to_lowercase() == selector.trim().to_lowercase()
    }
}

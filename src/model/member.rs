//! Team member records as served by the directory endpoint.

use serde::Deserialize;

/// A single team member.
///
/// Immutable once fetched: fields are private and only exposed through
/// accessors. The wire shape nests `company.name` and `address.city`; both
/// are flattened here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireMember")]
pub struct MemberRecord {
    id: u64,
    name: String,
    username: String,
    email: String,
    phone: String,
    website: String,
    company: String,
    city: String,
}

impl MemberRecord {
    /// Build a record from already-flattened fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        website: impl Into<String>,
        company: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            email: email.into(),
            phone: phone.into(),
            website: website.into(),
            company: company.into(),
            city: city.into(),
        }
    }

    /// Stable identifier, unique across pages.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle, rendered as `@username`.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number, free-form.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Website, without scheme.
    pub fn website(&self) -> &str {
        &self.website
    }

    /// Employer name.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// City of the member's address.
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Deserialize)]
struct WireMember {
    id: u64,
    name: String,
    username: String,
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    company: WireCompany,
    #[serde(default)]
    address: WireAddress,
}

#[derive(Default, Deserialize)]
struct WireCompany {
    #[serde(default)]
    name: String,
}

#[derive(Default, Deserialize)]
struct WireAddress {
    #[serde(default)]
    city: String,
}

impl From<WireMember> for MemberRecord {
    fn from(wire: WireMember) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            username: wire.username,
            email: wire.email,
            phone: wire.phone,
            website: wire.website,
            company: wire.company.name,
            city: wire.address.city,
        }
    }
}

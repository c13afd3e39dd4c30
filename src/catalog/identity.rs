use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Versioned key for a service catalog (e.g., `agency_services_v1`).
///
/// Read from the catalog's `schema_version` field so callers can tell which
/// catalog snapshot produced a given selection or analytics payload.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for an individual service entry.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ServiceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Whether a service stands alone or must be attached to a base service.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Base,
    Addon,
}

impl ServiceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::Base => "base",
            ServiceCategory::Addon => "addon",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "base" => Some(ServiceCategory::Base),
            "addon" => Some(ServiceCategory::Addon),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Grouping used for related-service lookups and price averages.
///
/// Known variants drive the style mapping in `catalog::style`; `Other` keeps
/// catalogs that introduce a new grouping loadable.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SubCategory {
    Visibilite,
    Conversion,
    Vente,
    Optimisation,
    Growth,
    Plateforme,
    Innovation,
    Other(String),
}

impl SubCategory {
    /// Known subcategories in the order the services page lists its filters.
    pub const KNOWN: [SubCategory; 7] = [
        SubCategory::Visibilite,
        SubCategory::Conversion,
        SubCategory::Vente,
        SubCategory::Optimisation,
        SubCategory::Growth,
        SubCategory::Plateforme,
        SubCategory::Innovation,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SubCategory::Visibilite => "visibilite",
            SubCategory::Conversion => "conversion",
            SubCategory::Vente => "vente",
            SubCategory::Optimisation => "optimisation",
            SubCategory::Growth => "growth",
            SubCategory::Plateforme => "plateforme",
            SubCategory::Innovation => "innovation",
            SubCategory::Other(value) => value.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "visibilite" => SubCategory::Visibilite,
            "conversion" => SubCategory::Conversion,
            "vente" => SubCategory::Vente,
            "optimisation" => SubCategory::Optimisation,
            "growth" => SubCategory::Growth,
            "plateforme" => SubCategory::Plateforme,
            "innovation" => SubCategory::Innovation,
            other => SubCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for SubCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SubCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

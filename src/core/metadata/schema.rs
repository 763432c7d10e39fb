//! core::metadata::schema
//!
//! Branch entity record and partial updates.
//!
//! # Record Format
//!
//! Each entity is stored as a JSON object:
//!
//! ```json
//! { "name": "feature/login", "alias": "login", "desc": "OAuth login", "base": "develop" }
//! ```
//!
//! Optional keys may be absent or `null`; an empty string is read as absent.
//! Keys this version does not know about are kept in [`BranchEntity::extra`]
//! and written back unchanged.
//!
//! # Merge Semantics
//!
//! A [`BranchUpdate`] only touches the fields it carries. `None` leaves a
//! field unchanged; `Some("")` clears it.
//!
//! ```
//! use git_ass::core::metadata::schema::{BranchEntity, BranchUpdate};
//!
//! let entity = BranchEntity::from_update(
//!     BranchUpdate::new("feature/login").alias("login").base("develop"),
//! );
//! let updated = entity.merged(&BranchUpdate::new("feature/login").description("OAuth"));
//!
//! assert_eq!(updated.alias.as_deref(), Some("login"));
//! assert_eq!(updated.base.as_deref(), Some("develop"));
//! assert_eq!(updated.description.as_deref(), Some("OAuth"));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Metadata for one branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchEntity {
    /// Canonical branch name; the store key.
    pub name: String,

    /// Short lookup key, unique within a store.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub alias: Option<String>,

    /// Free-text description.
    #[serde(
        default,
        rename = "desc",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub description: Option<String>,

    /// Name of the branch this one was forked from.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub base: Option<String>,

    /// Unrecognized keys, preserved through load and persist.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl BranchEntity {
    /// Create an entity with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an entity from an update; absent fields stay absent.
    pub fn from_update(update: BranchUpdate) -> Self {
        Self::new(update.name.clone()).merged(&update)
    }

    /// Copy of this entity with every present field of `update` applied.
    ///
    /// The name is never changed by a merge.
    pub fn merged(&self, update: &BranchUpdate) -> Self {
        let mut next = self.clone();
        apply(&mut next.alias, &update.alias);
        apply(&mut next.description, &update.description);
        apply(&mut next.base, &update.base);
        next
    }

    /// Read one property as text; absent values read as the empty string.
    pub fn property(&self, property: Property) -> &str {
        match property {
            Property::Name => &self.name,
            Property::Alias => self.alias.as_deref().unwrap_or(""),
            Property::Description => self.description.as_deref().unwrap_or(""),
            Property::Base => self.base.as_deref().unwrap_or(""),
        }
    }
}

fn apply(field: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *field = if value.is_empty() {
            None
        } else {
            Some(value.clone())
        };
    }
}

impl fmt::Display for BranchEntity {
    /// `name (alias)\t[base]\tdesc`, with absent parts left empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias = self
            .alias
            .as_ref()
            .map(|a| format!("({})", a))
            .unwrap_or_default();
        let base = self
            .base
            .as_ref()
            .map(|b| format!("[{}]", b))
            .unwrap_or_default();
        write!(
            f,
            "{} {}\t{}\t{}",
            self.name,
            alias,
            base,
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// Partial update for one branch, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchUpdate {
    /// Target branch name (required).
    pub name: String,
    /// New alias; `Some("")` clears.
    pub alias: Option<String>,
    /// New description; `Some("")` clears.
    pub description: Option<String>,
    /// New base branch name; `Some("")` clears.
    pub base: Option<String>,
}

impl BranchUpdate {
    /// An update that changes nothing but names its target.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the base branch.
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}

/// A named entity field, as selected by `info --property`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Name,
    Alias,
    Description,
    Base,
}

/// Error for an unrecognized property name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown property '{0}' (expected one of: name, alias, desc, base)")]
pub struct UnknownProperty(pub String);

impl FromStr for Property {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Property::Name),
            "alias" => Ok(Property::Alias),
            "desc" | "description" => Ok(Property::Description),
            "base" => Ok(Property::Base),
            other => Err(UnknownProperty(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_update_keeps_absent_fields_absent() {
        let entity = BranchEntity::from_update(BranchUpdate::new("dev").alias("d"));
        assert_eq!(entity.name, "dev");
        assert_eq!(entity.alias.as_deref(), Some("d"));
        assert!(entity.description.is_none());
        assert!(entity.base.is_none());
    }

    #[test]
    fn merge_does_not_erase_with_none() {
        let entity = BranchEntity::from_update(
            BranchUpdate::new("dev").alias("d").description("work").base("main"),
        );
        let merged = entity.merged(&BranchUpdate::new("dev"));
        assert_eq!(merged, entity);
    }

    #[test]
    fn merge_clears_with_empty_string() {
        let entity = BranchEntity::from_update(BranchUpdate::new("dev").alias("d"));
        let merged = entity.merged(&BranchUpdate::new("dev").alias(""));
        assert!(merged.alias.is_none());
    }

    #[test]
    fn merge_keeps_name() {
        let entity = BranchEntity::new("dev");
        let merged = entity.merged(&BranchUpdate::new("other").alias("x"));
        assert_eq!(merged.name, "dev");
    }

    #[test]
    fn display_full_entity() {
        let entity = BranchEntity::from_update(
            BranchUpdate::new("feature/x").alias("x").base("main").description("thing"),
        );
        assert_eq!(entity.to_string(), "feature/x (x)\t[main]\tthing");
    }

    #[test]
    fn display_bare_entity() {
        assert_eq!(BranchEntity::new("main").to_string(), "main \t\t");
    }

    #[test]
    fn deserialize_accepts_null_and_missing_fields() {
        let entity: BranchEntity =
            serde_json::from_str(r#"{"name":"dev","alias":null,"desc":""}"#).unwrap();
        assert_eq!(entity.name, "dev");
        assert!(entity.alias.is_none());
        assert!(entity.description.is_none());
        assert!(entity.base.is_none());
        assert!(entity.extra.is_empty());
    }

    #[test]
    fn serialize_omits_absent_fields_and_uses_desc_key() {
        let entity = BranchEntity::from_update(BranchUpdate::new("dev").description("work"));
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"name":"dev","desc":"work"}"#);
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let entity: BranchEntity =
            serde_json::from_str(r#"{"name":"dev","color":"blue"}"#).unwrap();
        assert_eq!(entity.extra.get("color"), Some(&serde_json::json!("blue")));

        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json, serde_json::json!({"name": "dev", "color": "blue"}));
    }

    #[test]
    fn property_reads_empty_for_absent() {
        let entity = BranchEntity::new("dev");
        assert_eq!(entity.property(Property::Name), "dev");
        assert_eq!(entity.property(Property::Alias), "");
        assert_eq!(entity.property(Property::Base), "");
    }

    #[test]
    fn property_parses_known_names() {
        assert_eq!("desc".parse::<Property>().unwrap(), Property::Description);
        assert_eq!(
            "description".parse::<Property>().unwrap(),
            Property::Description
        );
        assert_eq!("base".parse::<Property>().unwrap(), Property::Base);
        assert!("color".parse::<Property>().is_err());
    }
}

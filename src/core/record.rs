//! The common record contract: every stored entity carries the same six base
//! fields and exposes them through the [`Entity`] trait.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Contract satisfied by every record a [`RecordStore`](crate::RecordStore)
/// manages.
///
/// Concrete entity types embed an [`EntityBase`] with `#[serde(flatten)]` and
/// delegate to it, usually via the [`impl_entity!`](crate::impl_entity) macro.
/// The store never inspects type-specific fields; it only reads `id`, `code`,
/// `name` and `updatedAt`, and stamps `id` and the timestamps on writes.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned {
    /// Store-generated identifier, unique within one namespace.
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    /// Short human-facing identifier, caller-supplied, not unique.
    fn code(&self) -> &str;
    /// Human-facing label.
    fn name(&self) -> &str;
    /// Soft-enable flag; deactivation stands in for deletion.
    fn active(&self) -> bool;
    fn created_at(&self) -> DateTime<Utc>;
    fn set_created_at(&mut self, at: DateTime<Utc>);
    fn updated_at(&self) -> DateTime<Utc>;
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// The six fields shared by every stored record.
///
/// Serializes with the wire names `id`, `code`, `name`, `active`,
/// `createdAt`, `updatedAt`; timestamps are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBase {
    #[serde(default)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EntityBase {
    /// Builds the base of a creation payload. The store overwrites `id` and
    /// both timestamps in `create`, so the placeholders here never persist.
    pub fn new(code: impl Into<String>, name: impl Into<String>, active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            code: code.into(),
            name: name.into(),
            active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Implements [`Entity`] for a struct holding its [`EntityBase`] in a field
/// named `base`.
///
/// ```
/// use flatstore::{EntityBase, impl_entity};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Category {
///     #[serde(flatten)]
///     base: EntityBase,
///     description: String,
/// }
///
/// impl_entity!(Category);
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($entity:ty) => {
        impl $crate::Entity for $entity {
            fn id(&self) -> &str {
                &self.base.id
            }

            fn set_id(&mut self, id: String) {
                self.base.id = id;
            }

            fn code(&self) -> &str {
                &self.base.code
            }

            fn name(&self) -> &str {
                &self.base.name
            }

            fn active(&self) -> bool {
                self.base.active
            }

            fn created_at(&self) -> $crate::chrono::DateTime<$crate::chrono::Utc> {
                self.base.created_at
            }

            fn set_created_at(&mut self, at: $crate::chrono::DateTime<$crate::chrono::Utc>) {
                self.base.created_at = at;
            }

            fn updated_at(&self) -> $crate::chrono::DateTime<$crate::chrono::Utc> {
                self.base.updated_at
            }

            fn set_updated_at(&mut self, at: $crate::chrono::DateTime<$crate::chrono::Utc>) {
                self.base.updated_at = at;
            }
        }
    };
}

/// Prefix plus nanosecond wall-clock timestamp. Uniqueness is a best-effort
/// property of clock granularity, which is enough for a single-process,
/// single-user deployment.
pub(crate) fn generate_id(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    format!("{}_{}", prefix, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Sample {
        #[serde(flatten)]
        base: EntityBase,
        description: String,
    }

    crate::impl_entity!(Sample);

    #[test]
    fn test_generate_id_uses_prefix() {
        let id = generate_id("ms");
        assert!(id.starts_with("ms_"));
        assert!(id["ms_".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_id_distinct_for_successive_calls() {
        assert_ne!(generate_id("rec"), generate_id("rec"));
    }

    #[test]
    fn test_base_new_stamps_equal_timestamps() {
        let base = EntityBase::new("PAINT", "Paint", true);
        assert_eq!(base.id, "");
        assert_eq!(base.created_at, base.updated_at);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let sample = Sample {
            base: EntityBase::new("PAINT", "Paint", true),
            description: "Paint products".to_string(),
        };

        let value = serde_json::to_value(&sample).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("createdAt"));
        assert!(object.contains_key("updatedAt"));
        assert!(object.contains_key("description"));
        assert!(!object.contains_key("created_at"));
    }

    #[test]
    fn test_flattened_round_trip() {
        let sample = Sample {
            base: EntityBase::new("PAINT", "Paint", true),
            description: "Paint products".to_string(),
        };

        let raw = serde_json::to_string(&sample).unwrap();
        let back: Sample = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.base, sample.base);
        assert_eq!(back.description, sample.description);
    }

    #[test]
    fn test_parses_millisecond_wire_timestamps() {
        let raw = r#"{"id":"ms_1700000000000","code":"PAINT","name":"Paint","active":true,
            "createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-02T00:00:00.000Z",
            "description":"Paint products"}"#;

        let sample: Sample = serde_json::from_str(raw).unwrap();
        assert_eq!(sample.id(), "ms_1700000000000");
        assert!(sample.created_at() < sample.updated_at());
    }
}

//! Presence-tracking patch fields for PATCH request bodies
//!
//! Update endpoints must distinguish "field not provided" (leave unchanged)
//! from "field provided" (apply, even when the value is `false`, `0`, `""`,
//! or `null`). Plain `Option<T>` conflates the two; `Patch<T>` keeps them
//! apart. Use `Patch<Option<T>>` for nullable columns so `"field": null`
//! clears the value.
//!
//! Fields must carry `#[serde(default)]` so an absent key deserializes to
//! `Patch::Absent`.

use serde::{Deserialize, Deserializer};

/// A PATCH body field: absent (no change) or present with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field was not present in the request body.
    #[default]
    Absent,
    /// Field was present; the value must be applied.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Patch::Set(_))
    }

    /// Borrow the provided value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Patch::Absent => None,
            Patch::Set(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Absent => None,
            Patch::Set(v) => Some(v),
        }
    }

    /// Overwrite `slot` when the field was provided.
    pub fn apply(self, slot: &mut T) {
        if let Patch::Set(v) = self {
            *slot = v;
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A present key always deserializes to Set; Absent only arises via
        // #[serde(default)] when the key is missing.
        T::deserialize(deserializer).map(Patch::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct TestBody {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        description: Patch<Option<String>>,
        #[serde(default)]
        is_paid: Patch<bool>,
    }

    #[test]
    fn test_absent_fields_deserialize_to_absent() {
        let body: TestBody = serde_json::from_str("{}").unwrap();
        assert!(body.name.is_absent());
        assert!(body.description.is_absent());
        assert!(body.is_paid.is_absent());
    }

    #[test]
    fn test_present_false_is_set() {
        let body: TestBody = serde_json::from_str(r#"{"is_paid": false}"#).unwrap();
        assert_eq!(body.is_paid, Patch::Set(false));
    }

    #[test]
    fn test_present_empty_string_is_set() {
        let body: TestBody = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(body.name, Patch::Set(String::new()));
    }

    #[test]
    fn test_null_clears_nullable_field() {
        let body: TestBody = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(body.description, Patch::Set(None));
    }

    #[test]
    fn test_apply_overwrites_only_when_set() {
        let mut name = "old".to_string();
        Patch::Absent.apply(&mut name);
        assert_eq!(name, "old");

        Patch::Set("new".to_string()).apply(&mut name);
        assert_eq!(name, "new");
    }

    #[test]
    fn test_get_and_into_option() {
        let set: Patch<i32> = Patch::Set(7);
        assert_eq!(set.get(), Some(&7));
        assert_eq!(set.into_option(), Some(7));

        let absent: Patch<i32> = Patch::Absent;
        assert_eq!(absent.get(), None);
        assert_eq!(absent.into_option(), None);
    }
}

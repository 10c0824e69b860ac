//! Request fields that survive a JSON type mismatch.
//!
//! A body such as `{"title": "", "completed": "yes"}` must be reported as
//! two field violations. Deserializing `completed` straight into `bool`
//! would abort the whole body on the first mismatch, so payload fields are
//! wrapped in [`Loose`] and the type check becomes one more validation rule.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A JSON value that either has the expected type or is kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Loose<T> {
    Typed(T),
    Mistyped(Value),
}

impl<T> Loose<T> {
    /// The typed value, or `None` when the client sent another JSON type.
    pub fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(value) => Some(value),
            Self::Mistyped(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Mistyped(Value::Null))
    }
}

impl Loose<String> {
    pub fn as_str(&self) -> Option<&str> {
        self.typed().map(String::as_str)
    }
}

impl<T: Default> Default for Loose<T> {
    fn default() -> Self {
        Self::Typed(T::default())
    }
}

impl<T> From<T> for Loose<T> {
    fn from(value: T) -> Self {
        Self::Typed(value)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Loose<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match T::deserialize(&value) {
            Ok(typed) => Self::Typed(typed),
            Err(_) => Self::Mistyped(value),
        })
    }
}

impl<T: Serialize> Serialize for Loose<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Typed(value) => value.serialize(serializer),
            Self::Mistyped(value) => value.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn matching_type_is_typed() {
        let flag: Loose<bool> = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(flag, Loose::Typed(true));
        assert_eq!(flag.typed(), Some(&true));
    }

    #[test]
    fn mismatched_type_keeps_the_raw_value() {
        let flag: Loose<bool> = serde_json::from_value(json!("yes")).unwrap();
        assert_eq!(flag, Loose::Mistyped(json!("yes")));
        assert_eq!(flag.typed(), None);

        let text: Loose<String> = serde_json::from_value(json!(null)).unwrap();
        assert!(text.is_null());
    }

    #[test]
    fn optional_inner_type_accepts_null() {
        let id: Loose<Option<String>> = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(id, Loose::Typed(None));

        let id: Loose<Option<String>> = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(id, Loose::Mistyped(json!(42)));
    }

    #[test]
    fn serializes_the_underlying_value() {
        assert_eq!(serde_json::to_value(Loose::from(false)).unwrap(), json!(false));
        let raw: Loose<bool> = Loose::Mistyped(json!("yes"));
        assert_eq!(serde_json::to_value(raw).unwrap(), json!("yes"));
    }
}

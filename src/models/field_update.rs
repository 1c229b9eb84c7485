use crate::errors::{DomainError, ParameterErrorCode};
use serde::{Deserialize, Deserializer};

/// Explicit tagged option for partial updates: an absent field leaves the
/// column unchanged, an explicit `null` clears it, a value replaces it.
///
/// Replaces the wire convention of distinguishing `undefined` from `null`,
/// which does not survive a typed deserializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    pub fn set_value(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Changeset form for a nullable column: `Some(None)` writes NULL.
    pub fn into_nullable_change(self) -> Option<Option<T>> {
        match self {
            FieldUpdate::Unchanged => None,
            FieldUpdate::Set(value) => Some(Some(value)),
            FieldUpdate::Clear => Some(None),
        }
    }

    /// Changeset form for a non-nullable column; `Clear` is a format error.
    pub fn into_required_change(
        self,
        field: &str,
    ) -> Result<Option<T>, DomainError> {
        match self {
            FieldUpdate::Unchanged => Ok(None),
            FieldUpdate::Set(value) => Ok(Some(value)),
            FieldUpdate::Clear => Err(DomainError::new_parameter_format(
                ParameterErrorCode::Format,
                format!("Parameter not correct: {field} cannot be null"),
            )),
        }
    }
}

// Relies on `#[serde(default)]` at the field site: a missing field never
// reaches this impl and stays `Unchanged`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        })
    }
}

//! Tri-state update field for selective PATCH payloads.
//!
//! Remote rows distinguish "leave this column unchanged" from "write SQL
//! NULL" from "write this value". An `Option` cannot express all three, so
//! selective updates carry a [`FieldUpdate`] per column.

/// One column of a selective update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the column unchanged; the field is omitted from the payload.
    #[default]
    Unset,
    /// Write SQL NULL.
    Clear,
    /// Write the given value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// True when the field would be omitted from an update payload.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Borrowing view of the field.
    pub fn as_ref(&self) -> FieldUpdate<&T> {
        match self {
            Self::Unset => FieldUpdate::Unset,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(value),
        }
    }

    /// Transform the carried value, preserving `Unset`/`Clear`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            Self::Unset => FieldUpdate::Unset,
            Self::Clear => FieldUpdate::Clear,
            Self::Set(value) => FieldUpdate::Set(f(value)),
        }
    }
}

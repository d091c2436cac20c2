//! Field descriptors and setting schemas.
//!
//! A [`SettingSchema`] is static configuration: built at compile time, never
//! mutated. Rendering surfaces iterate it to build one input per
//! [`FieldDescriptor`] and call [`FieldDescriptor::mutate`] on every edit.

use std::fmt;

/// Which input control a surface should render for a field.
///
/// This is a rendering hint only; how raw input is coerced is decided by the
/// field itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    /// Text whose value should be masked when displayed.
    Password,
}

impl InputKind {
    pub fn is_masked(self) -> bool {
        self == InputKind::Password
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Text => write!(f, "text"),
            InputKind::Number => write!(f, "number"),
            InputKind::Password => write!(f, "password"),
        }
    }
}

/// Identifies one property of a configuration record.
pub trait SettingField: Copy + Eq + fmt::Debug + 'static {
    /// Property name as it appears in the serialized record.
    fn key(self) -> &'static str;
}

/// A configuration record that can be edited through a [`SettingSchema`].
pub trait SettingTarget: Clone + fmt::Debug + PartialEq {
    type Field: SettingField;

    /// The zero value: every property present, strings empty, ports at the
    /// service's well-known default.
    fn blank() -> Self;

    fn schema() -> &'static SettingSchema<Self::Field>;

    /// Return a copy of `self` with only `field` replaced by the coerced `raw`.
    fn apply(&self, field: Self::Field, raw: &str) -> Self;

    /// Current value of `field` rendered as text.
    fn value_of(&self, field: Self::Field) -> String;
}

/// One editable property of a configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor<F: 'static> {
    pub field: F,
    /// Display label, unique within its schema
    pub label: &'static str,
    pub input: InputKind,
    /// Placeholder hint; the record's actual default comes from `blank()`
    pub default: Option<i64>,
    /// Whether the receiving service accepts this field left empty
    pub optional: bool,
    pub tips: Option<&'static str>,
    pub helpful_link: Option<&'static str>,
}

impl<F: SettingField> FieldDescriptor<F> {
    /// Apply raw user input to `current`, returning the next record.
    ///
    /// Only the property named by this descriptor changes; `current` is left
    /// untouched.
    pub fn mutate<C>(&self, raw: &str, current: &C) -> C
    where
        C: SettingTarget<Field = F>,
    {
        current.apply(self.field, raw)
    }

    pub fn key(&self) -> &'static str {
        self.field.key()
    }

    pub fn placeholder(&self) -> Option<String> {
        self.default.map(|d| d.to_string())
    }
}

/// Ordered field descriptors for one configuration record type.
///
/// Order is display and tab order only.
#[derive(Debug)]
pub struct SettingSchema<F: 'static> {
    pub title: &'static str,
    pub fields: &'static [FieldDescriptor<F>],
}

impl<F: SettingField> SettingSchema<F> {
    pub fn iter(&self) -> std::slice::Iter<'static, FieldDescriptor<F>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static FieldDescriptor<F>> {
        self.fields.get(index)
    }

    /// Find a field by label (case-insensitive) or by property key.
    pub fn find(&self, name: &str) -> Option<&'static FieldDescriptor<F>> {
        let name = name.trim();
        self.fields
            .iter()
            .find(|d| d.label.eq_ignore_ascii_case(name) || d.key() == name)
    }

    pub fn descriptor_for(&self, field: F) -> Option<&'static FieldDescriptor<F>> {
        self.fields.iter().find(|d| d.field == field)
    }
}

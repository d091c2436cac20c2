//! Declarative connection settings for peer configuration forms.
//!
//! This crate describes each editable property of a peer configuration
//! record as a [`FieldDescriptor`], groups them into an ordered
//! [`SettingSchema`] per record type, and applies user input to a record
//! through pure, copy-on-write updates. It performs coercion only; semantic
//! validation belongs to the service that finally receives the record.

pub mod numeric;
pub mod peer;
pub mod postgres;
pub mod setting;
pub mod ssh;

pub use numeric::{parse_int, NumericValue};
pub use peer::{blank_config, FieldView, PeerConfig, PeerKind};
pub use postgres::{PostgresConfig, PostgresField, POSTGRES_SETTING};
pub use setting::{FieldDescriptor, InputKind, SettingField, SettingSchema, SettingTarget};
pub use ssh::{SshConfig, SshField, SSH_SETTING};

//! The closed set of peer configuration records.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::postgres::PostgresConfig;
use crate::setting::{InputKind, SettingField, SettingTarget};
use crate::ssh::SshConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerKind {
    Postgres,
    Ssh,
}

impl PeerKind {
    pub const ALL: [PeerKind; 2] = [PeerKind::Postgres, PeerKind::Ssh];

    pub fn title(self) -> &'static str {
        match self {
            PeerKind::Postgres => PostgresConfig::schema().title,
            PeerKind::Ssh => SshConfig::schema().title,
        }
    }
}

impl fmt::Display for PeerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerKind::Postgres => write!(f, "postgres"),
            PeerKind::Ssh => write!(f, "ssh"),
        }
    }
}

impl FromStr for PeerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(PeerKind::Postgres),
            "ssh" => Ok(PeerKind::Ssh),
            _ => Err(format!("Unknown peer kind: {} (expected postgres or ssh)", s)),
        }
    }
}

/// A configuration record for one peer kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PeerConfig {
    Postgres(PostgresConfig),
    Ssh(SshConfig),
}

/// Zero-value record for `kind`, with every schema field present.
pub fn blank_config(kind: PeerKind) -> PeerConfig {
    match kind {
        PeerKind::Postgres => PeerConfig::Postgres(PostgresConfig::blank()),
        PeerKind::Ssh => PeerConfig::Ssh(SshConfig::blank()),
    }
}

/// One schema field together with the record's current value, flattened for
/// surfaces that do not care which record type they are showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub label: &'static str,
    pub key: &'static str,
    pub input: String,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helpful_link: Option<&'static str>,
    pub value: String,
    #[serde(skip)]
    pub masked: bool,
}

impl PeerConfig {
    pub fn kind(&self) -> PeerKind {
        match self {
            PeerConfig::Postgres(_) => PeerKind::Postgres,
            PeerConfig::Ssh(_) => PeerKind::Ssh,
        }
    }

    /// Apply `raw` to the field named `name` (label or key).
    ///
    /// Returns `None` if the record type has no such field.
    pub fn set(&self, name: &str, raw: &str) -> Option<PeerConfig> {
        match self {
            PeerConfig::Postgres(config) => {
                let descriptor = PostgresConfig::schema().find(name)?;
                Some(PeerConfig::Postgres(descriptor.mutate(raw, config)))
            }
            PeerConfig::Ssh(config) => {
                let descriptor = SshConfig::schema().find(name)?;
                Some(PeerConfig::Ssh(descriptor.mutate(raw, config)))
            }
        }
    }

    pub fn describe(&self) -> Vec<FieldView> {
        match self {
            PeerConfig::Postgres(config) => describe(config),
            PeerConfig::Ssh(config) => describe(config),
        }
    }

    pub fn from_json(kind: PeerKind, text: &str) -> serde_json::Result<PeerConfig> {
        Ok(match kind {
            PeerKind::Postgres => PeerConfig::Postgres(serde_json::from_str(text)?),
            PeerKind::Ssh => PeerConfig::Ssh(serde_json::from_str(text)?),
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn describe<C: SettingTarget>(config: &C) -> Vec<FieldView> {
    C::schema()
        .iter()
        .map(|d| FieldView {
            label: d.label,
            key: d.field.key(),
            input: d.input.to_string(),
            optional: d.optional,
            placeholder: d.placeholder(),
            tips: d.tips,
            helpful_link: d.helpful_link,
            value: config.value_of(d.field),
            masked: d.input == InputKind::Password,
        })
        .collect()
}

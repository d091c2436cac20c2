//! SSH tunnel settings.

use serde::{Deserialize, Serialize};

use crate::numeric::{parse_int, NumericValue};
use crate::setting::{FieldDescriptor, InputKind, SettingField, SettingSchema, SettingTarget};

pub const DEFAULT_SSH_PORT: i64 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SshConfig {
    pub host: String,
    pub port: NumericValue,
    pub user: String,
    pub password: String,
    /// BASE64-encoded private key
    pub private_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SshField {
    Host,
    Port,
    User,
    Password,
    PrivateKey,
}

impl SettingField for SshField {
    fn key(self) -> &'static str {
        match self {
            SshField::Host => "host",
            SshField::Port => "port",
            SshField::User => "user",
            SshField::Password => "password",
            SshField::PrivateKey => "privateKey",
        }
    }
}

pub static SSH_SETTING: SettingSchema<SshField> = SettingSchema {
    title: "SSH tunnel",
    fields: &[
        FieldDescriptor {
            field: SshField::Host,
            label: "Host",
            input: InputKind::Text,
            default: None,
            optional: false,
            tips: Some("Specifies the IP host name or address of your instance."),
            helpful_link: None,
        },
        FieldDescriptor {
            field: SshField::Port,
            label: "Port",
            input: InputKind::Number,
            default: Some(DEFAULT_SSH_PORT),
            optional: false,
            tips: Some(
                "Specifies the TCP/IP port or local Unix domain socket file extension on which clients can connect.",
            ),
            helpful_link: None,
        },
        FieldDescriptor {
            field: SshField::User,
            label: "User",
            input: InputKind::Text,
            default: None,
            optional: false,
            tips: Some("Specify the user that we should use to connect to this host."),
            helpful_link: None,
        },
        FieldDescriptor {
            field: SshField::Password,
            label: "Password",
            input: InputKind::Password,
            default: None,
            optional: true,
            tips: Some("Password associated with the user you provided."),
            helpful_link: None,
        },
        FieldDescriptor {
            field: SshField::PrivateKey,
            label: "BASE64 Private Key",
            input: InputKind::Text,
            default: None,
            optional: true,
            tips: Some(
                "Private key as a BASE64 string for authentication in order to SSH into your machine.",
            ),
            helpful_link: None,
        },
    ],
};

impl Default for SshConfig {
    fn default() -> Self {
        Self::blank()
    }
}

impl SettingTarget for SshConfig {
    type Field = SshField;

    fn blank() -> Self {
        Self {
            host: String::new(),
            port: NumericValue::Int(DEFAULT_SSH_PORT),
            user: String::new(),
            password: String::new(),
            private_key: String::new(),
        }
    }

    fn schema() -> &'static SettingSchema<SshField> {
        &SSH_SETTING
    }

    fn apply(&self, field: SshField, raw: &str) -> Self {
        let mut next = self.clone();
        match field {
            SshField::Host => next.host = raw.to_string(),
            SshField::Port => next.port = parse_int(raw),
            SshField::User => next.user = raw.to_string(),
            SshField::Password => next.password = raw.to_string(),
            SshField::PrivateKey => next.private_key = raw.to_string(),
        }
        next
    }

    fn value_of(&self, field: SshField) -> String {
        match field {
            SshField::Host => self.host.clone(),
            SshField::Port => self.port.to_string(),
            SshField::User => self.user.clone(),
            SshField::Password => self.password.clone(),
            SshField::PrivateKey => self.private_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> SshConfig {
        SshConfig {
            host: "bastion.example.com".to_string(),
            port: NumericValue::Int(2200),
            user: "tunnel".to_string(),
            password: "secret".to_string(),
            private_key: "LS0tLS1CRUdJTg==".to_string(),
        }
    }

    #[test]
    fn test_blank_defaults() {
        assert_eq!(
            SshConfig::blank(),
            SshConfig {
                host: String::new(),
                port: NumericValue::Int(22),
                user: String::new(),
                password: String::new(),
                private_key: String::new(),
            }
        );
    }

    #[test]
    fn test_schema_optional_fields() {
        let optional: Vec<_> = SSH_SETTING
            .iter()
            .filter(|d| d.optional)
            .map(|d| d.label)
            .collect();
        assert_eq!(optional, vec!["Password", "BASE64 Private Key"]);
    }

    #[test]
    fn test_each_field_touches_only_itself() {
        let base = filled();
        for descriptor in SSH_SETTING.iter() {
            let next = descriptor.mutate("7", &base);
            for other in SSH_SETTING.iter() {
                if other.field == descriptor.field {
                    assert_eq!(next.value_of(other.field), "7");
                } else {
                    assert_eq!(next.value_of(other.field), base.value_of(other.field));
                }
            }
        }
    }

    #[test]
    fn test_mutate_is_idempotent() {
        let base = filled();
        for descriptor in SSH_SETTING.iter() {
            let once = descriptor.mutate("2222", &base);
            assert_eq!(descriptor.mutate("2222", &once), once);
            assert_eq!(descriptor.mutate("2222", &base), once);
        }
    }

    #[test]
    fn test_port_placeholder_matches_blank() {
        let port = SSH_SETTING.descriptor_for(SshField::Port).unwrap();
        assert_eq!(port.default, SshConfig::blank().port.as_i64());
    }

    #[test]
    fn test_private_key_mutation() {
        let base = SshConfig::blank().apply(SshField::Host, "bastion.example.com");
        let next = base.apply(SshField::PrivateKey, "LS0tLS1CRUdJTg==");

        assert_eq!(next.private_key, "LS0tLS1CRUdJTg==");
        assert_eq!(next.host, "bastion.example.com");
        assert!(base.private_key.is_empty());
    }

    #[test]
    fn test_port_parse() {
        let next = SshConfig::blank().apply(SshField::Port, "2222");
        assert_eq!(next.port, NumericValue::Int(2222));

        let next = next.apply(SshField::Port, "ssh");
        assert!(next.port.is_nan());
    }

    #[test]
    fn test_json_round_trip_keeps_nan_port() {
        let config = SshConfig::blank().apply(SshField::Port, "x");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"privateKey\""));
        let parsed: SshConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}

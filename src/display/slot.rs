//! Replication slot names and the mirrors they belong to.
//!
//! Slots created for a mirror are named `peerflow_slot_<flow name>`. Those
//! slots are shown as links to the mirror's edit page; every other slot is
//! shown as plain text.

use anyhow::{Context, Result};
use url::Url;

pub const SLOT_PREFIX: &str = "peerflow_slot_";
pub const MIRROR_EDIT_PATH: &str = "/mirrors/edit/";

/// Flow name encoded in `slot_name`, or `""` when the slot has no prefix.
///
/// The prefix match is exact and case-sensitive.
pub fn flow_name(slot_name: &str) -> &str {
    slot_name.strip_prefix(SLOT_PREFIX).unwrap_or("")
}

pub fn mirror_edit_path(flow_name: &str) -> String {
    format!("{}{}", MIRROR_EDIT_PATH, flow_name)
}

/// How a slot name should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDisplay<'a> {
    /// Render `slot_name` as a link to the edit page of `flow_name`.
    Linked { slot_name: &'a str, flow_name: &'a str },
    /// Render `slot_name` as a plain label.
    Plain { slot_name: &'a str },
}

impl<'a> SlotDisplay<'a> {
    /// A slot is linked when it carries a non-empty flow name; a name that is
    /// exactly the prefix stays plain.
    pub fn classify(slot_name: &'a str) -> Self {
        let flow = flow_name(slot_name);
        if flow.is_empty() {
            SlotDisplay::Plain { slot_name }
        } else {
            SlotDisplay::Linked {
                slot_name,
                flow_name: flow,
            }
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, SlotDisplay::Linked { .. })
    }

    /// The text to show, always the raw slot name.
    pub fn label(&self) -> &'a str {
        match *self {
            SlotDisplay::Linked { slot_name, .. } | SlotDisplay::Plain { slot_name } => slot_name,
        }
    }

    pub fn flow_name(&self) -> &'a str {
        match *self {
            SlotDisplay::Linked { flow_name, .. } => flow_name,
            SlotDisplay::Plain { .. } => "",
        }
    }

    /// Navigation target for linked slots.
    pub fn href(&self) -> Option<String> {
        match self {
            SlotDisplay::Linked { flow_name, .. } => Some(mirror_edit_path(flow_name)),
            SlotDisplay::Plain { .. } => None,
        }
    }

    /// Absolute URL of the edit page under the web UI at `base`.
    pub fn url(&self, base: &str) -> Result<Option<Url>> {
        let Some(path) = self.href() else {
            return Ok(None);
        };
        let base = Url::parse(base).with_context(|| format!("Invalid UI url: {}", base))?;
        let url = base
            .join(&path)
            .with_context(|| format!("Cannot join {} onto {}", path, base))?;
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_name_extraction() {
        assert_eq!(flow_name("peerflow_slot_myflow"), "myflow");
        assert_eq!(flow_name("other_slot"), "");
        assert_eq!(flow_name("peerflow_slot_"), "");
    }

    #[test]
    fn test_flow_name_is_case_sensitive_and_untrimmed() {
        assert_eq!(flow_name("PEERFLOW_SLOT_myflow"), "");
        assert_eq!(flow_name(" peerflow_slot_myflow"), "");
        assert_eq!(flow_name("peerflow_slot_ spaced "), " spaced ");
    }

    #[test]
    fn test_prefix_length() {
        assert_eq!(SLOT_PREFIX.len(), 14);
    }

    #[test]
    fn test_classify_linked() {
        let display = SlotDisplay::classify("peerflow_slot_orders_mirror");
        assert!(display.is_linked());
        assert_eq!(display.label(), "peerflow_slot_orders_mirror");
        assert_eq!(display.flow_name(), "orders_mirror");
        assert_eq!(display.href().as_deref(), Some("/mirrors/edit/orders_mirror"));
    }

    #[test]
    fn test_classify_plain() {
        let display = SlotDisplay::classify("debezium");
        assert!(!display.is_linked());
        assert_eq!(display.label(), "debezium");
        assert_eq!(display.flow_name(), "");
        assert_eq!(display.href(), None);
    }

    #[test]
    fn test_prefix_only_is_plain() {
        let display = SlotDisplay::classify("peerflow_slot_");
        assert_eq!(
            display,
            SlotDisplay::Plain {
                slot_name: "peerflow_slot_"
            }
        );
    }

    #[test]
    fn test_url_joins_base() {
        let display = SlotDisplay::classify("peerflow_slot_f1");
        let url = display.url("http://localhost:3000/").unwrap().unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/mirrors/edit/f1");

        let plain = SlotDisplay::classify("f1");
        assert!(plain.url("http://localhost:3000").unwrap().is_none());
    }

    #[test]
    fn test_url_rejects_bad_base() {
        let display = SlotDisplay::classify("peerflow_slot_f1");
        assert!(display.url("not a url").is_err());
    }
}

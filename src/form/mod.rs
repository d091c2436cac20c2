//! Editing session for one peer configuration record.
//!
//! A session starts from a blank (or loaded) record, feeds every change of the
//! edit buffer through the selected field's `mutate`, and ends either with the
//! final record submitted or with nothing.

pub mod input;

pub use input::TextInput;

use peer_settings::{FieldDescriptor, SettingSchema, SettingTarget};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Navigate,
    Edit,
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMode::Navigate => write!(f, "NAVIGATE"),
            FormMode::Edit => write!(f, "INSERT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Submitted,
    Cancelled,
}

const MASK_CHAR: char = '•';

#[derive(Debug, Clone)]
pub struct FormSession<C: SettingTarget> {
    config: C,
    selected: usize,
    mode: FormMode,
    input: Option<TextInput>,
    edits: usize,
    outcome: Option<FormOutcome>,
}

impl<C: SettingTarget> Default for FormSession<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: SettingTarget> FormSession<C> {
    /// Start a session on the blank record.
    pub fn new() -> Self {
        Self::with_config(C::blank())
    }

    pub fn with_config(config: C) -> Self {
        Self {
            config,
            selected: 0,
            mode: FormMode::Navigate,
            input: None,
            edits: 0,
            outcome: None,
        }
    }

    pub fn schema(&self) -> &'static SettingSchema<C::Field> {
        C::schema()
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_descriptor(&self) -> Option<&'static FieldDescriptor<C::Field>> {
        self.schema().get(self.selected)
    }

    pub fn input(&self) -> Option<&TextInput> {
        self.input.as_ref()
    }

    /// Number of edits applied since the session started.
    pub fn edit_count(&self) -> usize {
        self.edits
    }

    pub fn outcome(&self) -> Option<FormOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn select_next(&mut self) {
        self.end_edit();
        let len = self.schema().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        self.end_edit();
        let len = self.schema().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Enter edit mode on the selected field, seeding the buffer with its
    /// current value.
    pub fn begin_edit(&mut self) {
        let Some(descriptor) = self.selected_descriptor() else {
            return;
        };
        let current = self.config.value_of(descriptor.field);
        self.input = Some(TextInput::new(&current));
        self.mode = FormMode::Edit;
    }

    /// Leave edit mode. The record keeps every edit already applied.
    pub fn end_edit(&mut self) {
        self.input = None;
        self.mode = FormMode::Navigate;
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit(|input| {
            input.insert(c);
            true
        });
    }

    pub fn backspace(&mut self) {
        self.edit(TextInput::backspace);
    }

    pub fn delete(&mut self) {
        self.edit(TextInput::delete);
    }

    pub fn clear_field(&mut self) {
        self.edit(TextInput::clear);
    }

    pub fn move_cursor_left(&mut self) {
        self.edit(|input| {
            input.move_left();
            false
        });
    }

    pub fn move_cursor_right(&mut self) {
        self.edit(|input| {
            input.move_right();
            false
        });
    }

    pub fn move_cursor_home(&mut self) {
        self.edit(|input| {
            input.move_home();
            false
        });
    }

    pub fn move_cursor_end(&mut self) {
        self.edit(|input| {
            input.move_end();
            false
        });
    }

    /// Run `change` on the edit buffer; when it reports a change, apply the
    /// buffer to the record through the selected field.
    fn edit(&mut self, change: impl FnOnce(&mut TextInput) -> bool) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        if !change(input) {
            return;
        }
        let raw = input.value().to_string();

        let Some(descriptor) = C::schema().get(self.selected) else {
            return;
        };
        self.config = descriptor.mutate(&raw, &self.config);
        self.edits += 1;
        tracing::trace!(field = descriptor.key(), "applied edit");
    }

    pub fn submit(&mut self) {
        self.end_edit();
        self.outcome = Some(FormOutcome::Submitted);
        tracing::debug!(edits = self.edits, "form submitted");
    }

    pub fn cancel(&mut self) {
        self.end_edit();
        self.outcome = Some(FormOutcome::Cancelled);
        tracing::debug!(edits = self.edits, "form cancelled");
    }

    /// The final record, if the session was submitted.
    pub fn into_submitted(self) -> Option<C> {
        match self.outcome {
            Some(FormOutcome::Submitted) => Some(self.config),
            _ => None,
        }
    }

    /// Value of `descriptor` for display; password fields are masked when
    /// `mask` is set.
    pub fn display_value(&self, descriptor: &FieldDescriptor<C::Field>, mask: bool) -> String {
        let value = self.config.value_of(descriptor.field);
        if mask && descriptor.input.is_masked() {
            mask_text(&value)
        } else {
            value
        }
    }
}

pub fn mask_text(value: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, value.chars().count()).collect()
}

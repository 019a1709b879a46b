//! Raw webhook form fields as handed over by the HTTP layer.

use std::collections::HashMap;

use crate::email::UploadedFile;

/// A single form field value: either text or an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(UploadedFile),
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(value) => Some(value),
            FormValue::File(_) => None,
        }
    }
}

/// The field mapping for one webhook invocation.
///
/// Any field may be absent. Reads name their own default at the access
/// site instead of letting a missing key flow onward.
#[derive(Debug, Clone, Default)]
pub struct FormParams {
    fields: HashMap<String, FormValue>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), FormValue::Text(value.into()));
    }

    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.fields.insert(name.into(), FormValue::File(file));
    }

    /// Text content of a field; `None` when the field is absent or holds a
    /// file.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FormValue::as_text)
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FormValue> {
        self.fields.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<HashMap<String, String>> for FormParams {
    fn from(fields: HashMap<String, String>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name, FormValue::Text(value)))
                .collect(),
        }
    }
}

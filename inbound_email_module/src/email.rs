//! Canonical inbound email record and the adapter contract.
//!
//! Webhook providers deliver received email as provider-specific form
//! fields; an `InboundEmailAdapter` turns one provider's fields into the
//! `NormalizedEmail` record the generic email-processing pipeline consumes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::form::FormParams;

/// Errors surfaced by inbound email adapters.
///
/// Malformed vendor data never produces one of these; adapters degrade to
/// empty defaults instead. The variants cover caller contract violations
/// upstream of the normalizer.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("no inbound email adapter registered for provider {0}")]
    UnknownProvider(String),
    #[error("form field {0} holds text where an uploaded file is required")]
    ExpectedFile(String),
}

/// A file received alongside the webhook form fields.
///
/// The normalizer carries the content as opaque bytes; it never opens or
/// decodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// Provider spam scoring, passed through without validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpamReport {
    pub score: Option<String>,
    pub report: Option<String>,
}

/// Per-attachment metadata a provider supplies outside the standard
/// multipart fields.
#[derive(Debug, Clone)]
pub struct AttachmentInfo {
    pub content_id: Option<String>,
    pub content_type: Option<String>,
    /// The same handle held in `NormalizedEmail::attachments`; downstream
    /// code correlates metadata to file with `Arc::ptr_eq`, not by
    /// filename.
    pub file: Arc<UploadedFile>,
}

/// Provider extras that have no canonical slot of their own.
#[derive(Debug, Clone, Default)]
pub struct VendorSpecific {
    pub attachment_info: Vec<AttachmentInfo>,
}

/// The canonical, vendor-neutral record handed to the processing pipeline.
///
/// Every list and map field is present even when empty; consumers never
/// deal with a missing key.
#[derive(Debug, Clone, Default)]
pub struct NormalizedEmail {
    pub text: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub html: Option<String>,
    pub headers: Option<String>,
    pub attachments: Vec<Arc<UploadedFile>>,
    pub charsets: HashMap<String, String>,
    pub spam_report: SpamReport,
    pub vendor_specific: VendorSpecific,
}

/// Contract implemented by each provider-specific normalizer.
pub trait InboundEmailAdapter: Send + Sync {
    /// Turn one webhook delivery into the canonical record.
    ///
    /// Total over vendor data: malformed or missing fields degrade to
    /// defaults rather than failing. The only errors are caller contract
    /// violations such as a text value where an upload is required.
    fn normalize(&self, params: FormParams) -> Result<NormalizedEmail, AdapterError>;

    /// Registry key for this provider, e.g. `"sendgrid"`.
    fn provider(&self) -> &'static str;
}

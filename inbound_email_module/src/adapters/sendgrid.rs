//! SendGrid inbound parse webhook adapter.
//!
//! SendGrid posts a received email as form fields: address headers as
//! comma-separated strings, an `envelope` JSON blob carrying the
//! authoritative delivery list, `attachments` as a declared count plus
//! `attachmentN` file fields, and an `attachment-info` JSON blob
//! describing those files. `SendgridInboundAdapter` reshapes all of that
//! into the canonical `NormalizedEmail` record.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::addresses::{address_part, split_addresses};
use crate::email::{
    AdapterError, AttachmentInfo, InboundEmailAdapter, NormalizedEmail, SpamReport, UploadedFile,
    VendorSpecific,
};
use crate::form::{FormParams, FormValue};
use crate::json::decode_object;

/// Adapter for the SendGrid inbound parse webhook.
#[derive(Debug, Clone, Default)]
pub struct SendgridInboundAdapter;

impl SendgridInboundAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl InboundEmailAdapter for SendgridInboundAdapter {
    fn normalize(&self, mut params: FormParams) -> Result<NormalizedEmail, AdapterError> {
        let to = split_addresses(params.text("to"));
        let cc = split_addresses(params.text("cc"));
        let bcc = resolve_bcc(params.text("envelope"), &to, &cc);
        let charsets = decode_charsets(params.text("charsets"));
        let spam_report = SpamReport {
            score: params.text("spam_score").map(str::to_string),
            report: params.text("spam_report").map(str::to_string),
        };

        let text = params.text("text").unwrap_or_default().to_string();
        let from = params.text("from").map(str::to_string);
        let subject = params.text("subject").map(str::to_string);
        let html = params.text("html").map(str::to_string);
        let headers = params.text("headers").map(str::to_string);

        let (attachments, attachment_info) = assemble_attachments(&mut params)?;

        Ok(NormalizedEmail {
            text,
            to,
            cc,
            bcc,
            from,
            subject,
            html,
            headers,
            attachments,
            charsets,
            spam_report,
            vendor_specific: VendorSpecific { attachment_info },
        })
    }

    fn provider(&self) -> &'static str {
        "sendgrid"
    }
}

/// Recipients the provider delivered to without naming them in the visible
/// headers: everything in the envelope `to` list whose address does not
/// appear in the split to/cc entries. Envelope order is kept and nothing
/// is de-duplicated beyond that check.
fn resolve_bcc(envelope: Option<&str>, to: &[String], cc: &[String]) -> Vec<String> {
    let envelope = decode_object(envelope);
    let recipients: Vec<&str> = envelope
        .get("to")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if recipients.is_empty() {
        return Vec::new();
    }

    let visible: Vec<&str> = to
        .iter()
        .chain(cc.iter())
        .map(|entry| address_part(entry))
        .collect();

    recipients
        .into_iter()
        .filter(|candidate| !visible.contains(candidate))
        .map(str::to_string)
        .collect()
}

fn decode_charsets(raw: Option<&str>) -> HashMap<String, String> {
    decode_object(raw)
        .into_iter()
        .filter_map(|(field, value)| match value {
            Value::String(charset) => Some((field, charset)),
            _ => None,
        })
        .collect()
}

fn declared_attachment_count(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Collect `attachment1..attachmentN` file fields in index order and pair
/// each with its `attachment-info` entry. The vendor entry holds the same
/// `Arc` pushed to the attachment list so downstream code can match file
/// to metadata by identity.
fn assemble_attachments(
    params: &mut FormParams,
) -> Result<(Vec<Arc<UploadedFile>>, Vec<AttachmentInfo>), AdapterError> {
    let count = declared_attachment_count(params.text("attachments"));
    let info = decode_object(params.text("attachment-info"));

    let mut attachments = Vec::new();
    let mut vendor_info = Vec::new();

    for index in 1..=count {
        let field = format!("attachment{}", index);
        let mut file = match params.remove(&field) {
            Some(FormValue::File(file)) => file,
            Some(FormValue::Text(_)) => return Err(AdapterError::ExpectedFile(field)),
            None => {
                debug!("declared attachment field {} missing from payload", field);
                continue;
            }
        };

        let entry = info
            .get(field.as_str())
            .and_then(|value| serde_json::from_value::<AttachmentInfoEntry>(value.clone()).ok());

        // SendGrid stores the original filename in attachment-info; the
        // transport-level one is a temp name.
        if let Some(filename) = entry.as_ref().and_then(|entry| entry.filename.as_deref()) {
            if !filename.is_empty() {
                file.filename = filename.to_string();
            }
        }

        let file = Arc::new(file);
        attachments.push(Arc::clone(&file));
        if let Some(entry) = entry {
            vendor_info.push(AttachmentInfo {
                content_id: entry.content_id,
                content_type: entry.content_type,
                file,
            });
        }
    }

    Ok((attachments, vendor_info))
}

/// One entry in the `attachment-info` blob, keyed by the same
/// `attachmentN` name as the file field it describes.
#[derive(Debug, Clone, Deserialize)]
struct AttachmentInfoEntry {
    filename: Option<String>,
    #[allow(dead_code)]
    name: Option<String>,
    #[serde(rename = "type")]
    content_type: Option<String>,
    #[serde(rename = "content-id")]
    content_id: Option<String>,
}

pub mod adapters;
pub mod addresses;
pub mod email;
pub mod form;
pub mod json;
pub mod registry;

pub use email::{
    AdapterError, AttachmentInfo, InboundEmailAdapter, NormalizedEmail, SpamReport, UploadedFile,
    VendorSpecific,
};
pub use form::{FormParams, FormValue};
pub use registry::AdapterRegistry;

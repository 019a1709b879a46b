//! Inbound email adapters, one per webhook provider.
//!
//! Each adapter implements `InboundEmailAdapter` and registers under its
//! provider key in `AdapterRegistry::with_defaults`.

pub mod sendgrid;

pub use sendgrid::SendgridInboundAdapter;

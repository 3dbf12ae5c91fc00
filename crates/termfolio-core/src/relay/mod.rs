//! Relay endpoint models and the outbound ports they depend on.

pub mod model;
pub mod port;
pub mod user_agent;

pub use model::{
    ContactRequest, Coordinates, FingerprintReport, IpDetails, OutboundEmail, RelayResponse,
};
pub use port::{ContactChannel, IpLookup, MailTransport, WebhookSender};

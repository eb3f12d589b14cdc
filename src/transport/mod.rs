//! HTTP transport: one attempt, no policy.

pub mod http;

pub use http::{HttpTransport, MultipartPayload, Outgoing, RequestBody, TransportError, REQUEST_ID_HEADER};

//! Rancher API access: container lookup, exec grants and the exec stream

mod client;
mod resolver;
mod select;
mod stream;

pub use client::{name_filter, normalize_base_url, parse_document, ExecGrant, ExecRequest, RancherClient};
pub use resolver::RancherResolver;
pub use select::{select_container, MAX_SELECTION_ATTEMPTS};
pub use stream::{connect_stream, WsSink, WsSource, WsStream};

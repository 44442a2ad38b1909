pub mod client_config;
pub mod endpoint;
pub mod firewall;
pub mod network;
pub mod node;
pub mod operation_output;
pub mod payload;
pub mod proxmox_connection;
pub mod record;
pub mod storage;
pub mod task;
pub mod vm;

pub use client_config::{ClientConfig, RateLimitConfig};
pub use endpoint::{ApiMethod, EndpointDescriptor, ParamKind, ParamSpec, PathTemplate};
pub use operation_output::OperationOutput;
pub use payload::{Params, Payload};
pub(crate) use payload::Envelope;
pub use proxmox_connection::ProxmoxConnection;
pub use record::{Record, RecordKind};

mod node_name;
mod proxmox_api_token;
mod proxmox_url;
mod resource_id;

pub use node_name::NodeName;
pub use proxmox_api_token::ProxmoxApiToken;
pub use proxmox_url::{API_PREFIX, ProxmoxUrl};
pub use resource_id::ResourceId;

// Re-export validation functions for internal use
pub(crate) use node_name::validate_node_name;

use crate::core::domain::value_object::{ProxmoxApiToken, ProxmoxUrl};

/// Where to reach the remote API and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    proxmox_url: ProxmoxUrl,
    api_token: ProxmoxApiToken,
}

impl ProxmoxConnection {
    pub fn new(proxmox_url: ProxmoxUrl, api_token: ProxmoxApiToken) -> Self {
        Self {
            proxmox_url,
            api_token,
        }
    }

    pub fn proxmox_url(&self) -> &ProxmoxUrl {
        &self.proxmox_url
    }

    pub fn api_token(&self) -> &ProxmoxApiToken {
        &self.api_token
    }
}

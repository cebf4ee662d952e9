use serde::{Deserialize, Serialize};

use super::networks::VpnProtocol;

/// A VPN user, valid for every protocol listed in `VPNType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "VPNType", default)]
    pub vpn_type: Vec<VpnProtocol>,
}

impl Credentials {
    pub fn allows(&self, protocol: VpnProtocol) -> bool {
        self.vpn_type.contains(&protocol)
    }
}

/// WireGuard server interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireguardServerConfig {
    #[serde(rename = "InterfaceName", default = "default_wg_name")]
    pub interface_name: String,
    #[serde(rename = "ListenPort", default = "default_wg_port")]
    pub listen_port: u16,
    /// Tunnel subnet; the first host is the server address.
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "PrivateKey", default)]
    pub private_key: Option<String>,
    #[serde(rename = "Mtu", default)]
    pub mtu: Option<u16>,
    /// LAN network whose routing table tunnel traffic uses.
    #[serde(rename = "Network", default)]
    pub network: Option<String>,
}

fn default_wg_name() -> String {
    "wireguard-server".to_string()
}

fn default_wg_port() -> u16 {
    13231
}

/// Transport of the OpenVPN server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenVpnTransport {
    #[default]
    Udp,
    Tcp,
}

impl OpenVpnTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenVpnTransport::Udp => "udp",
            OpenVpnTransport::Tcp => "tcp",
        }
    }
}

/// OpenVPN server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenVpnServerConfig {
    #[serde(rename = "Port", default = "default_ovpn_port")]
    pub port: u16,
    #[serde(rename = "Protocol", default)]
    pub protocol: OpenVpnTransport,
    #[serde(rename = "AddressRange")]
    pub address_range: String,
    /// Existing certificate name; when absent a self-signed one is generated.
    #[serde(rename = "Certificate", default)]
    pub certificate: Option<String>,
    #[serde(rename = "RequireClientCertificate", default)]
    pub require_client_certificate: bool,
    #[serde(rename = "Cipher", default = "default_ovpn_cipher")]
    pub cipher: String,
    #[serde(rename = "Auth", default = "default_ovpn_auth")]
    pub auth: String,
    #[serde(rename = "Network", default)]
    pub network: Option<String>,
}

fn default_ovpn_port() -> u16 {
    1194
}

fn default_ovpn_cipher() -> String {
    "aes256-gcm".to_string()
}

fn default_ovpn_auth() -> String {
    "sha256".to_string()
}

/// PPTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PptpServerConfig {
    #[serde(rename = "AddressRange")]
    pub address_range: String,
    #[serde(rename = "KeepaliveTimeout", default)]
    pub keepalive_timeout: Option<u32>,
    #[serde(rename = "Network", default)]
    pub network: Option<String>,
}

/// L2TP server settings, optionally wrapped in IPsec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2tpServerConfig {
    #[serde(rename = "AddressRange")]
    pub address_range: String,
    /// Pre-shared key; IPsec is required when set.
    #[serde(rename = "IpsecSecret", default)]
    pub ipsec_secret: Option<String>,
    #[serde(rename = "Network", default)]
    pub network: Option<String>,
}

/// SSTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SstpServerConfig {
    #[serde(rename = "Port", default = "default_sstp_port")]
    pub port: u16,
    #[serde(rename = "AddressRange")]
    pub address_range: String,
    #[serde(rename = "Certificate", default)]
    pub certificate: Option<String>,
    #[serde(rename = "Network", default)]
    pub network: Option<String>,
}

fn default_sstp_port() -> u16 {
    443
}

/// IKEv2 (IPsec) server settings. Users authenticate with per-user pre-shared keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ikev2ServerConfig {
    #[serde(rename = "AddressRange")]
    pub address_range: String,
    /// DNS handed to clients; defaults to the first address of the range.
    #[serde(rename = "DnsServer", default)]
    pub dns_server: Option<String>,
}

/// Every VPN server the router should run, plus the user list they share.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpnServerState {
    #[serde(rename = "Users")]
    pub users: Vec<Credentials>,
    #[serde(rename = "WireguardServers")]
    pub wireguard_servers: Vec<WireguardServerConfig>,
    #[serde(rename = "OpenVpnServer")]
    pub openvpn_server: Option<OpenVpnServerConfig>,
    #[serde(rename = "PptpServer")]
    pub pptp_server: Option<PptpServerConfig>,
    #[serde(rename = "L2tpServer")]
    pub l2tp_server: Option<L2tpServerConfig>,
    #[serde(rename = "SstpServer")]
    pub sstp_server: Option<SstpServerConfig>,
    #[serde(rename = "Ikev2Server")]
    pub ikev2_server: Option<Ikev2ServerConfig>,
}

impl VpnServerState {
    /// Users allowed on `protocol`, in input order.
    pub fn users_for(&self, protocol: VpnProtocol) -> impl Iterator<Item = &Credentials> {
        self.users.iter().filter(move |u| u.allows(protocol))
    }
}

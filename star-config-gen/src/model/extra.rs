use serde::{Deserialize, Serialize};

use super::networks::NetworkType;

/// Desired state of one `/ip service` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    Enable,
    Disable,
    /// Enabled, reachable from private address ranges only.
    Local,
}

/// Router management services. `None` leaves the factory setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    #[serde(rename = "api")]
    pub api: Option<ServiceState>,
    #[serde(rename = "apissl")]
    pub api_ssl: Option<ServiceState>,
    #[serde(rename = "ftp")]
    pub ftp: Option<ServiceState>,
    #[serde(rename = "ssh")]
    pub ssh: Option<ServiceState>,
    #[serde(rename = "telnet")]
    pub telnet: Option<ServiceState>,
    #[serde(rename = "winbox")]
    pub winbox: Option<ServiceState>,
    #[serde(rename = "web")]
    pub web: Option<ServiceState>,
    #[serde(rename = "webssl")]
    pub web_ssl: Option<ServiceState>,
}

impl Services {
    /// `(RouterOS service name, state)` in `/ip service print` order.
    pub fn entries(&self) -> [(&'static str, Option<ServiceState>); 8] {
        [
            ("telnet", self.telnet),
            ("ftp", self.ftp),
            ("www", self.web),
            ("ssh", self.ssh),
            ("www-ssl", self.web_ssl),
            ("api", self.api),
            ("winbox", self.winbox),
            ("api-ssl", self.api_ssl),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleInterval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ScheduleInterval {
    pub fn as_routeros(self) -> &'static str {
        match self {
            ScheduleInterval::Daily => "1d",
            ScheduleInterval::Weekly => "7d",
            ScheduleInterval::Monthly => "30d",
        }
    }
}

/// A recurring job time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "Hour")]
    pub hour: u8,
    #[serde(rename = "Minute", default)]
    pub minute: u8,
    #[serde(rename = "Interval", default)]
    pub interval: ScheduleInterval,
}

/// Uplink a game's traffic is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameLink {
    Foreign,
    Domestic,
    Vpn,
    None,
}

impl GameLink {
    /// Network whose routing table the game uses, `None` for [`GameLink::None`].
    pub fn network(self) -> Option<NetworkType> {
        match self {
            GameLink::Foreign => Some(NetworkType::Foreign),
            GameLink::Domestic => Some(NetworkType::Domestic),
            GameLink::Vpn => Some(NetworkType::Vpn),
            GameLink::None => None,
        }
    }
}

/// A game chosen in the wizard and the link it should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSelection {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Link")]
    pub link: GameLink,
}

/// System-level extras applied after the network pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraConfigState {
    #[serde(rename = "RouterIdentity")]
    pub router_identity: Option<String>,
    #[serde(rename = "Services")]
    pub services: Services,
    #[serde(rename = "AutoReboot")]
    pub auto_reboot: Option<Schedule>,
    #[serde(rename = "Update")]
    pub update: Option<Schedule>,
    #[serde(rename = "Timezone")]
    pub timezone: Option<String>,
    #[serde(rename = "NtpServers")]
    pub ntp_servers: Vec<String>,
    #[serde(rename = "DDNS")]
    pub ddns: bool,
    #[serde(rename = "DnsServers")]
    pub dns_servers: Vec<String>,
    #[serde(rename = "AutoUpgrade")]
    pub auto_upgrade: bool,
    #[serde(rename = "RoMON")]
    pub romon: bool,
    #[serde(rename = "Graphing")]
    pub graphing: bool,
    #[serde(rename = "Games")]
    pub games: Vec<GameSelection>,
    /// Links balanced by PCC rules; pinned game rules are not emitted for them.
    #[serde(rename = "LoadBalancedLinks")]
    pub load_balanced_links: Vec<GameLink>,
}

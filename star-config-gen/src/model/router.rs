use serde::{Deserialize, Serialize};

/// How the routers of a topology cooperate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RouterMode {
    /// One master router carries every network to slaves over a VLAN trunk.
    #[serde(rename = "Trunk Mode")]
    Trunk,
    /// Single router, additional units act as plain access points.
    #[default]
    #[serde(rename = "AP Mode")]
    AccessPoint,
}

/// Physical ports of a router model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterInterfaces {
    #[serde(rename = "ethernet")]
    pub ethernet: Vec<String>,
    #[serde(rename = "sfp")]
    pub sfp: Vec<String>,
    /// Default names of the radios (`wifi1`, `wifi2`).
    #[serde(rename = "wireless")]
    pub wireless: Vec<String>,
    /// Ports already used for WAN links or other purposes.
    #[serde(rename = "occupied")]
    pub occupied: Vec<String>,
}

impl RouterInterfaces {
    pub fn is_occupied(&self, name: &str) -> bool {
        self.occupied.iter().any(|o| o == name)
    }

    pub fn is_wireless(&self, name: &str) -> bool {
        self.wireless.iter().any(|w| w == name)
    }
}

/// One physical router in the topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterModel {
    #[serde(rename = "isMaster", default)]
    pub is_master: bool,
    /// Interface carrying the VLAN trunk towards the other router.
    #[serde(rename = "MasterSlaveInterface", default)]
    pub master_slave_interface: Option<String>,
    #[serde(rename = "Interfaces", default)]
    pub interfaces: RouterInterfaces,
    #[serde(rename = "Model", default)]
    pub model: String,
}

impl RouterModel {
    pub fn is_wifi_capable(&self) -> bool {
        !self.interfaces.wireless.is_empty()
    }

    /// Trunk interface, ignoring blank values.
    pub fn trunk_interface(&self) -> Option<&str> {
        self.master_slave_interface
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Wired ports that are free for LAN use: not the trunk and not occupied.
    pub fn free_wired_ports(&self) -> impl Iterator<Item = &str> {
        let trunk = self.trunk_interface();
        self.interfaces
            .ethernet
            .iter()
            .chain(self.interfaces.sfp.iter())
            .map(String::as_str)
            .filter(move |p| Some(*p) != trunk && !self.interfaces.is_occupied(p))
    }
}

/// Router role selection from the wizard's first step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChooseState {
    #[serde(rename = "Mode", default)]
    pub mode: RouterMode,
    #[serde(rename = "RouterModels", default)]
    pub router_models: Vec<RouterModel>,
}

impl ChooseState {
    pub fn master(&self) -> Option<&RouterModel> {
        self.router_models.iter().find(|r| r.is_master)
    }

    pub fn slaves(&self) -> impl Iterator<Item = &RouterModel> {
        self.router_models.iter().filter(|r| !r.is_master)
    }
}

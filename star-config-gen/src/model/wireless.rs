use serde::{Deserialize, Serialize};

use super::networks::NetworkType;

/// One logical WiFi network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessConfig {
    #[serde(rename = "SSID")]
    pub ssid: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "isHide", default)]
    pub is_hide: bool,
    #[serde(rename = "isDisabled", default)]
    pub is_disabled: bool,
    /// Broadcast per-band SSIDs (`<SSID> 2.4` / `<SSID> 5`).
    #[serde(rename = "SplitBand", default)]
    pub split_band: bool,
    #[serde(rename = "WifiTarget")]
    pub wifi_target: NetworkType,
    /// Sub-network of the target (an extended or VPN-client network name).
    #[serde(rename = "NetworkName", default)]
    pub network_name: Option<String>,
    /// Owns the physical radio of each band instead of becoming a virtual AP.
    #[serde(rename = "IsPrimary", default)]
    pub is_primary: bool,
}

impl WirelessConfig {
    /// Name of the network this WiFi bridges into.
    pub fn target_network(&self) -> &str {
        self.network_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(self.wifi_target.as_str())
    }
}

/// A radio band of the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WifiBand {
    Band2G,
    Band5G,
}

impl WifiBand {
    pub const ALL: [WifiBand; 2] = [WifiBand::Band2G, WifiBand::Band5G];

    /// Factory default interface name of the band's radio.
    pub fn default_name(self) -> &'static str {
        match self {
            WifiBand::Band2G => "wifi2",
            WifiBand::Band5G => "wifi1",
        }
    }

    /// Name the radio is renamed to.
    pub fn interface_name(self) -> &'static str {
        match self {
            WifiBand::Band2G => "wifi2.4",
            WifiBand::Band5G => "wifi5",
        }
    }

    /// Suffix appended to split-band SSIDs.
    pub fn ssid_suffix(self) -> &'static str {
        match self {
            WifiBand::Band2G => "2.4",
            WifiBand::Band5G => "5",
        }
    }

    /// Band of a radio default name or renamed interface.
    pub fn from_interface(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.default_name() == name || b.interface_name() == name)
    }
}

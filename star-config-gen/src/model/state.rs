use serde::{Deserialize, Serialize};

use super::extra::ExtraConfigState;
use super::networks::{Networks, Subnets};
use super::router::ChooseState;
use super::vpn::VpnServerState;
use super::wireless::WirelessConfig;

/// Immutable snapshot of everything the wizard collected.
///
/// Generators only read from it; a topology file is a serialized `StarState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarState {
    #[serde(rename = "Choose")]
    pub choose: ChooseState,
    #[serde(rename = "Networks")]
    pub networks: Networks,
    #[serde(rename = "Subnets")]
    pub subnets: Option<Subnets>,
    #[serde(rename = "WirelessConfigs")]
    pub wireless: Vec<WirelessConfig>,
    #[serde(rename = "ExtraConfig")]
    pub extra: ExtraConfigState,
    #[serde(rename = "VPNServer")]
    pub vpn_server: Option<VpnServerState>,
}

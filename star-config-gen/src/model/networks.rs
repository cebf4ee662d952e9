use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The four canonical network categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkType {
    Split,
    Domestic,
    Foreign,
    #[serde(rename = "VPN")]
    Vpn,
}

impl NetworkType {
    /// Fixed emission order of base networks.
    pub const ALL: [NetworkType; 4] = [
        NetworkType::Split,
        NetworkType::Domestic,
        NetworkType::Foreign,
        NetworkType::Vpn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkType::Split => "Split",
            NetworkType::Domestic => "Domestic",
            NetworkType::Foreign => "Foreign",
            NetworkType::Vpn => "VPN",
        }
    }

    /// Reserved VLAN id of the base network.
    pub fn base_vlan_id(self) -> u16 {
        match self {
            NetworkType::Split => 10,
            NetworkType::Domestic => 20,
            NetworkType::Foreign => 30,
            NetworkType::Vpn => 40,
        }
    }

    /// Exact, case-sensitive match on the canonical spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VPN protocols, in the fixed order used for enumeration and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VpnProtocol {
    Wireguard,
    #[serde(rename = "OpenVPN")]
    OpenVpn,
    #[serde(rename = "L2TP")]
    L2tp,
    #[serde(rename = "PPTP")]
    Pptp,
    #[serde(rename = "SSTP")]
    Sstp,
    #[serde(rename = "IKev2")]
    Ikev2,
}

impl VpnProtocol {
    pub const ALL: [VpnProtocol; 6] = [
        VpnProtocol::Wireguard,
        VpnProtocol::OpenVpn,
        VpnProtocol::L2tp,
        VpnProtocol::Pptp,
        VpnProtocol::Sstp,
        VpnProtocol::Ikev2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VpnProtocol::Wireguard => "Wireguard",
            VpnProtocol::OpenVpn => "OpenVPN",
            VpnProtocol::L2tp => "L2TP",
            VpnProtocol::Pptp => "PPTP",
            VpnProtocol::Sstp => "SSTP",
            VpnProtocol::Ikev2 => "IKev2",
        }
    }

    /// First VLAN id of this protocol's client-network range.
    pub fn vlan_base(self) -> u16 {
        match self {
            VpnProtocol::Wireguard => 50,
            VpnProtocol::OpenVpn => 60,
            VpnProtocol::L2tp => 70,
            VpnProtocol::Pptp => 75,
            VpnProtocol::Sstp => 80,
            VpnProtocol::Ikev2 => 85,
        }
    }

    /// Number of VLAN ids reserved for this protocol's client networks.
    pub fn vlan_capacity(self) -> u16 {
        match self {
            VpnProtocol::Wireguard | VpnProtocol::OpenVpn => 10,
            VpnProtocol::L2tp | VpnProtocol::Pptp | VpnProtocol::Sstp | VpnProtocol::Ikev2 => 5,
        }
    }
}

impl Display for VpnProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per VPN protocol, keyed by the protocol's wizard spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerProtocol<T> {
    #[serde(rename = "Wireguard")]
    pub wireguard: T,
    #[serde(rename = "OpenVPN")]
    pub openvpn: T,
    #[serde(rename = "L2TP")]
    pub l2tp: T,
    #[serde(rename = "PPTP")]
    pub pptp: T,
    #[serde(rename = "SSTP")]
    pub sstp: T,
    #[serde(rename = "IKev2")]
    pub ikev2: T,
}

impl<T> PerProtocol<T> {
    pub fn get(&self, protocol: VpnProtocol) -> &T {
        match protocol {
            VpnProtocol::Wireguard => &self.wireguard,
            VpnProtocol::OpenVpn => &self.openvpn,
            VpnProtocol::L2tp => &self.l2tp,
            VpnProtocol::Pptp => &self.pptp,
            VpnProtocol::Sstp => &self.sstp,
            VpnProtocol::Ikev2 => &self.ikev2,
        }
    }

    pub fn get_mut(&mut self, protocol: VpnProtocol) -> &mut T {
        match protocol {
            VpnProtocol::Wireguard => &mut self.wireguard,
            VpnProtocol::OpenVpn => &mut self.openvpn,
            VpnProtocol::L2tp => &mut self.l2tp,
            VpnProtocol::Pptp => &mut self.pptp,
            VpnProtocol::Sstp => &mut self.sstp,
            VpnProtocol::Ikev2 => &mut self.ikev2,
        }
    }

    /// `(protocol, value)` pairs in protocol order.
    pub fn iter(&self) -> impl Iterator<Item = (VpnProtocol, &T)> {
        VpnProtocol::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Presence flags for the four base networks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseNetworks {
    #[serde(rename = "Split")]
    pub split: bool,
    #[serde(rename = "Domestic")]
    pub domestic: bool,
    #[serde(rename = "Foreign")]
    pub foreign: bool,
    #[serde(rename = "VPN")]
    pub vpn: bool,
}

impl BaseNetworks {
    pub fn all() -> Self {
        Self {
            split: true,
            domestic: true,
            foreign: true,
            vpn: true,
        }
    }

    pub fn is_enabled(&self, kind: NetworkType) -> bool {
        match kind {
            NetworkType::Split => self.split,
            NetworkType::Domestic => self.domestic,
            NetworkType::Foreign => self.foreign,
            NetworkType::Vpn => self.vpn,
        }
    }

    pub fn set(&mut self, kind: NetworkType, enabled: bool) {
        match kind {
            NetworkType::Split => self.split = enabled,
            NetworkType::Domestic => self.domestic = enabled,
            NetworkType::Foreign => self.foreign = enabled,
            NetworkType::Vpn => self.vpn = enabled,
        }
    }

    /// Enabled base networks in emission order.
    pub fn enabled(&self) -> impl Iterator<Item = NetworkType> + '_ {
        NetworkType::ALL
            .into_iter()
            .filter(move |t| self.is_enabled(*t))
    }
}

/// Which logical networks exist in the topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Networks {
    #[serde(rename = "BaseNetworks")]
    pub base_networks: BaseNetworks,
    #[serde(rename = "ForeignNetworks")]
    pub foreign_networks: Vec<String>,
    #[serde(rename = "DomesticNetworks")]
    pub domestic_networks: Vec<String>,
    #[serde(rename = "VPNClientNetworks")]
    pub vpn_client_networks: PerProtocol<Vec<String>>,
}

impl Networks {
    /// Extended network names of a base category (`Foreign` or `Domestic`).
    pub fn extended(&self, kind: NetworkType) -> &[String] {
        match kind {
            NetworkType::Foreign => &self.foreign_networks,
            NetworkType::Domestic => &self.domestic_networks,
            NetworkType::Split | NetworkType::Vpn => &[],
        }
    }
}

/// A named network's subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetEntry {
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "subnet", default)]
    pub subnet: String,
}

/// Subnets of the base networks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseSubnets {
    #[serde(rename = "Split")]
    pub split: Option<String>,
    #[serde(rename = "Domestic")]
    pub domestic: Option<String>,
    #[serde(rename = "Foreign")]
    pub foreign: Option<String>,
    #[serde(rename = "VPN")]
    pub vpn: Option<String>,
}

/// Parallel structure to [`Networks`] carrying each network's CIDR subnet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subnets {
    #[serde(rename = "BaseSubnets")]
    pub base_subnets: BaseSubnets,
    #[serde(rename = "ForeignSubnets")]
    pub foreign_subnets: Vec<SubnetEntry>,
    #[serde(rename = "DomesticSubnets")]
    pub domestic_subnets: Vec<SubnetEntry>,
    #[serde(rename = "VPNClientSubnets")]
    pub vpn_client_subnets: PerProtocol<Vec<SubnetEntry>>,
}

impl Subnets {
    /// Non-empty subnet of a base network.
    pub fn base(&self, kind: NetworkType) -> Option<&str> {
        let value = match kind {
            NetworkType::Split => &self.base_subnets.split,
            NetworkType::Domestic => &self.base_subnets.domestic,
            NetworkType::Foreign => &self.base_subnets.foreign,
            NetworkType::Vpn => &self.base_subnets.vpn,
        };
        non_empty(value.as_deref())
    }

    /// Non-empty subnet of an extended Foreign/Domestic network.
    pub fn extended(&self, kind: NetworkType, name: &str) -> Option<&str> {
        let entries = match kind {
            NetworkType::Foreign => &self.foreign_subnets,
            NetworkType::Domestic => &self.domestic_subnets,
            NetworkType::Split | NetworkType::Vpn => return None,
        };
        lookup(entries, name)
    }

    /// Non-empty subnet of a VPN-client network.
    pub fn vpn_client(&self, protocol: VpnProtocol, name: &str) -> Option<&str> {
        lookup(self.vpn_client_subnets.get(protocol), name)
    }
}

fn lookup<'a>(entries: &'a [SubnetEntry], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| e.name == name)
        .and_then(|e| non_empty(Some(e.subnet.as_str())))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! Network identity rules.
//!
//! Every generated name derives from a network's type and optional extension
//! name, so bridges, VLANs and routing tables created by different
//! generators always agree:
//!
//! | network          | bridge                            | routing table          |
//! |------------------|-----------------------------------|------------------------|
//! | `Domestic`       | `LANBridgeDomestic`               | `to-Domestic`          |
//! | `Foreign-Office` | `LANBridgeForeign-Foreign-Office` | `to-Foreign-Foreign-Office` |
//! | `US` (VPN client)| `LANBridgeVPN-US`                 | `to-VPN-US`            |
//!
//! Reverse lookups search base networks first, then `ForeignNetworks`,
//! `DomesticNetworks`, and finally the VPN-client lists in protocol order.
//! The first match wins.

use crate::model::{NetworkType, Networks};

/// `LANBridge<type>` or `LANBridge<type>-<name>`.
pub fn bridge_name(kind: NetworkType, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("LANBridge{kind}-{name}"),
        None => format!("LANBridge{kind}"),
    }
}

/// `vlan<id>-<full name>`.
pub fn vlan_name(vlan_id: u16, full_name: &str) -> String {
    format!("vlan{vlan_id}-{full_name}")
}

/// `to-<type>` or `to-<type>-<name>`.
pub fn routing_table_name(kind: NetworkType, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("to-{kind}-{name}"),
        None => format!("to-{kind}"),
    }
}

/// Resolve a network name to its type and extension name.
pub fn resolve_network<'a>(
    network_name: &'a str,
    networks: &'a Networks,
) -> Option<(NetworkType, Option<&'a str>)> {
    if let Some(kind) = NetworkType::from_name(network_name) {
        if networks.base_networks.is_enabled(kind) {
            return Some((kind, None));
        }
    }

    for kind in [NetworkType::Foreign, NetworkType::Domestic] {
        if let Some(found) = networks
            .extended(kind)
            .iter()
            .find(|n| n.as_str() == network_name)
        {
            return Some((kind, Some(found.as_str())));
        }
    }

    networks
        .vpn_client_networks
        .iter()
        .find_map(|(_, names)| names.iter().find(|n| n.as_str() == network_name))
        .map(|found| (NetworkType::Vpn, Some(found.as_str())))
}

/// Bridge that carries `network_name`, or `None` when the name is unknown.
pub fn map_network_to_bridge_name(network_name: &str, networks: &Networks) -> Option<String> {
    resolve_network(network_name, networks).map(|(kind, name)| bridge_name(kind, name))
}

/// Routing table of `network_name`.
///
/// `Split` never has a routing table since it is bridged straight through.
pub fn map_network_to_routing_table(network_name: &str, networks: &Networks) -> Option<String> {
    match resolve_network(network_name, networks)? {
        (NetworkType::Split, None) => None,
        (kind, name) => Some(routing_table_name(kind, name)),
    }
}

//! Flattening a [`Networks`] descriptor into ordered [`ActiveNetwork`] records.
//!
//! ## Order
//!
//! 1. Base networks: Split, Domestic, Foreign, VPN
//! 2. `ForeignNetworks` in list order
//! 3. `DomesticNetworks` in list order
//! 4. VPN-client networks per protocol: Wireguard, OpenVPN, L2TP, PPTP, SSTP, IKev2
//!
//! The order is significant: every generator emits its commands in it.
//!
//! ## VLAN ids
//!
//! Base networks use their fixed id (10/20/30/40). Extended networks take
//! `base + index + 1` and VPN-client networks `protocol base + index`, where
//! `index` is the position in the input list. Each category owns a fixed
//! range and overflowing it is an error rather than a silent collision.
//!
//! ## Subnets
//!
//! When a [`Subnets`] structure is supplied, any network whose subnet is
//! missing or blank is skipped. Skipping does not shift later VLAN ids.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::NetworkError;
use crate::model::{NetworkType, Networks, Subnets, VpnProtocol};
use crate::naming::{bridge_name, routing_table_name, vlan_name};

/// Extended networks may use ids `base + 1 ..= base + 9`.
const EXTENDED_CAPACITY: u16 = 9;

/// Where an active network came from in the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NetworkOrigin {
    Base,
    Extended,
    VpnClient(VpnProtocol),
}

/// One enumerated, identity-resolved network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveNetwork {
    pub kind: NetworkType,
    pub origin: NetworkOrigin,
    pub name: Option<String>,
    pub vlan_id: u16,
    pub bridge_name: String,
    pub vlan_name: String,
    pub subnet: Option<String>,
}

impl ActiveNetwork {
    fn new(
        kind: NetworkType,
        origin: NetworkOrigin,
        name: Option<&str>,
        vlan_id: u16,
        subnet: Option<&str>,
    ) -> Self {
        let full_name = name.unwrap_or(kind.as_str());
        Self {
            kind,
            origin,
            name: name.map(ToOwned::to_owned),
            vlan_id,
            bridge_name: bridge_name(kind, name),
            vlan_name: vlan_name(vlan_id, full_name),
            subnet: subnet.map(ToOwned::to_owned),
        }
    }

    /// The type for base networks, otherwise the extension name.
    pub fn full_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.as_str())
    }

    pub fn routing_table(&self) -> String {
        routing_table_name(self.kind, self.name.as_deref())
    }

    /// Table that traffic of this network is looked up in. Base `Split` has none.
    pub fn lookup_table(&self) -> Option<String> {
        match (self.kind, self.origin) {
            (NetworkType::Split, NetworkOrigin::Base) => None,
            _ => Some(self.routing_table()),
        }
    }
}

/// The enumerated network called `network_name`.
///
/// Full names are unique after enumeration, so this agrees with
/// [`resolve_network`](crate::naming::resolve_network) for every network
/// that was actually built. Networks skipped for a missing subnet are `None`.
pub fn find_active<'a>(
    active: &'a [ActiveNetwork],
    network_name: &str,
) -> Option<&'a ActiveNetwork> {
    active.iter().find(|n| n.full_name() == network_name)
}

/// Hands out VLAN ids from per-category ranges and refuses reuse.
#[derive(Debug, Default)]
struct VlanAllocator {
    used: BTreeMap<u16, String>,
}

impl VlanAllocator {
    fn allocate(
        &mut self,
        first: u16,
        capacity: u16,
        index: usize,
        category: &str,
        owner: &str,
    ) -> Result<u16, NetworkError> {
        let offset = u16::try_from(index)
            .ok()
            .filter(|o| *o < capacity)
            .ok_or_else(|| NetworkError::RangeExhausted {
                category: category.to_string(),
                requested: index + 1,
                capacity,
            })?;
        let vlan_id = first + offset;
        self.claim(vlan_id, owner)?;
        Ok(vlan_id)
    }

    fn claim(&mut self, vlan_id: u16, owner: &str) -> Result<(), NetworkError> {
        if let Some(existing) = self.used.get(&vlan_id) {
            return Err(NetworkError::VlanCollision {
                vlan_id,
                name: owner.to_string(),
                existing: existing.clone(),
            });
        }
        self.used.insert(vlan_id, owner.to_string());
        Ok(())
    }
}

/// Full names seen so far, with the category that introduced each.
#[derive(Debug, Default)]
struct NameRegistry {
    names: IndexMap<String, String>,
}

impl NameRegistry {
    fn register(&mut self, name: &str, category: &str) -> Result<(), NetworkError> {
        if name.trim().is_empty() {
            return Err(NetworkError::EmptyName {
                category: category.to_string(),
            });
        }
        if let Some(first) = self.names.get(name) {
            return Err(NetworkError::DuplicateName {
                name: name.to_string(),
                first: first.clone(),
                second: category.to_string(),
            });
        }
        self.names.insert(name.to_string(), category.to_string());
        Ok(())
    }
}

/// Enumerate every active network of `networks` in generation order.
///
/// Name uniqueness is checked across all categories, including entries
/// that end up skipped for a missing subnet.
pub fn enumerate_networks(
    networks: &Networks,
    subnets: Option<&Subnets>,
) -> Result<Vec<ActiveNetwork>, NetworkError> {
    let mut out = Vec::new();
    let mut registry = NameRegistry::default();
    let mut vlans = VlanAllocator::default();

    for kind in networks.base_networks.enabled() {
        registry.register(kind.as_str(), "BaseNetworks")?;
        let subnet = subnets.and_then(|s| s.base(kind));
        if subnets.is_some() && subnet.is_none() {
            tracing::debug!(network = %kind, "skipping base network without subnet");
            continue;
        }
        vlans.claim(kind.base_vlan_id(), kind.as_str())?;
        out.push(ActiveNetwork::new(
            kind,
            NetworkOrigin::Base,
            None,
            kind.base_vlan_id(),
            subnet,
        ));
    }

    for (kind, category) in [
        (NetworkType::Foreign, "ForeignNetworks"),
        (NetworkType::Domestic, "DomesticNetworks"),
    ] {
        for (index, name) in networks.extended(kind).iter().enumerate() {
            registry.register(name, category)?;
            let subnet = subnets.and_then(|s| s.extended(kind, name));
            if subnets.is_some() && subnet.is_none() {
                tracing::debug!(network = %name, "skipping {category} entry without subnet");
                continue;
            }
            let vlan_id = vlans.allocate(
                kind.base_vlan_id() + 1,
                EXTENDED_CAPACITY,
                index,
                category,
                name,
            )?;
            out.push(ActiveNetwork::new(
                kind,
                NetworkOrigin::Extended,
                Some(name),
                vlan_id,
                subnet,
            ));
        }
    }

    for (protocol, names) in networks.vpn_client_networks.iter() {
        let category = format!("VPNClientNetworks.{protocol}");
        for (index, name) in names.iter().enumerate() {
            registry.register(name, &category)?;
            let subnet = subnets.and_then(|s| s.vpn_client(protocol, name));
            if subnets.is_some() && subnet.is_none() {
                tracing::debug!(network = %name, "skipping {category} entry without subnet");
                continue;
            }
            let vlan_id = vlans.allocate(
                protocol.vlan_base(),
                protocol.vlan_capacity(),
                index,
                &category,
                name,
            )?;
            out.push(ActiveNetwork::new(
                NetworkType::Vpn,
                NetworkOrigin::VpnClient(protocol),
                Some(name),
                vlan_id,
                subnet,
            ));
        }
    }

    Ok(out)
}

/// Bridge names of every active network, in enumeration order.
pub fn extract_bridge_names(
    networks: &Networks,
    subnets: Option<&Subnets>,
) -> Result<Vec<String>, NetworkError> {
    Ok(enumerate_networks(networks, subnets)?
        .into_iter()
        .map(|n| n.bridge_name)
        .collect())
}

/// Routing-table names of every active network, in enumeration order.
///
/// Unlike [`map_network_to_routing_table`](crate::naming::map_network_to_routing_table),
/// this lists `to-Split` too; callers creating tables decide what to skip.
pub fn extract_table_names(
    networks: &Networks,
    subnets: Option<&Subnets>,
) -> Result<Vec<String>, NetworkError> {
    Ok(enumerate_networks(networks, subnets)?
        .iter()
        .map(ActiveNetwork::routing_table)
        .collect())
}

/// VLAN ids of every active network, in enumeration order.
pub fn extract_vlan_ids(
    networks: &Networks,
    subnets: Option<&Subnets>,
) -> Result<Vec<u16>, NetworkError> {
    Ok(enumerate_networks(networks, subnets)?
        .into_iter()
        .map(|n| n.vlan_id)
        .collect())
}

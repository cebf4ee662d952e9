//! IPv4 subnet helpers shared by the DHCP and VPN generators.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::error::GeneratorError;

/// Gateway and pool bounds carved out of a LAN subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetPlan {
    pub network: Ipv4Net,
    pub gateway: Ipv4Addr,
    pub pool_start: Ipv4Addr,
    pub pool_end: Ipv4Addr,
}

impl SubnetPlan {
    /// `gateway/prefix`, as assigned to the bridge.
    pub fn gateway_cidr(&self) -> String {
        format!("{}/{}", self.gateway, self.network.prefix_len())
    }

    pub fn pool_range(&self) -> String {
        format!("{}-{}", self.pool_start, self.pool_end)
    }
}

/// Parse `value` as an IPv4 subnet. Host bits are cleared.
pub fn parse_subnet(value: &str, context: &str) -> Result<Ipv4Net, GeneratorError> {
    value
        .trim()
        .parse::<Ipv4Net>()
        .map(|net| net.trunc())
        .map_err(|_| GeneratorError::InvalidSubnet {
            value: value.to_string(),
            context: context.to_string(),
        })
}

/// First host is the gateway, the remaining hosts form the pool.
pub fn plan_subnet(value: &str, context: &str) -> Result<SubnetPlan, GeneratorError> {
    let network = parse_subnet(value, context)?;
    let mut hosts = network.hosts();
    let exhausted = || GeneratorError::AddressPoolExhausted {
        subnet: network.to_string(),
        context: context.to_string(),
    };
    let gateway = hosts.next().ok_or_else(exhausted)?;
    let pool_start = hosts.next().ok_or_else(exhausted)?;
    let pool_end = hosts.next_back().unwrap_or(pool_start);
    Ok(SubnetPlan {
        network,
        gateway,
        pool_start,
        pool_end,
    })
}

/// Host addresses of `network` after the first one, in order.
///
/// The first host belongs to the server side of a tunnel.
pub fn client_hosts(network: Ipv4Net) -> impl Iterator<Item = Ipv4Addr> {
    network.hosts().skip(1)
}

use indexmap::IndexSet;
use ros_script_core::{Command, RouterConfig};

use super::addressing::plan_subnet;
use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;

pub const CLIENT_SECTION: &str = "/ip dhcp-client";
const ADDRESS_SECTION: &str = "/ip address";
const POOL_SECTION: &str = "/ip pool";
const SERVER_SECTION: &str = "/ip dhcp-server";
const SERVER_NETWORK_SECTION: &str = "/ip dhcp-server network";

/// A DHCP client on each distinct bridge, so a slave picks up its address from the master.
pub fn dhcp_clients(networks: &[ActiveNetwork]) -> RouterConfig {
    let bridges: IndexSet<&str> = networks.iter().map(|n| n.bridge_name.as_str()).collect();
    let mut config = RouterConfig::new();
    for bridge in bridges {
        config.push(CLIENT_SECTION, Command::add().attr("interface", bridge));
    }
    config
}

/// Gateway address, pool and DHCP server for every network that has a subnet.
///
/// Networks without a subnet are left unserved.
pub fn dhcp_servers(networks: &[ActiveNetwork]) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    for network in networks {
        let Some(subnet) = network.subnet.as_deref() else {
            tracing::debug!(network = %network.full_name(), "no subnet, skipping DHCP server");
            continue;
        };
        let name = network.full_name();
        let plan = plan_subnet(subnet, name)?;
        let pool = format!("{name}-pool");

        config.push(
            ADDRESS_SECTION,
            Command::add()
                .attr("address", plan.gateway_cidr())
                .attr("interface", &network.bridge_name)
                .quoted("comment", name),
        );
        config.push(
            POOL_SECTION,
            Command::add()
                .attr("name", &pool)
                .attr("ranges", plan.pool_range()),
        );
        config.push(
            SERVER_SECTION,
            Command::add()
                .attr("name", format!("{name}-dhcp"))
                .attr("interface", &network.bridge_name)
                .attr("address-pool", &pool),
        );
        config.push(
            SERVER_NETWORK_SECTION,
            Command::add()
                .attr("address", plan.network)
                .attr("gateway", plan.gateway)
                .attr("dns-server", plan.gateway),
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{dhcp_clients, dhcp_servers};
    use crate::enumerate::enumerate_networks;
    use crate::error::GeneratorError;
    use crate::generate::test_support::sample_networks;
    use crate::model::{SubnetEntry, Subnets};

    #[test]
    fn one_client_per_bridge_in_order() {
        let active = enumerate_networks(&sample_networks(), None).expect("enumerate");
        assert_eq!(
            dhcp_clients(&active).lines("/ip dhcp-client"),
            vec![
                "add interface=LANBridgeSplit",
                "add interface=LANBridgeDomestic",
                "add interface=LANBridgeForeign-Foreign-Office",
            ]
        );
    }

    #[test]
    fn servers_follow_subnets() {
        let mut subnets = Subnets::default();
        subnets.base_subnets.split = Some("192.168.10.0/24".into());
        subnets.base_subnets.domestic = Some("192.168.20.0/24".into());
        subnets.foreign_subnets = vec![SubnetEntry {
            name: "Foreign-Office".into(),
            subnet: "192.168.31.0/24".into(),
        }];
        let active = enumerate_networks(&sample_networks(), Some(&subnets)).expect("enumerate");
        let config = dhcp_servers(&active).expect("dhcp");

        let sections: Vec<&str> = config.section_names().collect();
        assert_eq!(
            sections,
            vec![
                "/ip address",
                "/ip pool",
                "/ip dhcp-server",
                "/ip dhcp-server network"
            ]
        );
        assert_eq!(
            config.lines("/ip address")[0],
            r#"add address=192.168.10.1/24 interface=LANBridgeSplit comment="Split""#
        );
        assert_eq!(
            config.lines("/ip pool")[2],
            "add name=Foreign-Office-pool ranges=192.168.31.2-192.168.31.254"
        );
        assert_eq!(
            config.lines("/ip dhcp-server")[1],
            "add name=Domestic-dhcp interface=LANBridgeDomestic address-pool=Domestic-pool"
        );
        assert_eq!(
            config.lines("/ip dhcp-server network")[0],
            "add address=192.168.10.0/24 gateway=192.168.10.1 dns-server=192.168.10.1"
        );
    }

    #[test]
    fn networks_without_subnets_get_no_server() {
        let active = enumerate_networks(&sample_networks(), None).expect("enumerate");
        assert!(dhcp_servers(&active).expect("dhcp").is_empty());
    }

    #[test]
    fn invalid_subnet_is_an_error() {
        let mut subnets = Subnets::default();
        subnets.base_subnets.split = Some("192.168.300.0/24".into());
        subnets.base_subnets.domestic = Some("192.168.20.0/24".into());
        subnets.foreign_subnets = vec![SubnetEntry {
            name: "Foreign-Office".into(),
            subnet: "192.168.31.0/24".into(),
        }];
        let active = enumerate_networks(&sample_networks(), Some(&subnets)).expect("enumerate");
        assert!(matches!(
            dhcp_servers(&active),
            Err(GeneratorError::InvalidSubnet { .. })
        ));
    }
}

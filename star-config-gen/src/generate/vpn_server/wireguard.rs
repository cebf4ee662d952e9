use ros_script_core::{Command, RouterConfig};

use super::common::accept_input;
use super::VpnServerGenerator;
use crate::enumerate::{find_active, ActiveNetwork};
use crate::error::GeneratorError;
use crate::generate::addressing::{client_hosts, parse_subnet};
use crate::model::{VpnProtocol, VpnServerState, WireguardServerConfig};

const INTERFACE_SECTION: &str = "/interface wireguard";
const PEER_SECTION: &str = "/interface wireguard peers";
const ADDRESS_SECTION: &str = "/ip address";
const LIST_MEMBER_SECTION: &str = "/interface list member";
const ROUTING_RULE_SECTION: &str = "/routing rule";

inventory::submit! {
    VpnServerGenerator {
        protocol: VpnProtocol::Wireguard,
        generate: wireguard_servers,
    }
}

/// Every configured WireGuard server interface with one peer per allowed user.
pub fn wireguard_servers(
    state: &VpnServerState,
    networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    for server in &state.wireguard_servers {
        wireguard_server(&mut config, server, state, networks)?;
    }
    Ok(config)
}

fn wireguard_server(
    config: &mut RouterConfig,
    server: &WireguardServerConfig,
    state: &VpnServerState,
    networks: &[ActiveNetwork],
) -> Result<(), GeneratorError> {
    let iface = server.interface_name.as_str();
    let subnet = parse_subnet(&server.address, iface)?;
    let mut hosts = subnet.hosts();
    let server_address = hosts.next().ok_or_else(|| GeneratorError::AddressPoolExhausted {
        subnet: subnet.to_string(),
        context: iface.to_string(),
    })?;

    config.push(
        INTERFACE_SECTION,
        Command::add()
            .attr("name", iface)
            .attr("listen-port", server.listen_port)
            .attr_opt("mtu", server.mtu)
            .attr_opt("private-key", server.private_key.as_deref()),
    );
    config.push(
        ADDRESS_SECTION,
        Command::add()
            .attr("address", format!("{server_address}/{}", subnet.prefix_len()))
            .attr("interface", iface)
            .quoted("comment", format!("{} server", VpnProtocol::Wireguard)),
    );

    let mut clients = client_hosts(subnet);
    for user in state.users_for(VpnProtocol::Wireguard) {
        let address = clients
            .next()
            .ok_or_else(|| GeneratorError::AddressPoolExhausted {
                subnet: subnet.to_string(),
                context: format!("{iface} peer {}", user.username),
            })?;
        config.push(
            PEER_SECTION,
            Command::add()
                .attr("interface", iface)
                .attr("name", &user.username)
                .attr("allowed-address", format!("{address}/32"))
                .attr("private-key", "auto")
                .quoted("comment", &user.username),
        );
    }

    accept_input(
        config,
        "udp",
        Some(&server.listen_port.to_string()),
        &format!("{} {iface}", VpnProtocol::Wireguard),
    );
    config.push(
        LIST_MEMBER_SECTION,
        Command::add().attr("list", "LAN").attr("interface", iface),
    );

    if let Some(network) = server.network.as_deref() {
        match find_active(networks, network) {
            Some(active) => match active.lookup_table() {
                Some(table) => config.push(
                    ROUTING_RULE_SECTION,
                    Command::add()
                        .attr("src-address", subnet)
                        .attr("action", "lookup")
                        .attr("table", table),
                ),
                None => {
                    tracing::debug!(network = %network, "no routing table for WireGuard network")
                }
            },
            None => tracing::warn!(
                network = %network,
                interface = %iface,
                "WireGuard target network not found or skipped; no routing rule"
            ),
        }
    }
    Ok(())
}

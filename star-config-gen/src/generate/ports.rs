//! Trunk labelling and bridge membership of VLANs and wired ports.

use ros_script_core::{Command, RouterConfig};

use crate::enumerate::ActiveNetwork;
use crate::model::RouterModel;

pub const PORT_SECTION: &str = "/interface bridge port";
const ETHERNET_SECTION: &str = "/interface ethernet";
const WIFI_SECTION: &str = "/interface wifi";

/// Mark the router's trunk interface with a `Trunk Interface` comment.
///
/// Empty when the router has no trunk interface.
pub fn trunk_comment(router: &RouterModel) -> RouterConfig {
    let mut config = RouterConfig::new();
    let Some(trunk) = router.trunk_interface() else {
        return config;
    };
    let section = if router.interfaces.is_wireless(trunk) {
        WIFI_SECTION
    } else {
        ETHERNET_SECTION
    };
    config.push(
        section,
        Command::set_default_name(trunk).quoted("comment", "Trunk Interface"),
    );
    config
}

/// Put each network's VLAN interface into that network's bridge.
pub fn vlans_to_bridges(networks: &[ActiveNetwork]) -> RouterConfig {
    let mut config = RouterConfig::new();
    for network in networks {
        config.push(
            PORT_SECTION,
            Command::add()
                .attr("bridge", &network.bridge_name)
                .attr("interface", &network.vlan_name),
        );
    }
    config
}

/// Add every free wired port to the default bridge, the first network's bridge.
pub fn ethernet_to_bridge(router: &RouterModel, networks: &[ActiveNetwork]) -> RouterConfig {
    let mut config = RouterConfig::new();
    let Some(default_bridge) = networks.first().map(|n| n.bridge_name.as_str()) else {
        return config;
    };
    for port in router.free_wired_ports() {
        config.push(
            PORT_SECTION,
            Command::add()
                .attr("bridge", default_bridge)
                .attr("interface", port),
        );
    }
    config
}

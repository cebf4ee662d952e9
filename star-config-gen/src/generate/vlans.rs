use ros_script_core::{Command, RouterConfig};

use crate::enumerate::ActiveNetwork;

pub const SECTION: &str = "/interface vlan";

/// Tag every active network onto `trunk`.
pub fn vlans(networks: &[ActiveNetwork], trunk: &str) -> RouterConfig {
    let mut config = RouterConfig::new();
    for network in networks {
        config.push(
            SECTION,
            Command::add()
                .attr("name", &network.vlan_name)
                .attr("vlan-id", network.vlan_id)
                .attr("interface", trunk),
        );
    }
    config
}

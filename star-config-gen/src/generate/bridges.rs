use ros_script_core::{Command, RouterConfig};

use crate::enumerate::ActiveNetwork;

pub const SECTION: &str = "/interface bridge";

/// One LAN bridge per active network, in enumeration order.
pub fn bridges(networks: &[ActiveNetwork]) -> RouterConfig {
    let mut config = RouterConfig::new();
    for network in networks {
        config.push(
            SECTION,
            Command::add()
                .attr("name", &network.bridge_name)
                .quoted("comment", network.full_name()),
        );
    }
    config
}

#[cfg(test)]
mod tests {
    use super::bridges;
    use crate::enumerate::enumerate_networks;
    use crate::generate::test_support::sample_networks;

    #[test]
    fn emits_bridge_per_network_with_full_name_comment() {
        let active = enumerate_networks(&sample_networks(), None).expect("enumerate");
        let config = bridges(&active);
        assert_eq!(
            config.lines("/interface bridge"),
            vec![
                r#"add name=LANBridgeSplit comment="Split""#,
                r#"add name=LANBridgeDomestic comment="Domestic""#,
                r#"add name=LANBridgeForeign-Foreign-Office comment="Foreign-Office""#,
            ]
        );
    }

    #[test]
    fn no_networks_means_empty_config() {
        assert!(bridges(&[]).is_empty());
    }
}

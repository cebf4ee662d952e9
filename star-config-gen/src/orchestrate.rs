//! Per-router pipelines that merge generator output into one config.
//!
//! | router | pipeline |
//! |--------|----------|
//! | slave  | bridges → trunk comment → VLANs on trunk → VLANs to bridges → ethernet to bridge → wireless → DHCP clients → extra |
//! | master | bridges → trunk block → DHCP servers → ethernet to bridge → wireless → VPN servers → extra |
//!
//! Unmet preconditions produce an empty config. Handing the master router to
//! [`slave_cg`] is the only error.

use ros_script_core::{merge_configs, RouterConfig};
use serde::Serialize;

use crate::enumerate::{enumerate_networks, ActiveNetwork};
use crate::error::GeneratorError;
use crate::generate::extra::{default_game_catalog, GameCatalog};
use crate::generate::{
    bridges, dhcp_clients, dhcp_servers, ethernet_to_bridge, extra_config, trunk_comment, vlans,
    vlans_to_bridges, vpn_servers, wireless,
};
use crate::model::{RouterMode, RouterModel, StarState};

/// Trunk comment, VLANs on the trunk and their bridge ports.
///
/// Empty when the router has no trunk interface.
pub fn trunk_cg(router: &RouterModel, networks: &[ActiveNetwork]) -> RouterConfig {
    let Some(trunk) = router.trunk_interface() else {
        return RouterConfig::new();
    };
    merge_configs([
        trunk_comment(router),
        vlans(networks, trunk),
        vlans_to_bridges(networks),
    ])
}

/// Configuration of one slave router using the built-in game catalog.
pub fn slave_cg(router: &RouterModel, state: &StarState) -> Result<RouterConfig, GeneratorError> {
    slave_cg_with_catalog(router, state, &default_game_catalog())
}

pub fn slave_cg_with_catalog(
    router: &RouterModel,
    state: &StarState,
    catalog: &GameCatalog,
) -> Result<RouterConfig, GeneratorError> {
    if router.is_master {
        return Err(GeneratorError::NotASlave {
            model: router.model.clone(),
        });
    }
    if state.choose.mode != RouterMode::Trunk {
        tracing::debug!(model = %router.model, "not in trunk mode, nothing to generate for slave");
        return Ok(RouterConfig::new());
    }
    let Some(trunk) = router.trunk_interface() else {
        tracing::debug!(model = %router.model, "slave has no trunk interface");
        return Ok(RouterConfig::new());
    };

    let networks = enumerate_networks(&state.networks, state.subnets.as_ref())?;
    let mut partials = vec![
        bridges(&networks),
        trunk_comment(router),
        vlans(&networks, trunk),
        vlans_to_bridges(&networks),
        ethernet_to_bridge(router, &networks),
    ];
    if router.is_wifi_capable() {
        partials.push(wireless(&state.wireless, &networks, router, Some(trunk)));
    }
    partials.push(dhcp_clients(&networks));
    partials.push(extra_config(&state.extra, catalog)?);
    Ok(merge_configs(partials))
}

/// Configuration of the master router using the built-in game catalog.
pub fn master_cg(state: &StarState) -> Result<RouterConfig, GeneratorError> {
    master_cg_with_catalog(state, &default_game_catalog())
}

pub fn master_cg_with_catalog(
    state: &StarState,
    catalog: &GameCatalog,
) -> Result<RouterConfig, GeneratorError> {
    let Some(router) = state.choose.master() else {
        tracing::debug!("topology has no master router");
        return Ok(RouterConfig::new());
    };
    let networks = enumerate_networks(&state.networks, state.subnets.as_ref())?;

    let trunk = match state.choose.mode {
        RouterMode::Trunk => router.trunk_interface(),
        _ => None,
    };

    let mut partials = vec![bridges(&networks)];
    if trunk.is_some() {
        partials.push(trunk_cg(router, &networks));
    }
    partials.push(dhcp_servers(&networks)?);
    partials.push(ethernet_to_bridge(router, &networks));
    if router.is_wifi_capable() {
        partials.push(wireless(&state.wireless, &networks, router, trunk));
    }
    partials.push(vpn_servers(state.vpn_server.as_ref(), &networks)?);
    partials.push(extra_config(&state.extra, catalog)?);
    Ok(merge_configs(partials))
}

/// Role of a router in a generated topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RouterRole {
    Master,
    Slave,
}

/// Generated configuration of one router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterOutput {
    pub role: RouterRole,
    pub model: String,
    pub config: RouterConfig,
}

/// Master output followed by one output per slave when in trunk mode.
pub fn topology_cg(
    state: &StarState,
    catalog: &GameCatalog,
) -> Result<Vec<RouterOutput>, GeneratorError> {
    let mut outputs = Vec::new();
    if let Some(master) = state.choose.master() {
        outputs.push(RouterOutput {
            role: RouterRole::Master,
            model: master.model.clone(),
            config: master_cg_with_catalog(state, catalog)?,
        });
    }
    if state.choose.mode == RouterMode::Trunk {
        for slave in state.choose.slaves() {
            outputs.push(RouterOutput {
                role: RouterRole::Slave,
                model: slave.model.clone(),
                config: slave_cg_with_catalog(slave, state, catalog)?,
            });
        }
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use ros_script_core::RouterConfig;

    use super::{master_cg, slave_cg, topology_cg, trunk_cg, RouterRole};
    use crate::enumerate::enumerate_networks;
    use crate::error::GeneratorError;
    use crate::generate::extra::default_game_catalog;
    use crate::generate::test_support::sample_networks;
    use crate::model::{
        ChooseState, NetworkType, RouterMode, RouterModel, StarState, SubnetEntry, Subnets,
        WirelessConfig,
    };

    fn slave() -> RouterModel {
        let mut router = RouterModel {
            is_master: false,
            master_slave_interface: Some("ether1".into()),
            model: "hAP ax2".into(),
            ..RouterModel::default()
        };
        router.interfaces.ethernet = vec!["ether1".into(), "ether2".into()];
        router.interfaces.wireless = vec!["wifi1".into(), "wifi2".into()];
        router
    }

    fn master() -> RouterModel {
        let mut router = RouterModel {
            is_master: true,
            master_slave_interface: Some("ether5".into()),
            model: "RB5009".into(),
            ..RouterModel::default()
        };
        router.interfaces.ethernet = vec!["ether1".into(), "ether2".into(), "ether5".into()];
        router.interfaces.occupied = vec!["ether1".into()];
        router
    }

    fn wifi(ssid: &str, target: NetworkType) -> WirelessConfig {
        WirelessConfig {
            ssid: ssid.into(),
            password: "secret123".into(),
            is_hide: false,
            is_disabled: false,
            split_band: false,
            wifi_target: target,
            network_name: None,
            is_primary: false,
        }
    }

    fn state(mode: RouterMode) -> StarState {
        StarState {
            choose: ChooseState {
                mode,
                router_models: vec![master(), slave()],
            },
            networks: sample_networks(),
            wireless: vec![wifi("Home", NetworkType::Split)],
            ..StarState::default()
        }
    }

    /// Sample networks with Domestic dropped for its blank subnet, plus WiFi
    /// and VPN servers that still point at it.
    fn state_with_skipped_network() -> StarState {
        let mut state = state(RouterMode::Trunk);
        let mut subnets = Subnets::default();
        subnets.base_subnets.split = Some("192.168.10.0/24".into());
        subnets.base_subnets.domestic = Some(String::new());
        subnets.foreign_subnets = vec![SubnetEntry {
            name: "Foreign-Office".into(),
            subnet: "192.168.31.0/24".into(),
        }];
        state.subnets = Some(subnets);
        state.wireless.push(wifi("Family", NetworkType::Domestic));
        state.vpn_server = Some(
            serde_json::from_str(
                r#"{
                    "Users": [{"Username": "alice", "Password": "pw", "VPNType": ["L2TP", "OpenVPN", "Wireguard"]}],
                    "L2tpServer": {"AddressRange": "192.168.171.0/24", "Network": "Domestic"},
                    "OpenVpnServer": {"AddressRange": "192.168.172.0/24", "Network": "Foreign-Office"},
                    "WireguardServers": [{"Address": "192.168.170.0/24", "Network": "Domestic"}]
                }"#,
            )
            .expect("vpn json"),
        );
        state
    }

    /// Every `bridge=` reference must name a bridge the same config creates.
    fn assert_referenced_bridges_exist(config: &RouterConfig) {
        let created: HashSet<&str> = config
            .section("/interface bridge")
            .into_iter()
            .flatten()
            .filter_map(|c| c.get("name"))
            .collect();
        for section in ["/interface bridge port", "/ppp profile"] {
            for command in config.section(section).into_iter().flatten() {
                if let Some(bridge) = command.get("bridge") {
                    assert!(
                        created.contains(bridge),
                        "{section}: `{command}` references missing bridge {bridge}"
                    );
                }
            }
        }
    }

    #[test]
    fn slave_cg_rejects_master_router() {
        let err = slave_cg(&master(), &state(RouterMode::Trunk)).expect_err("master");
        assert!(matches!(err, GeneratorError::NotASlave { .. }));
        assert!(err.to_string().contains("slave"));
    }

    #[test]
    fn slave_cg_is_empty_outside_trunk_mode_or_without_trunk() {
        let config = slave_cg(&slave(), &state(RouterMode::AccessPoint)).expect("slave");
        assert!(config.is_empty());

        let mut no_trunk = slave();
        no_trunk.master_slave_interface = None;
        let config = slave_cg(&no_trunk, &state(RouterMode::Trunk)).expect("slave");
        assert_eq!(config.len(), 0);
    }

    #[test]
    fn slave_pipeline_section_order() {
        let config = slave_cg(&slave(), &state(RouterMode::Trunk)).expect("slave");
        let sections: Vec<&str> = config.section_names().collect();
        assert_eq!(
            sections,
            vec![
                "/interface bridge",
                "/interface ethernet",
                "/interface vlan",
                "/interface bridge port",
                "/interface wifi security",
                "/interface wifi",
                "/ip dhcp-client",
            ]
        );
        let ports = config.lines("/interface bridge port");
        assert_eq!(
            ports,
            vec![
                "add bridge=LANBridgeSplit interface=vlan10-Split",
                "add bridge=LANBridgeDomestic interface=vlan20-Domestic",
                "add bridge=LANBridgeForeign-Foreign-Office interface=vlan31-Foreign-Office",
                "add bridge=LANBridgeSplit interface=ether2",
                "add bridge=LANBridgeSplit interface=wifi2.4",
                "add bridge=LANBridgeSplit interface=wifi5",
            ]
        );
    }

    #[test]
    fn slave_without_wifi_skips_wireless() {
        let mut wired = slave();
        wired.interfaces.wireless.clear();
        let config = slave_cg(&wired, &state(RouterMode::Trunk)).expect("slave");
        assert!(config.section("/interface wifi").is_none());
    }

    #[test]
    fn trunk_cg_needs_trunk_interface() {
        let networks = enumerate_networks(&sample_networks(), None).expect("enumerate");
        let mut router = slave();
        assert_eq!(trunk_cg(&router, &networks).len(), 3);
        router.master_slave_interface = Some(String::new());
        assert!(trunk_cg(&router, &networks).is_empty());
    }

    #[test]
    fn master_cg_includes_trunk_only_in_trunk_mode() {
        let trunk = master_cg(&state(RouterMode::Trunk)).expect("master");
        assert_eq!(
            trunk.lines("/interface vlan")[0],
            "add name=vlan10-Split vlan-id=10 interface=ether5"
        );
        assert_eq!(
            trunk.lines("/interface bridge port").last().map(String::as_str),
            Some("add bridge=LANBridgeSplit interface=ether2")
        );

        let ap = master_cg(&state(RouterMode::AccessPoint)).expect("master");
        assert!(ap.section("/interface vlan").is_none());
        assert!(ap.section("/interface ethernet").is_none());
    }

    #[test]
    fn master_cg_without_master_is_empty() {
        let mut state = state(RouterMode::Trunk);
        state.choose.router_models = vec![slave()];
        assert!(master_cg(&state).expect("master").is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let state = state(RouterMode::Trunk);
        let catalog = default_game_catalog();
        let first = topology_cg(&state, &catalog).expect("first");
        let second = topology_cg(&state, &catalog).expect("second");
        assert_eq!(first, second);
        let roles: Vec<RouterRole> = first.iter().map(|o| o.role).collect();
        assert_eq!(roles, vec![RouterRole::Master, RouterRole::Slave]);
    }

    #[test]
    fn duplicate_names_surface_as_network_error() {
        let mut state = state(RouterMode::Trunk);
        state.networks.domestic_networks = vec!["Foreign-Office".into()];
        assert!(matches!(
            master_cg(&state),
            Err(GeneratorError::Network(_))
        ));
    }

    #[test]
    fn wireless_trunk_radio_keeps_carrying_the_trunk() {
        let mut state = state(RouterMode::Trunk);
        let mut radio_slave = slave();
        radio_slave.master_slave_interface = Some("wifi1".into());
        state.choose.router_models = vec![master(), radio_slave.clone()];

        let config = slave_cg(&radio_slave, &state).expect("slave");
        assert_eq!(
            config.lines("/interface vlan")[0],
            "add name=vlan10-Split vlan-id=10 interface=wifi1"
        );
        let wifi = config.lines("/interface wifi");
        assert_eq!(
            wifi[0],
            r#"set [ find default-name=wifi1 ] comment="Trunk Interface""#
        );
        assert!(wifi.iter().skip(1).all(|l| !l.contains("default-name=wifi1")));
        assert!(wifi.iter().all(|l| !l.contains("name=wifi5")));
        let ports = config.lines("/interface bridge port");
        assert!(ports
            .iter()
            .all(|l| !l.contains("interface=wifi1") && !l.contains("interface=wifi5")));
        assert!(ports.contains(&"add bridge=LANBridgeSplit interface=wifi2.4".to_string()));

        state.wireless.clear();
        let config = slave_cg(&radio_slave, &state).expect("slave");
        assert_eq!(
            config.lines("/interface wifi"),
            vec![
                r#"set [ find default-name=wifi1 ] comment="Trunk Interface""#,
                "set [ find default-name=wifi2 ] disabled=yes",
            ]
        );
    }

    #[test]
    fn every_referenced_bridge_is_created() {
        let catalog = default_game_catalog();
        for state in [state(RouterMode::Trunk), state_with_skipped_network()] {
            for output in topology_cg(&state, &catalog).expect("topology") {
                assert_referenced_bridges_exist(&output.config);
            }
        }
    }

    #[test]
    fn skipped_network_is_not_referenced_anywhere() {
        let state = state_with_skipped_network();
        let config = master_cg(&state).expect("master");
        let script = ros_script_core::write(&config);
        assert!(!script.contains("LANBridgeDomestic"));
        assert!(!script.contains("to-Domestic"));
        assert!(config
            .lines("/ppp profile")
            .iter()
            .any(|l| l.contains("bridge=LANBridgeForeign-Foreign-Office")));
    }
}

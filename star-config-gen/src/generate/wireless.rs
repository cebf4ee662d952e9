//! WiFi interfaces, security profiles and their bridge membership.
//!
//! The primary config (explicit `IsPrimary`, otherwise the first active one)
//! takes over the physical radio of each band, which is renamed from its
//! factory name (`wifi2` → `wifi2.4`, `wifi1` → `wifi5`). Every other active
//! config becomes a virtual AP bound to the band's radio with
//! `master-interface=`. Passwords map to `sec1`, `sec2`, ... in order of first
//! use.
//!
//! When no config is active both radios are disabled explicitly.
//!
//! A radio used as the trunk to the master is never touched: it is neither
//! disabled, renamed, turned into an AP nor added to a LAN bridge.

use indexmap::IndexMap;
use ros_script_core::{shorten, Command, RouterConfig};

use super::ports::PORT_SECTION;
use crate::enumerate::{find_active, ActiveNetwork};
use crate::model::{RouterModel, WifiBand, WirelessConfig};

pub const WIFI_SECTION: &str = "/interface wifi";
pub const SECURITY_SECTION: &str = "/interface wifi security";

/// Security profile names keyed by passphrase, first occurrence wins.
#[derive(Debug, Default)]
struct SecurityProfiles {
    by_password: IndexMap<String, String>,
}

impl SecurityProfiles {
    fn profile_for(&mut self, password: &str) -> &str {
        let next = format!("sec{}", self.by_password.len() + 1);
        self.by_password.entry(password.to_string()).or_insert(next)
    }

    fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.by_password.iter().map(|(password, name)| {
            Command::add()
                .attr("name", name)
                .attr("authentication-types", "wpa2-psk,wpa3-psk")
                .quoted("passphrase", password)
        })
    }
}

fn is_trunk(band: WifiBand, trunk: Option<&str>) -> bool {
    trunk.is_some_and(|t| t == band.default_name() || t == band.interface_name())
}

/// Radio bands present on `router` and free for APs, in 2.4 GHz then 5 GHz order.
fn bands(router: &RouterModel, trunk: Option<&str>) -> Vec<WifiBand> {
    WifiBand::ALL
        .into_iter()
        .filter(|band| router.interfaces.is_wireless(band.default_name()))
        .filter(|band| !is_trunk(*band, trunk))
        .collect()
}

fn ssid(config: &WirelessConfig, band: WifiBand) -> String {
    if config.split_band {
        format!("{} {}", config.ssid, band.ssid_suffix())
    } else {
        config.ssid.clone()
    }
}

fn apply_settings(
    command: Command,
    config: &WirelessConfig,
    band: WifiBand,
    security: &str,
) -> Command {
    command
        .quoted("configuration.ssid", ssid(config, band))
        .attr("security", security)
        .flag("configuration.hide-ssid", config.is_hide)
        .flag("disabled", false)
}

/// Index of the config that owns the physical radios.
fn primary_index(active: &[&WirelessConfig]) -> usize {
    active.iter().position(|c| c.is_primary).unwrap_or(0)
}

/// Generate WiFi configuration for `router`.
///
/// `trunk` is the interface carrying the VLAN trunk, when one is in use.
/// Interfaces are bridged only into networks present in `networks`.
pub fn wireless(
    configs: &[WirelessConfig],
    networks: &[ActiveNetwork],
    router: &RouterModel,
    trunk: Option<&str>,
) -> RouterConfig {
    let mut config = RouterConfig::new();
    let bands = bands(router, trunk);
    let active: Vec<&WirelessConfig> = configs.iter().filter(|c| !c.is_disabled).collect();

    if active.is_empty() {
        tracing::debug!(model = %router.model, "no active wireless configs, disabling radios");
        for band in [WifiBand::Band5G, WifiBand::Band2G] {
            if is_trunk(band, trunk) {
                continue;
            }
            config.push(
                WIFI_SECTION,
                Command::set_default_name(band.default_name()).flag("disabled", true),
            );
        }
        return config;
    }
    if bands.is_empty() {
        tracing::debug!(model = %router.model, "no radio free for access points");
        return config;
    }

    let mut security = SecurityProfiles::default();
    let profiles: Vec<String> = active
        .iter()
        .map(|c| security.profile_for(&c.password).to_string())
        .collect();
    config.extend(SECURITY_SECTION, security.commands());

    let primary = primary_index(&active);
    let mut ports: Vec<(String, &WirelessConfig)> = Vec::new();

    for band in bands {
        let radio = band.interface_name();
        let owner = active[primary];
        config.push(
            WIFI_SECTION,
            Command::set_default_name(band.default_name()).attr("name", radio),
        );
        config.push(
            WIFI_SECTION,
            apply_settings(
                Command::set_default_name(band.default_name()),
                owner,
                band,
                &profiles[primary],
            ),
        );
        ports.push((radio.to_string(), owner));

        let virtuals = active
            .iter()
            .zip(&profiles)
            .enumerate()
            .filter(|(idx, _)| *idx != primary)
            .map(|(_, pair)| pair);
        for (slot, (wifi, profile)) in virtuals.enumerate() {
            let name = format!("{radio}-{}", slot + 2);
            config.push(
                WIFI_SECTION,
                apply_settings(
                    Command::add()
                        .attr("name", &name)
                        .attr("master-interface", radio),
                    wifi,
                    band,
                    profile,
                ),
            );
            ports.push((name, *wifi));
        }
    }

    for (interface, wifi) in ports {
        let target = wifi.target_network();
        let Some(network) = find_active(networks, target) else {
            tracing::warn!(
                interface = %interface,
                network = %target,
                "wireless target network not found or skipped; interface left unbridged"
            );
            continue;
        };
        config.push(
            PORT_SECTION,
            Command::add()
                .attr("bridge", &network.bridge_name)
                .attr("interface", interface),
        );
    }

    shorten(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::wireless;
    use crate::enumerate::{enumerate_networks, ActiveNetwork};
    use crate::model::{
        BaseNetworks, NetworkType, Networks, RouterModel, Subnets, WirelessConfig,
    };

    fn wifi(ssid: &str, password: &str, target: NetworkType) -> WirelessConfig {
        WirelessConfig {
            ssid: ssid.into(),
            password: password.into(),
            is_hide: false,
            is_disabled: false,
            split_band: false,
            wifi_target: target,
            network_name: None,
            is_primary: false,
        }
    }

    fn router() -> RouterModel {
        let mut router = RouterModel {
            model: "hAP ax2".into(),
            ..RouterModel::default()
        };
        router.interfaces.wireless = vec!["wifi1".into(), "wifi2".into()];
        router
    }

    fn descriptor() -> Networks {
        Networks {
            base_networks: BaseNetworks {
                split: true,
                domestic: true,
                ..BaseNetworks::default()
            },
            ..Networks::default()
        }
    }

    fn networks() -> Vec<ActiveNetwork> {
        enumerate_networks(&descriptor(), None).expect("enumerate")
    }

    #[test]
    fn no_active_configs_disables_both_radios() {
        let mut disabled = wifi("Off", "password1", NetworkType::Split);
        disabled.is_disabled = true;
        let config = wireless(&[disabled], &networks(), &router(), None);
        assert_eq!(
            config.lines("/interface wifi"),
            vec![
                "set [ find default-name=wifi1 ] disabled=yes",
                "set [ find default-name=wifi2 ] disabled=yes",
            ]
        );
        assert!(config.section("/interface wifi security").is_none());
    }

    #[test]
    fn single_config_owns_both_radios() {
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Split)],
            &networks(),
            &router(),
            None,
        );
        assert_eq!(
            config.lines("/interface wifi security"),
            vec![r#"add name=sec1 authentication-types=wpa2-psk,wpa3-psk passphrase="secret123""#]
        );
        assert_eq!(
            config.lines("/interface wifi"),
            vec![
                r#"set [ find default-name=wifi2 ] name=wifi2.4 configuration.ssid="Home" security=sec1 configuration.hide-ssid=no disabled=no"#,
                r#"set [ find default-name=wifi1 ] name=wifi5 configuration.ssid="Home" security=sec1 configuration.hide-ssid=no disabled=no"#,
            ]
        );
        assert_eq!(
            config.lines("/interface bridge port"),
            vec![
                "add bridge=LANBridgeSplit interface=wifi2.4",
                "add bridge=LANBridgeSplit interface=wifi5",
            ]
        );
    }

    #[test]
    fn additional_configs_become_virtual_aps_sharing_profiles() {
        let mut guest = wifi("Guest", "secret123", NetworkType::Domestic);
        guest.split_band = true;
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Split), guest],
            &networks(),
            &router(),
            None,
        );
        assert_eq!(config.lines("/interface wifi security").len(), 1);
        let lines = config.lines("/interface wifi");
        assert_eq!(
            lines[1],
            r#"add name=wifi2.4-2 master-interface=wifi2.4 configuration.ssid="Guest 2.4" security=sec1 configuration.hide-ssid=no disabled=no"#
        );
        assert_eq!(
            lines[3],
            r#"add name=wifi5-2 master-interface=wifi5 configuration.ssid="Guest 5" security=sec1 configuration.hide-ssid=no disabled=no"#
        );
        assert_eq!(
            config.lines("/interface bridge port"),
            vec![
                "add bridge=LANBridgeSplit interface=wifi2.4",
                "add bridge=LANBridgeDomestic interface=wifi2.4-2",
                "add bridge=LANBridgeSplit interface=wifi5",
                "add bridge=LANBridgeDomestic interface=wifi5-2",
            ]
        );
    }

    #[test]
    fn explicit_primary_wins_over_list_order() {
        let mut office = wifi("Office", "office-pass", NetworkType::Domestic);
        office.is_primary = true;
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Split), office],
            &networks(),
            &router(),
            None,
        );
        let lines = config.lines("/interface wifi");
        assert!(lines[0].contains(r#"configuration.ssid="Office""#));
        assert!(lines[0].contains("security=sec2"));
        assert!(lines[1].starts_with("add name=wifi2.4-2"));
        assert!(lines[1].contains(r#"configuration.ssid="Home""#));
    }

    #[test]
    fn unknown_target_network_is_left_unbridged() {
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Foreign)],
            &networks(),
            &router(),
            None,
        );
        assert!(config.section("/interface bridge port").is_none());
        assert_eq!(config.lines("/interface wifi").len(), 2);
    }

    #[test]
    fn single_band_router_only_configures_its_radio() {
        let mut router = router();
        router.interfaces.wireless = vec!["wifi2".into()];
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Split)],
            &networks(),
            &router,
            None,
        );
        assert_eq!(config.lines("/interface wifi").len(), 1);
        assert_eq!(
            config.lines("/interface bridge port"),
            vec!["add bridge=LANBridgeSplit interface=wifi2.4"]
        );
    }

    #[test]
    fn trunk_radio_is_never_disabled() {
        let mut disabled = wifi("Off", "password1", NetworkType::Split);
        disabled.is_disabled = true;
        let config = wireless(&[disabled], &networks(), &router(), Some("wifi1"));
        assert_eq!(
            config.lines("/interface wifi"),
            vec!["set [ find default-name=wifi2 ] disabled=yes"]
        );
    }

    #[test]
    fn trunk_radio_is_left_out_of_access_points() {
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Split)],
            &networks(),
            &router(),
            Some("wifi1"),
        );
        assert_eq!(
            config.lines("/interface wifi"),
            vec![
                r#"set [ find default-name=wifi2 ] name=wifi2.4 configuration.ssid="Home" security=sec1 configuration.hide-ssid=no disabled=no"#,
            ]
        );
        assert_eq!(
            config.lines("/interface bridge port"),
            vec!["add bridge=LANBridgeSplit interface=wifi2.4"]
        );
    }

    #[test]
    fn only_radio_used_as_trunk_emits_nothing() {
        let mut router = router();
        router.interfaces.wireless = vec!["wifi1".into()];
        let config = wireless(
            &[wifi("Home", "secret123", NetworkType::Split)],
            &networks(),
            &router,
            Some("wifi1"),
        );
        assert!(config.is_empty());
    }

    #[test]
    fn target_skipped_for_empty_subnet_is_left_unbridged() {
        let mut subnets = Subnets::default();
        subnets.base_subnets.split = Some("192.168.10.0/24".into());
        subnets.base_subnets.domestic = Some(String::new());
        let active = enumerate_networks(&descriptor(), Some(&subnets)).expect("enumerate");
        let config = wireless(
            &[
                wifi("Home", "secret123", NetworkType::Split),
                wifi("Family", "secret456", NetworkType::Domestic),
            ],
            &active,
            &router(),
            None,
        );
        assert_eq!(
            config.lines("/interface bridge port"),
            vec![
                "add bridge=LANBridgeSplit interface=wifi2.4",
                "add bridge=LANBridgeSplit interface=wifi5",
            ]
        );
    }
}

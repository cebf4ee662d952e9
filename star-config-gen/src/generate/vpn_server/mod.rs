//! VPN server generators, one per protocol.
//!
//! Each protocol module registers a [`VpnServerGenerator`] with `inventory`.
//! [`vpn_servers`] runs every registered generator in protocol order and
//! merges their output. A generator whose server settings are absent
//! returns an empty config.

mod common;
mod ikev2;
mod l2tp;
mod openvpn;
mod pptp;
mod sstp;
mod wireguard;

use ros_script_core::{merge_configs, RouterConfig};

use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;
use crate::model::{VpnProtocol, VpnServerState};

pub use ikev2::ikev2_server;
pub use l2tp::l2tp_server;
pub use openvpn::openvpn_server;
pub use pptp::pptp_server;
pub use sstp::sstp_server;
pub use wireguard::wireguard_servers;

/// Signature shared by every protocol generator.
pub type GenerateFn =
    fn(&VpnServerState, &[ActiveNetwork]) -> Result<RouterConfig, GeneratorError>;

/// A registered VPN server generator.
pub struct VpnServerGenerator {
    pub protocol: VpnProtocol,
    pub generate: GenerateFn,
}

inventory::collect!(VpnServerGenerator);

/// Registered generators sorted by protocol order.
pub fn registered() -> Vec<&'static VpnServerGenerator> {
    let mut generators: Vec<&'static VpnServerGenerator> =
        inventory::iter::<VpnServerGenerator>.into_iter().collect();
    generators.sort_by_key(|g| g.protocol);
    generators
}

/// Generate every configured VPN server.
///
/// Target networks are resolved against the enumerated `networks`, so a
/// bridge or table is only referenced when it is also created. Returns an
/// empty config when `state` is `None`.
pub fn vpn_servers(
    state: Option<&VpnServerState>,
    networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let Some(state) = state else {
        tracing::debug!("no VPN server settings");
        return Ok(RouterConfig::new());
    };
    let partials = registered()
        .into_iter()
        .map(|g| {
            tracing::trace!(protocol = %g.protocol, "running VPN server generator");
            (g.generate)(state, networks)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge_configs(partials))
}

#[cfg(test)]
mod tests {
    use super::{registered, vpn_servers};
    use crate::model::{VpnProtocol, VpnServerState};

    #[test]
    fn every_protocol_registers_once_in_order() {
        let protocols: Vec<VpnProtocol> = registered().iter().map(|g| g.protocol).collect();
        assert_eq!(protocols, VpnProtocol::ALL.to_vec());
    }

    #[test]
    fn absent_settings_produce_empty_config() {
        assert!(vpn_servers(None, &[]).expect("vpn").is_empty());
        assert!(vpn_servers(Some(&VpnServerState::default()), &[])
            .expect("vpn")
            .is_empty());
    }

    #[test]
    fn shared_certificate_is_emitted_once() {
        let state: VpnServerState = serde_json::from_str(
            r#"{
                "Users": [{"Username": "alice", "Password": "pw", "VPNType": ["OpenVPN", "SSTP"]}],
                "OpenVpnServer": {"AddressRange": "192.168.60.0/24"},
                "SstpServer": {"AddressRange": "192.168.80.0/24"}
            }"#,
        )
        .expect("json");
        let config = vpn_servers(Some(&state), &[]).expect("vpn");
        let certs = config.lines("/certificate");
        assert_eq!(
            certs.iter().filter(|l| l.starts_with("add name=star-ca")).count(),
            1
        );
        let sections: Vec<&str> = config.section_names().collect();
        assert!(sections.contains(&"/interface ovpn-server server"));
        assert!(sections.contains(&"/interface sstp-server server"));
    }
}

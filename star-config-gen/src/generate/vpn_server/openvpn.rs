use ros_script_core::{Command, RouterConfig};

use super::common::{accept_input, pool_and_profile, ppp_secrets, server_certificate, PppNames};
use super::VpnServerGenerator;
use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;
use crate::model::{VpnProtocol, VpnServerState};

const SERVER_SECTION: &str = "/interface ovpn-server server";

inventory::submit! {
    VpnServerGenerator {
        protocol: VpnProtocol::OpenVpn,
        generate: openvpn_server,
    }
}

pub fn openvpn_server(
    state: &VpnServerState,
    networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    let Some(server) = &state.openvpn_server else {
        return Ok(config);
    };
    let names = PppNames::new("ovpn");
    let certificate = server_certificate(&mut config, server.certificate.as_deref());
    pool_and_profile(
        &mut config,
        &names,
        &server.address_range,
        server.network.as_deref(),
        networks,
    )?;
    config.push(
        SERVER_SECTION,
        Command::set_global()
            .flag("enabled", true)
            .attr("port", server.port)
            .attr("protocol", server.protocol.as_str())
            .attr("certificate", &certificate)
            .flag("require-client-certificate", server.require_client_certificate)
            .attr("cipher", &server.cipher)
            .attr("auth", &server.auth)
            .attr("default-profile", &names.profile),
    );
    ppp_secrets(&mut config, state, VpnProtocol::OpenVpn, "ovpn", &names.profile);
    accept_input(
        &mut config,
        server.protocol.as_str(),
        Some(&server.port.to_string()),
        "OpenVPN server",
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::openvpn_server;
    use crate::model::VpnServerState;

    #[test]
    fn server_uses_generated_certificate_and_profile() {
        let state: VpnServerState = serde_json::from_str(
            r#"{
                "Users": [{"Username": "alice", "Password": "pw", "VPNType": ["OpenVPN"]}],
                "OpenVpnServer": {"AddressRange": "192.168.60.0/24", "Protocol": "tcp", "Port": 1195}
            }"#,
        )
        .expect("json");
        let config = openvpn_server(&state, &[]).expect("ovpn");
        assert_eq!(
            config.lines("/interface ovpn-server server"),
            vec!["set enabled=yes port=1195 protocol=tcp certificate=star-server require-client-certificate=no cipher=aes256-gcm auth=sha256 default-profile=ovpn-profile"]
        );
        assert_eq!(
            config.lines("/ppp secret"),
            vec![r#"add name=alice password="pw" service=ovpn profile=ovpn-profile"#]
        );
        assert_eq!(
            config.lines("/ip firewall filter"),
            vec![r#"add chain=input protocol=tcp dst-port=1195 action=accept comment="OpenVPN server""#]
        );
        let first: Vec<&str> = config.section_names().take(1).collect();
        assert_eq!(first, vec!["/certificate"]);
    }

    #[test]
    fn absent_server_is_empty() {
        assert!(openvpn_server(&VpnServerState::default(), &[])
            .expect("ovpn")
            .is_empty());
    }
}

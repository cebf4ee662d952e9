use ros_script_core::{Command, RouterConfig};

use super::common::{accept_input, pool_and_profile, ppp_secrets, PppNames};
use super::VpnServerGenerator;
use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;
use crate::model::{VpnProtocol, VpnServerState};

const SERVER_SECTION: &str = "/interface l2tp-server server";

inventory::submit! {
    VpnServerGenerator {
        protocol: VpnProtocol::L2tp,
        generate: l2tp_server,
    }
}

/// L2TP server. IPsec is required when a pre-shared secret is configured.
pub fn l2tp_server(
    state: &VpnServerState,
    networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    let Some(server) = &state.l2tp_server else {
        return Ok(config);
    };
    let names = PppNames::new("l2tp");
    pool_and_profile(
        &mut config,
        &names,
        &server.address_range,
        server.network.as_deref(),
        networks,
    )?;

    let secret = server
        .ipsec_secret
        .as_deref()
        .filter(|s| !s.is_empty());
    let mut settings = Command::set_global()
        .flag("enabled", true)
        .attr("default-profile", &names.profile);
    settings = match secret {
        Some(secret) => settings
            .attr("use-ipsec", "required")
            .quoted("ipsec-secret", secret),
        None => settings.flag("use-ipsec", false),
    };
    config.push(SERVER_SECTION, settings);

    ppp_secrets(&mut config, state, VpnProtocol::L2tp, "l2tp", &names.profile);
    accept_input(&mut config, "udp", Some("1701"), "L2TP server");
    if secret.is_some() {
        accept_input(&mut config, "udp", Some("500,4500"), "L2TP IPsec");
        accept_input(&mut config, "ipsec-esp", None, "L2TP IPsec ESP");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::l2tp_server;
    use crate::model::VpnServerState;

    #[test]
    fn ipsec_secret_requires_ipsec() {
        let state: VpnServerState = serde_json::from_str(
            r#"{
                "Users": [{"Username": "bob", "Password": "b", "VPNType": ["L2TP"]}],
                "L2tpServer": {"AddressRange": "192.168.71.0/24", "IpsecSecret": "s3cret"}
            }"#,
        )
        .expect("json");
        let config = l2tp_server(&state, &[]).expect("l2tp");
        assert_eq!(
            config.lines("/interface l2tp-server server"),
            vec![r#"set enabled=yes default-profile=l2tp-profile use-ipsec=required ipsec-secret="s3cret""#]
        );
        assert_eq!(config.lines("/ip firewall filter").len(), 3);
        assert_eq!(
            config.lines("/ppp secret"),
            vec![r#"add name=bob password="b" service=l2tp profile=l2tp-profile"#]
        );
    }

    #[test]
    fn without_secret_ipsec_is_off() {
        let state: VpnServerState =
            serde_json::from_str(r#"{"L2tpServer": {"AddressRange": "192.168.71.0/24"}}"#)
                .expect("json");
        let config = l2tp_server(&state, &[]).expect("l2tp");
        assert_eq!(
            config.lines("/interface l2tp-server server"),
            vec!["set enabled=yes default-profile=l2tp-profile use-ipsec=no"]
        );
        assert_eq!(config.lines("/ip firewall filter").len(), 1);
    }
}

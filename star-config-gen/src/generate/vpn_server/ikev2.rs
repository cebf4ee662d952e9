//! IKEv2 road-warrior server.
//!
//! Clients get an address from a mode-config pool and authenticate with a
//! per-user pre-shared key matched on `user-fqdn:<username>`.

use ros_script_core::{Command, RouterConfig};

use super::common::{accept_input, POOL_SECTION};
use super::VpnServerGenerator;
use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;
use crate::generate::addressing::plan_subnet;
use crate::model::{VpnProtocol, VpnServerState};

const MODE_CONFIG_SECTION: &str = "/ip ipsec mode-config";
const POLICY_GROUP_SECTION: &str = "/ip ipsec policy group";
const PROFILE_SECTION: &str = "/ip ipsec profile";
const PEER_SECTION: &str = "/ip ipsec peer";
const PROPOSAL_SECTION: &str = "/ip ipsec proposal";
const POLICY_SECTION: &str = "/ip ipsec policy";
const IDENTITY_SECTION: &str = "/ip ipsec identity";

const POOL: &str = "ikev2-pool";
const MODE_CONFIG: &str = "ikev2-conf";
const POLICY_GROUP: &str = "ikev2-policies";
const PROFILE: &str = "ikev2-profile";
const PEER: &str = "ikev2-peer";
const PROPOSAL: &str = "ikev2-proposal";

inventory::submit! {
    VpnServerGenerator {
        protocol: VpnProtocol::Ikev2,
        generate: ikev2_server,
    }
}

pub fn ikev2_server(
    state: &VpnServerState,
    _networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    let Some(server) = &state.ikev2_server else {
        return Ok(config);
    };
    let plan = plan_subnet(&server.address_range, POOL)?;
    let dns = server
        .dns_server
        .clone()
        .unwrap_or_else(|| plan.gateway.to_string());

    config.push(
        POOL_SECTION,
        Command::add().attr("name", POOL).attr("ranges", plan.pool_range()),
    );
    config.push(
        MODE_CONFIG_SECTION,
        Command::add()
            .attr("name", MODE_CONFIG)
            .attr("address-pool", POOL)
            .attr("address-prefix-length", 32)
            .attr("split-include", "0.0.0.0/0")
            .flag("system-dns", false)
            .attr("static-dns", dns),
    );
    config.push(
        POLICY_GROUP_SECTION,
        Command::add().attr("name", POLICY_GROUP),
    );
    config.push(
        PROFILE_SECTION,
        Command::add()
            .attr("name", PROFILE)
            .attr("hash-algorithm", "sha256")
            .attr("enc-algorithm", "aes-256")
            .attr("dh-group", "modp2048"),
    );
    config.push(
        PEER_SECTION,
        Command::add()
            .attr("name", PEER)
            .attr("exchange-mode", "ike2")
            .flag("passive", true)
            .attr("profile", PROFILE)
            .flag("send-initial-contact", true),
    );
    config.push(
        PROPOSAL_SECTION,
        Command::add()
            .attr("name", PROPOSAL)
            .attr("auth-algorithms", "sha256")
            .attr("enc-algorithms", "aes-256-cbc")
            .attr("pfs-group", "none"),
    );
    config.push(
        POLICY_SECTION,
        Command::add()
            .attr("dst-address", plan.network)
            .attr("src-address", "0.0.0.0/0")
            .attr("group", POLICY_GROUP)
            .attr("proposal", PROPOSAL)
            .flag("template", true),
    );
    for user in state.users_for(VpnProtocol::Ikev2) {
        config.push(
            IDENTITY_SECTION,
            Command::add()
                .attr("peer", PEER)
                .attr("auth-method", "pre-shared-key")
                .quoted("secret", &user.password)
                .quoted("remote-id", format!("user-fqdn:{}", user.username))
                .attr("match-by", "remote-id")
                .attr("generate-policy", "port-strict")
                .attr("mode-config", MODE_CONFIG)
                .attr("policy-template-group", POLICY_GROUP),
        );
    }
    accept_input(&mut config, "udp", Some("500,4500"), "IKEv2 server");
    accept_input(&mut config, "ipsec-esp", None, "IKEv2 ESP");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ikev2_server;
    use crate::model::VpnServerState;

    #[test]
    fn emits_ipsec_stack_in_dependency_order() {
        let state: VpnServerState = serde_json::from_str(
            r#"{
                "Users": [
                    {"Username": "dave", "Password": "d", "VPNType": ["IKev2"]},
                    {"Username": "erin", "Password": "e", "VPNType": ["SSTP"]}
                ],
                "Ikev2Server": {"AddressRange": "192.168.85.0/24"}
            }"#,
        )
        .expect("json");
        let config = ikev2_server(&state, &[]).expect("ikev2");
        let sections: Vec<&str> = config.section_names().collect();
        assert_eq!(
            sections,
            vec![
                "/ip pool",
                "/ip ipsec mode-config",
                "/ip ipsec policy group",
                "/ip ipsec profile",
                "/ip ipsec peer",
                "/ip ipsec proposal",
                "/ip ipsec policy",
                "/ip ipsec identity",
                "/ip firewall filter",
            ]
        );
        assert_eq!(
            config.lines("/ip ipsec mode-config"),
            vec!["add name=ikev2-conf address-pool=ikev2-pool address-prefix-length=32 split-include=0.0.0.0/0 system-dns=no static-dns=192.168.85.1"]
        );
        assert_eq!(
            config.lines("/ip ipsec identity"),
            vec![r#"add peer=ikev2-peer auth-method=pre-shared-key secret="d" remote-id="user-fqdn:dave" match-by=remote-id generate-policy=port-strict mode-config=ikev2-conf policy-template-group=ikev2-policies"#]
        );
    }
}

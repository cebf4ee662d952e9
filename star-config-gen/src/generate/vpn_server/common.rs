//! Building blocks shared by the PPP based servers.

use ros_script_core::{Command, RouterConfig};

use crate::enumerate::{find_active, ActiveNetwork};
use crate::error::GeneratorError;
use crate::generate::addressing::{plan_subnet, SubnetPlan};
use crate::model::{VpnProtocol, VpnServerState};

pub const POOL_SECTION: &str = "/ip pool";
pub const PROFILE_SECTION: &str = "/ppp profile";
pub const SECRET_SECTION: &str = "/ppp secret";
pub const FILTER_SECTION: &str = "/ip firewall filter";
pub const CERTIFICATE_SECTION: &str = "/certificate";

pub const CA_CERTIFICATE: &str = "star-ca";
pub const SERVER_CERTIFICATE: &str = "star-server";

/// Names of the per-protocol pool and PPP profile, e.g. `l2tp-pool`.
pub struct PppNames {
    pub pool: String,
    pub profile: String,
}

impl PppNames {
    pub fn new(prefix: &str) -> Self {
        Self {
            pool: format!("{prefix}-pool"),
            profile: format!("{prefix}-profile"),
        }
    }
}

/// Address pool plus a PPP profile handing out addresses from it.
///
/// When `network` is one of the enumerated networks, sessions are bridged
/// into its LAN bridge. A network that was not built leaves the profile
/// unbridged.
pub fn pool_and_profile(
    config: &mut RouterConfig,
    names: &PppNames,
    address_range: &str,
    network: Option<&str>,
    networks: &[ActiveNetwork],
) -> Result<SubnetPlan, GeneratorError> {
    let plan = plan_subnet(address_range, &names.pool)?;
    config.push(
        POOL_SECTION,
        Command::add()
            .attr("name", &names.pool)
            .attr("ranges", plan.pool_range()),
    );

    let bridge = network.and_then(|n| {
        let found = find_active(networks, n);
        if found.is_none() {
            tracing::warn!(
                network = %n,
                profile = %names.profile,
                "VPN target network not found or skipped; profile left unbridged"
            );
        }
        found.map(|active| active.bridge_name.as_str())
    });
    config.push(
        PROFILE_SECTION,
        Command::add()
            .attr("name", &names.profile)
            .attr("local-address", plan.gateway)
            .attr("remote-address", &names.pool)
            .attr("dns-server", plan.gateway)
            .attr_opt("bridge", bridge)
            .attr("use-encryption", "yes"),
    );
    Ok(plan)
}

/// `/ppp secret` entries for every user allowed on `protocol`.
pub fn ppp_secrets(
    config: &mut RouterConfig,
    state: &VpnServerState,
    protocol: VpnProtocol,
    service: &str,
    profile: &str,
) {
    for user in state.users_for(protocol) {
        config.push(
            SECRET_SECTION,
            Command::add()
                .attr("name", &user.username)
                .quoted("password", &user.password)
                .attr("service", service)
                .attr("profile", profile),
        );
    }
}

/// Accept inbound traffic for a server on the `input` chain.
pub fn accept_input(
    config: &mut RouterConfig,
    protocol: &str,
    dst_port: Option<&str>,
    comment: &str,
) {
    config.push(
        FILTER_SECTION,
        Command::add()
            .attr("chain", "input")
            .attr("protocol", protocol)
            .attr_opt("dst-port", dst_port)
            .attr("action", "accept")
            .quoted("comment", comment),
    );
}

/// Resolve the server certificate, generating the shared CA/server pair when
/// none is configured.
///
/// The generated block is identical for every caller, so merging the output
/// of several servers keeps a single copy.
pub fn server_certificate(config: &mut RouterConfig, configured: Option<&str>) -> String {
    if let Some(name) = configured.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    config.extend(
        CERTIFICATE_SECTION,
        [
            Command::add()
                .attr("name", CA_CERTIFICATE)
                .attr("common-name", CA_CERTIFICATE)
                .attr("days-valid", 3650)
                .attr("key-usage", "key-cert-sign,crl-sign"),
            Command::add()
                .attr("name", SERVER_CERTIFICATE)
                .attr("common-name", SERVER_CERTIFICATE)
                .attr("days-valid", 3650)
                .attr("key-usage", "digital-signature,key-encipherment,tls-server"),
            Command::new("sign").with_target(CA_CERTIFICATE),
            Command::new("sign")
                .with_target(SERVER_CERTIFICATE)
                .attr("ca", CA_CERTIFICATE),
        ],
    );
    SERVER_CERTIFICATE.to_string()
}

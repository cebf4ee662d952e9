use ros_script_core::{Command, RouterConfig};

use super::common::{accept_input, pool_and_profile, ppp_secrets, PppNames};
use super::VpnServerGenerator;
use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;
use crate::model::{VpnProtocol, VpnServerState};

const SERVER_SECTION: &str = "/interface pptp-server server";

inventory::submit! {
    VpnServerGenerator {
        protocol: VpnProtocol::Pptp,
        generate: pptp_server,
    }
}

pub fn pptp_server(
    state: &VpnServerState,
    networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    let Some(server) = &state.pptp_server else {
        return Ok(config);
    };
    let names = PppNames::new("pptp");
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
            .attr("default-profile", &names.profile)
            .attr_opt("keepalive-timeout", server.keepalive_timeout),
    );
    ppp_secrets(&mut config, state, VpnProtocol::Pptp, "pptp", &names.profile);
    accept_input(&mut config, "tcp", Some("1723"), "PPTP server");
    accept_input(&mut config, "gre", None, "PPTP GRE");
    Ok(config)
}

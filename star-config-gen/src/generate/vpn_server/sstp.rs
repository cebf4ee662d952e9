use ros_script_core::{Command, RouterConfig};

use super::common::{accept_input, pool_and_profile, ppp_secrets, server_certificate, PppNames};
use super::VpnServerGenerator;
use crate::enumerate::ActiveNetwork;
use crate::error::GeneratorError;
use crate::model::{VpnProtocol, VpnServerState};

const SERVER_SECTION: &str = "/interface sstp-server server";

inventory::submit! {
    VpnServerGenerator {
        protocol: VpnProtocol::Sstp,
        generate: sstp_server,
    }
}

pub fn sstp_server(
    state: &VpnServerState,
    networks: &[ActiveNetwork],
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    let Some(server) = &state.sstp_server else {
        return Ok(config);
    };
    let names = PppNames::new("sstp");
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
            .attr("certificate", &certificate)
            .attr("default-profile", &names.profile),
    );
    ppp_secrets(&mut config, state, VpnProtocol::Sstp, "sstp", &names.profile);
    accept_input(
        &mut config,
        "tcp",
        Some(&server.port.to_string()),
        "SSTP server",
    );
    Ok(config)
}

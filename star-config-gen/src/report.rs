use colored::Colorize;
use ros_script_core::RouterConfig;

use crate::enumerate::{ActiveNetwork, NetworkOrigin};
use crate::generate::extra::GameCatalog;
use crate::orchestrate::{RouterOutput, RouterRole};

/// Render the enumerated networks as an aligned table.
pub fn render_networks(networks: &[ActiveNetwork]) -> String {
    if networks.is_empty() {
        return "no active networks".yellow().to_string();
    }
    let width = networks
        .iter()
        .map(|n| n.bridge_name.len())
        .max()
        .unwrap_or(0);
    let mut out = vec![format!(
        "{:>4}  {:<width$}  {:<24}  {}",
        "VLAN", "BRIDGE", "ORIGIN", "SUBNET"
    )
    .bold()
    .to_string()];
    for network in networks {
        let origin = match network.origin {
            NetworkOrigin::Base => "base".to_string(),
            NetworkOrigin::Extended => format!("{} extended", network.kind),
            NetworkOrigin::VpnClient(protocol) => format!("{protocol} client"),
        };
        out.push(format!(
            "{}  {:<width$}  {:<24}  {}",
            format!("{:>4}", network.vlan_id).cyan(),
            network.bridge_name,
            origin,
            network.subnet.as_deref().unwrap_or("-"),
        ));
    }
    out.join("\n")
}

/// One line per generated router with its section and command counts.
pub fn render_outputs_summary(outputs: &[RouterOutput]) -> String {
    let mut out = Vec::new();
    for output in outputs {
        let role = match output.role {
            RouterRole::Master => "master".green(),
            RouterRole::Slave => "slave".blue(),
        };
        out.push(format!(
            "{role} {}: {}",
            output.model,
            render_config_summary(&output.config)
        ));
    }
    out.join("\n")
}

/// `N sections, M commands`.
pub fn render_config_summary(config: &RouterConfig) -> String {
    format!(
        "{} sections, {} commands",
        config.len(),
        config.command_count()
    )
}

pub fn render_catalog(catalog: &GameCatalog) -> String {
    let mut out = Vec::new();
    for game in &catalog.games {
        out.push(format!("{}", game.name.bold()));
        for (protocol, ports) in game.port_rules() {
            out.push(format!("  {protocol}: {ports}"));
        }
    }
    out.join("\n")
}

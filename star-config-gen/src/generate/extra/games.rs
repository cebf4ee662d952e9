use ros_script_core::{Command, RouterConfig};

use super::catalog::GameCatalog;
use crate::model::{GameLink, GameSelection};
use crate::naming::routing_table_name;

const MANGLE_SECTION: &str = "/ip firewall mangle";

/// Pin selected games to their uplink with `mark-routing` mangle rules.
///
/// Games on `none`, games missing from the catalog and games on a
/// load-balanced link produce no rules.
pub fn game_routing(
    config: &mut RouterConfig,
    games: &[GameSelection],
    load_balanced: &[GameLink],
    catalog: &GameCatalog,
) {
    for selection in games {
        let Some(network) = selection.link.network() else {
            continue;
        };
        if load_balanced.contains(&selection.link) {
            tracing::debug!(game = %selection.name, link = %network, "link is load balanced, skipping game rules");
            continue;
        }
        let Some(game) = catalog.find(&selection.name) else {
            tracing::warn!(game = %selection.name, "game not in catalog");
            continue;
        };
        let table = routing_table_name(network, None);
        for (protocol, ports) in game.port_rules() {
            config.push(
                MANGLE_SECTION,
                Command::add()
                    .attr("chain", "prerouting")
                    .attr("protocol", protocol)
                    .attr("dst-port", ports)
                    .attr("dst-address-type", "!local")
                    .attr("action", "mark-routing")
                    .attr("new-routing-mark", &table)
                    .flag("passthrough", false)
                    .quoted("comment", format!("Game: {}", game.name)),
            );
        }
    }
}

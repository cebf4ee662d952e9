//! System-level settings applied after the network pipeline.

pub mod catalog;
mod games;
mod system;

use ros_script_core::RouterConfig;

use crate::error::GeneratorError;
use crate::model::ExtraConfigState;

pub use catalog::{
    default_game_catalog, load_game_catalog, CatalogLoadError, GameCatalog, GameEntry,
};
pub use games::game_routing;

/// Identity, clock, DNS, services, schedules, tools and game routing.
///
/// Every part is optional; an all-default [`ExtraConfigState`] yields an
/// empty config.
pub fn extra_config(
    extra: &ExtraConfigState,
    catalog: &GameCatalog,
) -> Result<RouterConfig, GeneratorError> {
    let mut config = RouterConfig::new();
    system::identity(&mut config, extra);
    system::clock_and_ntp(&mut config, extra);
    system::dns_and_cloud(&mut config, extra);
    system::services(&mut config, &extra.services);
    system::schedules(&mut config, extra)?;
    system::tools(&mut config, extra);
    game_routing(
        &mut config,
        &extra.games,
        &extra.load_balanced_links,
        catalog,
    );
    Ok(config)
}

//! Per-concern generators.
//!
//! Each generator is a pure function from part of a [`StarState`](crate::model::StarState)
//! to a partial [`RouterConfig`](ros_script_core::RouterConfig). Missing optional
//! input yields an empty config; the orchestrators merge the partial results.

pub mod addressing;
pub mod bridges;
pub mod dhcp;
pub mod extra;
pub mod ports;
pub mod vlans;
pub mod vpn_server;
pub mod wireless;

pub use bridges::bridges;
pub use dhcp::{dhcp_clients, dhcp_servers};
pub use extra::extra_config;
pub use ports::{ethernet_to_bridge, trunk_comment, vlans_to_bridges};
pub use vlans::vlans;
pub use vpn_server::vpn_servers;
pub use wireless::wireless;

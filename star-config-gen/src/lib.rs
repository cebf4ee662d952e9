//! MikroTik RouterOS configuration generation for Star topologies.
//!
//! A Star topology is one master router carrying a set of logical LAN
//! networks (base networks, extended Foreign/Domestic networks and
//! VPN-client networks), optionally extended to slave routers over a VLAN
//! trunk. This library turns an immutable [`model::StarState`] snapshot into
//! one [`ros_script_core::RouterConfig`] per router.
//!
//! # Architecture
//!
//! ## Input
//!
//! - [`model`]: Wizard-shaped input descriptors (`Networks`, `Subnets`, routers, WiFi, VPN, extras)
//! - [`topology`]: Loading a snapshot from TOML or JSON files
//!
//! ## Identity
//!
//! - [`naming`]: Bridge, VLAN and routing-table names; reverse lookups by network name
//! - [`enumerate`]: Ordered active networks with validated VLAN ids and unique names
//!
//! ## Generation
//!
//! - [`generate`]: Per-concern generators
//!   - Bridges, VLANs, bridge ports and trunk labelling
//!   - DHCP clients (slaves) and DHCP servers (master)
//!   - WiFi interfaces and security profiles
//!   - VPN servers (WireGuard, OpenVPN, L2TP, PPTP, SSTP, IKEv2)
//!   - System settings and game routing
//! - [`orchestrate`]: Master, slave and trunk pipelines merging generator output
//!
//! ## Reporting
//!
//! - [`report`]: Terminal-friendly network tables and generation summaries
//!
//! # Workflow
//!
//! 1. **Load**: read a topology with [`topology::load_topology`]
//! 2. **Enumerate**: [`enumerate::enumerate_networks`] validates names and VLAN ranges
//! 3. **Generate**: [`orchestrate::topology_cg`] runs the per-router pipelines
//! 4. **Write**: render each config with [`ros_script_core::write`]

pub mod enumerate;
pub mod error;
pub mod generate;
pub mod model;
pub mod naming;
pub mod orchestrate;
pub mod report;
pub mod topology;

pub use error::{GeneratorError, NetworkError};
pub use orchestrate::{master_cg, slave_cg, topology_cg, trunk_cg};

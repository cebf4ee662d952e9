//! Input descriptors produced by the wizard and consumed by the generators.

mod extra;
mod networks;
mod router;
mod state;
mod vpn;
mod wireless;

pub use extra::{
    ExtraConfigState, GameLink, GameSelection, Schedule, ScheduleInterval, ServiceState, Services,
};
pub use networks::{
    BaseNetworks, BaseSubnets, NetworkType, Networks, PerProtocol, SubnetEntry, Subnets,
    VpnProtocol,
};
pub use router::{ChooseState, RouterInterfaces, RouterMode, RouterModel};
pub use state::StarState;
pub use vpn::{
    Credentials, Ikev2ServerConfig, L2tpServerConfig, OpenVpnServerConfig, OpenVpnTransport,
    PptpServerConfig, SstpServerConfig, VpnServerState, WireguardServerConfig,
};
pub use wireless::{WifiBand, WirelessConfig};

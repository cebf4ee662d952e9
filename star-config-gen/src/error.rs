use thiserror::Error;

/// Problems found while enumerating a [`Networks`](crate::model::Networks) descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("empty network name in {category}")]
    EmptyName { category: String },
    #[error("duplicate network name '{name}' ({first} and {second})")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error("{category} has {requested} networks but only {capacity} VLAN ids are reserved")]
    RangeExhausted {
        category: String,
        requested: usize,
        capacity: u16,
    },
    #[error("VLAN id {vlan_id} for '{name}' is already used by '{existing}'")]
    VlanCollision {
        vlan_id: u16,
        name: String,
        existing: String,
    },
}

/// Errors returned by generators and orchestrators.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The slave pipeline was handed the master router.
    #[error("slave config generation only applies to slave routers (isMaster = false); '{model}' is the master")]
    NotASlave { model: String },
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("invalid subnet '{value}' for {context}")]
    InvalidSubnet { value: String, context: String },
    #[error("subnet {subnet} has no free address for {context}")]
    AddressPoolExhausted { subnet: String, context: String },
    #[error("invalid {context} time {hour:02}:{minute:02}")]
    InvalidSchedule {
        context: &'static str,
        hour: u8,
        minute: u8,
    },
}

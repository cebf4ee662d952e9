//! Generic RouterOS script primitives used by higher-level generators.
//!
//! Commands are structured values ([`Command`]) grouped into ordered sections
//! ([`RouterConfig`]). Partial configs are combined with [`merge_configs`],
//! optionally compacted with [`shorten`], and serialized to script text with
//! [`write`]. [`parse`] reads script text back into a [`RouterConfig`].

pub mod command;
pub mod config;
pub mod merge;
pub mod parser;
pub mod shorten;
pub mod writer;

pub use command::{Attr, Command, Value};
pub use config::RouterConfig;
pub use merge::{merge_configs, merge_into};
pub use parser::{parse, parse_file, ParseError};
pub use shorten::shorten;
pub use writer::{write, write_file, WriteError};

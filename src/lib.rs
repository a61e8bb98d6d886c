//! eagle: layered configuration loading into strongly typed structures
//!
//! Configuration files (YAML, JSON, INI or TOML) are decoded into an untyped
//! [`Value`] tree. An environment overlay (`application-<env>.yaml`) takes
//! priority over the base file, and the [`Engine`] layers every tree onto a
//! destination declared with [`record!`], first-wins per field.
//!
//! ```no_run
//! use eagle::{Engine, Options};
//!
//! #[derive(Debug, Default, Clone)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! eagle::record!(Server { host, port = "listen_port" });
//!
//! let engine = Engine::new(Options::new().base_path("config").env("local"))?;
//! let server: Server = engine.load()?;
//! # Ok::<(), eagle::Error>(())
//! ```

pub mod decode;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod slot;
pub mod value;

pub use decode::{decode, Format};
pub use engine::{Engine, Options, Source};
pub use error::{Error, Result};
pub use mapper::{map_layers, FieldPath, MapError, MapOptions, Mapper};
pub use slot::{FieldSpec, Settable, Slot};
pub use value::{Mapping, Value};

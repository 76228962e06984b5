// unipoll-api: Async client and loosely-typed JSON model for UniFi controllers

pub mod auth;
pub mod controller;
pub mod devmgr;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod flex;
pub mod hooks;
pub mod models;
pub mod paths;
pub mod registry;
pub mod transport;

pub use auth::{ControllerPlatform, Credentials};
pub use controller::{Controller, ControllerConfig};
pub use devmgr::{DevMgrCmd, DevMgrCommand};
pub use dispatch::{Device, DeviceKind, Devices, parse_devices};
pub use endpoints::DEFAULT_USER_WINDOW_HOURS;
pub use error::{Error, Partial, SitesResult};
pub use flex::{FlexBool, FlexInt, GeoIp, IpGeo};
pub use hooks::{LogFn, LogHooks};
pub use models::ServerStatus;
pub use transport::{TlsMode, TransportConfig};

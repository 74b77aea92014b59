mod server;
pub use server::Server;

mod server_config;
pub use server_config::ServerConfig;

mod fleet_server;
pub use fleet_server::FleetServer;
mod fleet_handle;
pub use fleet_handle::FleetHandle;
mod store_event;
pub(crate) use store_event::StoreEvent;

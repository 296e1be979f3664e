pub mod main_queue;
pub mod resource;
pub mod tmdb;
pub mod webservice;

#[cfg(test)]
pub(crate) mod testing;

pub use main_queue::{MainHandle, MainQueue, QueueClosed};
pub use resource::Resource;
pub use tmdb::Endpoints;
pub use webservice::{HttpTransport, Transport, Webservice};

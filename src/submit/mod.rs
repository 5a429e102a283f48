pub mod controller;
pub mod endpoint;
pub mod error;
pub mod messages;
pub mod redirect;
pub mod transport;

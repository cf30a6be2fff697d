//! TextCat server internals, exposed as a library so integration tests
//! can drive the router without binding a socket.

pub mod config;
pub mod routes;
pub mod state;

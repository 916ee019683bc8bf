//! Infrastructure adapters: the reqwest-backed client for the remote mass pay
//! service.

pub mod http;

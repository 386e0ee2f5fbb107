//! # lernsax-protocol
//!
//! Wire shapes for the LernSax JSON-RPC batch protocol: call records and
//! batch helper constructors, the focus-object enumeration, response packing
//! into `{result, helpers}`, and the server fault taxonomy.
//!
//! This crate performs no I/O. The HTTP channel and the session orchestrator
//! live in `lernsax-client`.

#![deny(unsafe_code)]

pub mod batch;
pub mod fault;
pub mod focus;
pub mod pack;

pub use batch::{Call, JSONRPC_VERSION, set_focus, set_session};
pub use fault::ApiFault;
pub use focus::FocusObject;
pub use pack::{PackedResponse, RETURN_OK, RETURN_RESUME, errno, return_code};

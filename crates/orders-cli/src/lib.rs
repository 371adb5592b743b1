//! Library components of the order analytics CLI: the staged pipeline, the
//! shared dataset handle, and the read-endpoint dispatcher.

pub mod logging;
pub mod pipeline;
pub mod service;
pub mod state;

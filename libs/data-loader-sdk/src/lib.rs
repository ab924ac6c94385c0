//! Shared types for the data-loader module: the request/response model, the
//! mmap-backed module bundle contract, the parser contract, and the
//! in-process client interface.
//!
//! The engine-module implementation lives in `modules/system/data-loader`;
//! this crate exists so other modules can depend on the data-loader's public
//! surface without pulling in its internals.

mod bundle;
mod client;
mod future;
mod model;
mod parser;

pub use bundle::{DataManagerInfo, ModuleBundle};
pub use client::DataLoaderClient;
pub use future::{NotReadyError, ResponseFuture};
pub use model::{EngineType, Fingerprint, Request, Response, ResponseStatus};
pub use parser::{PackageParser, ParseError};

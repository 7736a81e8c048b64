//! Application layer containing the core business logic orchestration.
//!
//! `TransferEngine` executes the atomic transfer protocol and `PixKeyRegistry`
//! manages the alias lifecycle. Both operate against the storage ports defined
//! in the domain layer and are injected with a shared store handle at startup.

pub mod engine;
mod locks;
pub mod registry;

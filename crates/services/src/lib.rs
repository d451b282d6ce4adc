//! # services
//!
//! The lookup pipeline between the web adapters and the storage ports:
//! resolve an identifier, issue one port call, turn `Ok(None)` into a
//! domain-level `NotFound`. Each service is a thin `Arc<dyn Port>` wrapper
//! and is cheap to clone into per-request state.

pub mod catalog;
pub mod ident;
pub mod media;
pub mod pessoas;
pub mod visits;

pub use catalog::CatalogService;
pub use media::{CityRedirect, MediaService};
pub use pessoas::PessoaService;
pub use visits::VisitService;

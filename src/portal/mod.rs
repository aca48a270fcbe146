//! Wire contract with the portal server and the HTTP transport that speaks it.

pub mod contract;
pub mod pagination;
pub mod transport;

pub use contract::{ContractError, DocumentCard, GridPayload, PaginationDescriptor};
pub use pagination::{PageLink, PaginationView};
pub use transport::{FetchError, GridTransport, HttpTransport};

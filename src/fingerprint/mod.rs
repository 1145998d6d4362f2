//! HTTP response fingerprinting: server, OS, technology, security
//! middleware, analytics and build tooling.

pub mod analytics;
pub mod builder;
pub mod composer;
pub mod record;
pub mod security;
pub mod server_header;
pub mod store;
pub mod technology;

pub use composer::Composer;
pub use record::FingerprintRecord;
pub use store::FingerprintStore;

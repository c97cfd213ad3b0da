//! Data access layer
//!
//! Every repository call takes the tenant (`company_id`) as an explicit
//! parameter; there is no ambient tenant scope.

pub mod audit;
pub mod integrated_vendor_store;
pub mod place_store;
pub mod traits;
pub mod vendor_store;

pub use audit::{AuditRepository, AuditSink};
pub use integrated_vendor_store::PostgresIntegratedVendorStore;
pub use place_store::PostgresPlaceStore;
pub use traits::{BulkDeleteStore, IntegratedVendorStore, PlaceOrdering, PlaceStore, VendorStore};
pub use vendor_store::PostgresVendorStore;

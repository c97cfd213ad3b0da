//! Business logic layer
//!
//! Services orchestrate operations by coordinating stores, the geocoding
//! provider, and audit emission. Tenancy is always an explicit parameter.

pub mod audit;
pub mod bulk_delete;
pub mod export;
pub mod integrated_vendor;
pub mod place_search;
pub mod vendor;

pub use audit::AuditService;
pub use bulk_delete::{bulk_delete, BulkDeleteOutcome};
pub use export::{ExportFormat, ExportService, PlaceExport};
pub use integrated_vendor::{IntegratedVendorService, NewIntegratedVendor};
pub use place_search::{PlaceSearchService, SearchParams, SearchResult};
pub use vendor::{NewVendor, VendorChanges, VendorService};

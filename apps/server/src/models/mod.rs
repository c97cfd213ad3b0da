//! Domain entities and value types

pub mod integrated_vendor;
pub mod place;
pub mod vendor;

pub use integrated_vendor::{supported_integrations, IntegratedVendor, IntegrationDescriptor};
pub use place::Place;
pub use vendor::{Vendor, VendorResponse, DEFAULT_VENDOR_LOGO_URL};

use uuid::Uuid;

/// Generate a stable, externally exposed identifier, distinct from the
/// internal primary key, e.g. `place_3f2a9c1d04eb`.
pub(crate) fn generate_public_id(prefix: &str) -> String {
    let key = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &key[..12])
}

#[cfg(test)]
mod tests {
    use super::generate_public_id;

    #[test]
    fn public_ids_carry_prefix_and_are_unique() {
        let a = generate_public_id("vendor");
        let b = generate_public_id("vendor");
        assert!(a.starts_with("vendor_"));
        assert_eq!(a.len(), "vendor_".len() + 12);
        assert_ne!(a, b);
    }
}

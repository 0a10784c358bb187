//! Domain-specific errors for the ride store.
//!
//! Failed credential lookups are not errors: logins return `Option`.
//! What remains are business rule refusals on a rider's ride state, plus
//! a handle that some other store issued. All leave the store untouched.

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("rider already has an active ride")]
    ActiveRide,
    #[error("rider has no active ride")]
    NoActiveRide,
    #[error("rider handle does not belong to this store")]
    UnknownRider,
}

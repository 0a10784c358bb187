use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::stores::{AccountDirectory, AccountId, Driver, Ride, Rider};
use crate::Error;

/// Handle to a rider returned by a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiderId(AccountId);

/// Handle to a driver returned by a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverId(AccountId);

/// Owns the rider and driver directories.
///
/// Logins hand out handles rather than references so callers can keep a
/// session open across further registrations. Handles are only meaningful
/// for the service that issued them.
#[derive(Debug)]
pub struct AccountService {
    riders: AccountDirectory<Rider>,
    drivers: AccountDirectory<Driver>,
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}

impl AccountService {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            riders: AccountDirectory::new(config.rider_buckets),
            drivers: AccountDirectory::new(config.driver_buckets),
        }
    }

    /// Always succeeds. A repeated username gets a second, independent entry.
    pub fn register_rider(&mut self, username: &str, password: &str) -> RiderId {
        let id = self.riders.insert(Rider::new(username, password));
        info!(username, bucket = id.bucket, "rider registered");
        RiderId(id)
    }

    /// Always succeeds. A repeated username gets a second, independent entry.
    pub fn register_driver(&mut self, username: &str, password: &str) -> DriverId {
        let id = self.drivers.insert(Driver::new(username, password));
        info!(username, bucket = id.bucket, "driver registered");
        DriverId(id)
    }

    pub fn login_rider(&self, username: &str, password: &str) -> Option<RiderId> {
        let found = self.riders.find(username, password).map(RiderId);
        log_login("rider", username, found.is_some());
        found
    }

    pub fn login_driver(&self, username: &str, password: &str) -> Option<DriverId> {
        let found = self.drivers.find(username, password).map(DriverId);
        log_login("driver", username, found.is_some());
        found
    }

    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.riders.get(id.0)
    }

    pub fn rider_mut(&mut self, id: RiderId) -> Option<&mut Rider> {
        self.riders.get_mut(id.0)
    }

    pub fn driver(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(id.0)
    }

    pub fn driver_mut(&mut self, id: DriverId) -> Option<&mut Driver> {
        self.drivers.get_mut(id.0)
    }

    /// Appends the ride to the rider's history and marks it active.
    /// Refused while a previous ride is still active.
    pub fn request_ride(&mut self, id: RiderId, ride: Ride) -> Result<(), Error> {
        let rider = self.riders.get_mut(id.0).ok_or(Error::UnknownRider)?;
        if rider.has_active_ride {
            debug!(username = %rider.username, "ride refused, ride already active");
            return Err(Error::ActiveRide);
        }
        info!(username = %rider.username, ride_id = %ride.ride_id, "ride requested");
        rider.rides.append(ride);
        rider.has_active_ride = true;
        Ok(())
    }

    /// Clears the rider's active ride. The ride stays in the history.
    pub fn complete_ride(&mut self, id: RiderId) -> Result<(), Error> {
        let rider = self.riders.get_mut(id.0).ok_or(Error::UnknownRider)?;
        if !rider.has_active_ride {
            return Err(Error::NoActiveRide);
        }
        info!(username = %rider.username, "ride completed");
        rider.has_active_ride = false;
        Ok(())
    }

    /// The rider's rides, most recent first. Empty for an unknown handle.
    pub fn ride_history(&self, id: RiderId) -> impl Iterator<Item = &Ride> {
        self.rider(id)
            .map(|rider| rider.rides.iter_backward())
            .into_iter()
            .flatten()
    }

    pub fn set_driver_available(&mut self, id: DriverId, available: bool) -> Option<()> {
        let driver = self.driver_mut(id)?;
        driver.is_available = available;
        Some(())
    }

    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn riders(&self) -> &AccountDirectory<Rider> {
        &self.riders
    }

    pub fn drivers(&self) -> &AccountDirectory<Driver> {
        &self.drivers
    }
}

fn log_login(role: &str, username: &str, success: bool) {
    if success {
        info!(role, username, "logged in");
    } else {
        debug!(role, username, "invalid credentials");
    }
}

//! Replays caller commands against an [`AccountService`].
//!
//! The engine plays the part of an interactive front end: at most one
//! account is logged in at a time, and ride commands act on that rider.

use tracing::debug;

use crate::dto::{Command, CommandType, Outcome, OutcomeRow};
use crate::service::{AccountService, DriverId, RiderId};
use crate::stores::Ride;
use crate::{Error, StoreConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Rider(RiderId),
    Driver(DriverId),
}

#[derive(Debug, Default)]
pub struct Engine {
    service: AccountService,
    session: Option<Session>,
    processed: usize,
}

impl Engine {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            service: AccountService::new(config),
            session: None,
            processed: 0,
        }
    }

    pub fn service(&self) -> &AccountService {
        &self.service
    }

    /// Processes one command and appends its outcome rows to `rows`.
    /// Refusals are outcomes, never errors.
    pub fn process_command(&mut self, command: Command, rows: &mut Vec<OutcomeRow>) {
        self.processed += 1;
        let line = self.processed;
        let kind = command.command;

        let outcome = match kind {
            CommandType::RegisterRider | CommandType::RegisterDriver
                if command.username.is_empty() || command.password.is_empty() =>
            {
                Outcome::InvalidInput
            }
            CommandType::RegisterRider => {
                self.service
                    .register_rider(&command.username, &command.password);
                Outcome::Registered
            }
            CommandType::RegisterDriver => {
                self.service
                    .register_driver(&command.username, &command.password);
                Outcome::Registered
            }
            CommandType::LoginRider | CommandType::LoginDriver => self.process_login(&command),
            CommandType::RequestRide => self.process_request_ride(command),
            CommandType::CompleteRide => match self.rider_session() {
                Some(id) => refusal(self.service.complete_ride(id), Outcome::RideCompleted),
                None => Outcome::NotLoggedIn,
            },
            CommandType::ViewHistory => match self.rider_session() {
                Some(id) => {
                    let before = rows.len();
                    rows.extend(
                        self.service
                            .ride_history(id)
                            .map(|ride| OutcomeRow::ride(line, kind, ride)),
                    );
                    if rows.len() > before {
                        return;
                    }
                    Outcome::NoRides
                }
                None => Outcome::NotLoggedIn,
            },
            CommandType::SetAvailable | CommandType::SetUnavailable => match self.session {
                Some(Session::Driver(id)) => {
                    let available = kind == CommandType::SetAvailable;
                    match self.service.set_driver_available(id, available) {
                        Some(()) => Outcome::AvailabilityChanged,
                        None => Outcome::NotLoggedIn,
                    }
                }
                _ => Outcome::NotLoggedIn,
            },
            CommandType::Logout => match self.session.take() {
                Some(_) => Outcome::LoggedOut,
                None => Outcome::NotLoggedIn,
            },
        };
        debug!(line, ?kind, ?outcome, "command processed");
        rows.push(OutcomeRow::status(line, kind, outcome));
    }

    fn process_login(&mut self, command: &Command) -> Outcome {
        // Logging in starts from the main menu, so any previous session ends.
        self.session = None;
        if command.username.is_empty() || command.password.is_empty() {
            return Outcome::InvalidInput;
        }
        self.session = match command.command {
            CommandType::LoginRider => self
                .service
                .login_rider(&command.username, &command.password)
                .map(Session::Rider),
            _ => self
                .service
                .login_driver(&command.username, &command.password)
                .map(Session::Driver),
        };
        match self.session {
            Some(_) => Outcome::LoggedIn,
            None => Outcome::InvalidCredentials,
        }
    }

    fn process_request_ride(&mut self, command: Command) -> Outcome {
        let Some(id) = self.rider_session() else {
            return Outcome::NotLoggedIn;
        };
        if command.ride_id.is_empty() || command.pickup.is_empty() || command.dropoff.is_empty() {
            return Outcome::InvalidInput;
        }
        let ride = Ride::new(command.ride_id, command.pickup, command.dropoff);
        refusal(self.service.request_ride(id, ride), Outcome::RideRequested)
    }

    fn rider_session(&self) -> Option<RiderId> {
        match self.session {
            Some(Session::Rider(id)) => Some(id),
            _ => None,
        }
    }
}

fn refusal(result: Result<(), Error>, success: Outcome) -> Outcome {
    match result {
        Ok(()) => success,
        Err(Error::ActiveRide) => Outcome::ActiveRide,
        Err(Error::NoActiveRide) => Outcome::NoActiveRide,
        Err(Error::UnknownRider) => Outcome::NotLoggedIn,
    }
}

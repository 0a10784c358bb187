use serde::{Deserialize, Serialize};

use crate::stores::Ride;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    RegisterRider,
    RegisterDriver,
    LoginRider,
    LoginDriver,
    RequestRide,
    CompleteRide,
    ViewHistory,
    SetAvailable,
    SetUnavailable,
    Logout,
}

/// One line of a session script. Columns a command doesn't use are empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Command {
    pub command: CommandType,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub ride_id: String,
    #[serde(default)]
    pub pickup: String,
    #[serde(default)]
    pub dropoff: String,
}

impl Command {
    pub fn new(command: CommandType) -> Self {
        Self {
            command,
            username: String::new(),
            password: String::new(),
            ride_id: String::new(),
            pickup: String::new(),
            dropoff: String::new(),
        }
    }

    pub fn with_credentials(command: CommandType, username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
            ..Self::new(command)
        }
    }

    pub fn request_ride(ride_id: &str, pickup: &str, dropoff: &str) -> Self {
        Self {
            ride_id: ride_id.to_owned(),
            pickup: pickup.to_owned(),
            dropoff: dropoff.to_owned(),
            ..Self::new(CommandType::RequestRide)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Registered,
    LoggedIn,
    InvalidCredentials,
    RideRequested,
    ActiveRide,
    RideCompleted,
    NoActiveRide,
    NotLoggedIn,
    InvalidInput,
    AvailabilityChanged,
    LoggedOut,
    Ride,
    NoRides,
}

/// One line of runner output. History commands produce one row per ride.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeRow {
    pub line: usize,
    pub command: CommandType,
    pub outcome: Outcome,
    pub ride_id: Option<String>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
}

impl OutcomeRow {
    pub fn status(line: usize, command: CommandType, outcome: Outcome) -> Self {
        Self {
            line,
            command,
            outcome,
            ride_id: None,
            pickup: None,
            dropoff: None,
        }
    }

    pub fn ride(line: usize, command: CommandType, ride: &Ride) -> Self {
        Self {
            line,
            command,
            outcome: Outcome::Ride,
            ride_id: Some(ride.ride_id.clone()),
            pickup: Some(ride.pickup.clone()),
            dropoff: Some(ride.dropoff.clone()),
        }
    }
}

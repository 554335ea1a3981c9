use std::path::{Path, PathBuf};

use innkeep_core::AllocationLimits;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Options for a generation run. Every field has a default so a config file
/// only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Number of hotel chains.
    pub chains: u32,
    /// Hotels created for each chain.
    pub hotels_per_chain: u32,
    /// Rooms created for each hotel.
    pub rooms_per_hotel: u32,
    /// Employees created for each hotel.
    pub employees_per_hotel: u32,
    /// Customers created for each hotel.
    pub customers_per_hotel: u32,
    /// Bookings made by each customer.
    pub bookings_per_customer: u32,
    /// Path of the SQL file to write.
    #[schemars(with = "String")]
    pub output: PathBuf,
    /// Longest stay in nights.
    pub max_stay: u32,
    /// Day offsets reserved per booking when sizing the check-in window.
    pub offset_window_per_booking: u32,
    /// Draws attempted per booking before the room is declared full.
    pub max_allocation_attempts: u32,
    /// Seed for reproducible runs; drawn from the OS when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub province: String,
    pub country: String,
    pub zip: String,
    /// Password assigned to every employee and customer.
    pub password: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chains: 5,
            hotels_per_chain: 8,
            rooms_per_hotel: 5,
            employees_per_hotel: 5,
            customers_per_hotel: 3,
            bookings_per_customer: 3,
            output: PathBuf::from("MockData.sql"),
            max_stay: 7,
            offset_window_per_booking: 70,
            max_allocation_attempts: 10_000,
            seed: None,
            province: "Ontario".to_string(),
            country: "Canada".to_string(),
            zip: "X1X 1X1".to_string(),
            password: "password".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self, GenerationError> {
        let content = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.bookings_per_customer > 0 && self.rooms_per_hotel == 0 {
            return Err(GenerationError::InvalidConfig(
                "bookings require at least one room per hotel".to_string(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(GenerationError::InvalidConfig(
                "output path must not be empty".to_string(),
            ));
        }
        self.allocation_limits()
            .validate()
            .map_err(|err| GenerationError::InvalidConfig(err.to_string()))
    }

    /// Configured seed, or a fresh one from the thread-local generator.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Stay bounds handed to the booking allocator.
    pub fn allocation_limits(&self) -> AllocationLimits {
        AllocationLimits {
            max_offset: self
                .offset_window_per_booking
                .saturating_mul(self.bookings_per_customer),
            max_stay: self.max_stay,
            max_attempts: self.max_allocation_attempts,
        }
    }

    pub fn total_hotels(&self) -> u64 {
        u64::from(self.chains) * u64::from(self.hotels_per_chain)
    }

    pub fn total_rooms(&self) -> u64 {
        self.total_hotels() * u64::from(self.rooms_per_hotel)
    }

    pub fn total_employees(&self) -> u64 {
        self.total_hotels() * u64::from(self.employees_per_hotel)
    }

    pub fn total_customers(&self) -> u64 {
        self.total_hotels() * u64::from(self.customers_per_hotel)
    }

    pub fn total_bookings(&self) -> u64 {
        self.total_customers() * u64::from(self.bookings_per_customer)
    }
}

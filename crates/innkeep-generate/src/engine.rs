use std::path::{Path, PathBuf};
use std::time::Instant;

use innkeep_core::{AllocationLimits, RoomBookingLedger};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::model::{
    Address, Amenity, BookingRental, ChainPhoneNumber, Customer, Employee, EmployeeRole,
    GenerationReport, Hotel, HotelChain, HotelPhoneNumber, Role, Room,
};
use crate::output::sql::write_statements;
use crate::pools::{self, AMENITY_NAMES, CITIES, ROLE_NAMES};

/// Hotel categories cycle through 1..=5 within a chain.
const CATEGORY_LEVELS: u32 = 5;

/// Result of a generation run written to disk.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output: PathBuf,
    pub report: GenerationReport,
}

/// Everything produced by a run before it touches the filesystem.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub seed: u64,
    pub statements: Vec<String>,
    pub ledger: RoomBookingLedger,
    pub table_counts: Vec<(&'static str, u64)>,
    pub allocation_retries: u64,
}

/// Entry point for generating the hotel dataset from a config.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: GeneratorConfig,
    run_id: Option<String>,
}

impl GenerationEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            run_id: None,
        }
    }

    /// Tag the report and log events with an id issued by the caller.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolve_seed(&self) -> u64 {
        self.config.resolved_seed()
    }

    /// Generate and write the SQL file named by the config.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        self.run_to(&self.config.output)
    }

    /// Generate and write the SQL file to `output`.
    pub fn run_to(&self, output: &Path) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = self
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let seed = self.resolve_seed();

        info!(
            run_id = %run_id,
            seed,
            chains = self.config.chains,
            output = %output.display(),
            "generation started"
        );

        let dataset = match self.generate(seed) {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                return Err(err);
            }
        };

        let bytes_written = write_statements(output, &dataset.statements)?;

        let mut report = GenerationReport::new(run_id.clone(), seed);
        report.record_tables(&dataset.table_counts);
        report.bookings_allocated = dataset.ledger.bookings() as u64;
        report.allocation_retries = dataset.allocation_retries;
        report.bytes_written = bytes_written;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            statements = report.statements_total,
            bookings = report.bookings_allocated,
            retries = report.allocation_retries,
            bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            output: output.to_path_buf(),
            report,
        })
    }

    /// Build every statement for `seed` in memory.
    pub fn generate(&self, seed: u64) -> Result<GeneratedDataset, GenerationError> {
        self.config.validate()?;
        let limits = self.config.allocation_limits();
        let mut ctx = GenerationContext::new(seed);

        for _ in 0..self.config.chains {
            self.generate_chain(&mut ctx, &limits)?;
        }

        self.generate_amenities(&mut ctx);

        for name in ROLE_NAMES {
            ctx.emit(&Role {
                name: (*name).to_string(),
            });
        }

        for employee_ssn in 1..=ctx.employees.issued() {
            let role_id = ctx.rng.random_range(1..=ROLE_NAMES.len() as u64);
            ctx.emit(&EmployeeRole {
                employee_ssn,
                role_id,
            });
        }

        for chain_id in 1..=ctx.chains.issued() {
            let phone_number = pools::phone_number(&mut ctx.rng);
            ctx.emit(&ChainPhoneNumber {
                chain_id,
                phone_number,
            });
        }

        for hotel_id in 1..=ctx.hotels.issued() {
            let phone_number = pools::phone_number(&mut ctx.rng);
            ctx.emit(&HotelPhoneNumber {
                hotel_id,
                phone_number,
            });
        }

        let table_counts = ctx.table_counts().to_vec();
        let allocation_retries = ctx.allocation_retries();
        let (statements, ledger) = ctx.into_parts();

        Ok(GeneratedDataset {
            seed,
            statements,
            ledger,
            table_counts,
            allocation_retries,
        })
    }

    fn generate_chain(
        &self,
        ctx: &mut GenerationContext,
        limits: &AllocationLimits,
    ) -> Result<(), GenerationError> {
        let chain_id = ctx.chains.next_id();
        let address = self.address(ctx, 300);
        ctx.emit(&HotelChain {
            name: format!("Hotels {chain_id}"),
            email: format!("hotel{chain_id}@hotels.com"),
            address,
        });

        for hotel_index in 1..=self.config.hotels_per_chain {
            let hotel_id = ctx.hotels.next_id();
            let category = (hotel_index - 1) % CATEGORY_LEVELS + 1;
            let address = self.address(ctx, 300);
            ctx.emit(&Hotel {
                chain_id,
                category,
                email: format!("hotel{hotel_index}@hotels{chain_id}.com"),
                address,
            });

            for _ in 0..self.config.rooms_per_hotel {
                let room = random_room(ctx, hotel_id, category);
                ctx.rooms.next_id();
                ctx.emit(&room);
            }

            for _ in 0..self.config.employees_per_hotel {
                let ssn = ctx.employees.next_id();
                let name = pools::person_name(&mut ctx.rng);
                let address = self.address(ctx, 400);
                ctx.emit(&Employee {
                    ssn,
                    name,
                    hotel_id,
                    address,
                    password: self.config.password.clone(),
                });
            }

            for _ in 0..self.config.customers_per_hotel {
                let ssn = ctx.customers.next_id();
                let name = pools::person_name(&mut ctx.rng);
                let address = self.address(ctx, 400);
                ctx.emit(&Customer {
                    ssn,
                    name,
                    address,
                    password: self.config.password.clone(),
                });

                for _ in 0..self.config.bookings_per_customer {
                    let room_id = ctx.rng.random_range(1..=ctx.rooms.issued());
                    let allocation = ctx.book_room(room_id, limits)?;
                    ctx.emit(&BookingRental {
                        stay: allocation.range,
                        checked_in: false,
                        room_id,
                        customer_ssn: ssn,
                    });
                }
            }
        }

        debug!(chain_id, hotels = ctx.hotels.issued(), "chain generated");
        Ok(())
    }

    /// One amenity row per bit set in a random mask, most significant bit first.
    fn generate_amenities(&self, ctx: &mut GenerationContext) {
        let slots = AMENITY_NAMES.len() as u32;
        for room_id in 1..=ctx.rooms.issued() {
            let mask: u32 = ctx.rng.random_range(0..(1_u32 << slots));
            for (index, name) in AMENITY_NAMES.iter().enumerate() {
                let bit = slots - 1 - index as u32;
                if (mask >> bit) & 1 == 1 {
                    ctx.emit(&Amenity {
                        room_id,
                        name: (*name).to_string(),
                    });
                }
            }
        }
    }

    fn address(&self, ctx: &mut GenerationContext, max_street_number: u32) -> Address {
        let street_number = ctx.rng.random_range(1..=max_street_number);
        let street_name = pools::street_name(&mut ctx.rng);
        let city = pools::pick(&mut ctx.rng, CITIES).to_string();
        Address {
            street_number,
            street_name,
            city,
            province: self.config.province.clone(),
            country: self.config.country.clone(),
            zip: self.config.zip.clone(),
        }
    }
}

fn random_room(ctx: &mut GenerationContext, hotel_id: u64, category: u32) -> Room {
    let rng = &mut ctx.rng;
    let room_number = rng.random_range(1..=100);
    let base_rate: u32 = rng.random_range(40..=60);
    let price = f64::from(base_rate) * f64::from(category) / 1.2;
    let capacity = rng.random_range(2..=6);
    let sea_view = rng.random_range(1..=17) > 10;
    let mountain_view = rng.random_range(1..=37) > 20;
    let damages = rng.random_range(1..=100) < 15;
    let can_be_extended = rng.random_range(1..=100) < 50;

    Room {
        room_number,
        hotel_id,
        price,
        capacity,
        sea_view,
        mountain_view,
        damages,
        can_be_extended,
    }
}

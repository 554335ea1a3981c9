use innkeep_core::DayRange;
use serde::{Deserialize, Serialize};

use crate::templates::{InsertRow, SqlValue};

/// Postal address shared by chains, hotels and people.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street_number: u32,
    pub street_name: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub zip: String,
}

impl Address {
    fn values(&self) -> [SqlValue; 6] {
        [
            SqlValue::int(self.street_number),
            SqlValue::text(self.street_name.clone()),
            SqlValue::text(self.city.clone()),
            SqlValue::text(self.province.clone()),
            SqlValue::text(self.country.clone()),
            SqlValue::text(self.zip.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct HotelChain {
    pub name: String,
    pub email: String,
    pub address: Address,
}

impl InsertRow for HotelChain {
    const TABLE: &'static str = "HotelChain";
    const COLUMNS: &'static [&'static str] = &[
        "chain_name",
        "email",
        "street_number",
        "street_name",
        "city",
        "province",
        "country",
        "zip",
    ];

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![
            SqlValue::text(self.name.clone()),
            SqlValue::text(self.email.clone()),
        ];
        values.extend(self.address.values());
        values
    }
}

#[derive(Debug, Clone)]
pub struct Hotel {
    pub chain_id: u64,
    pub category: u32,
    pub email: String,
    pub address: Address,
}

impl InsertRow for Hotel {
    const TABLE: &'static str = "Hotel";
    const COLUMNS: &'static [&'static str] = &[
        "chain_id",
        "category",
        "email",
        "street_number",
        "street_name",
        "city",
        "province",
        "country",
        "zip",
    ];

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![
            SqlValue::from(self.chain_id),
            SqlValue::int(self.category),
            SqlValue::text(self.email.clone()),
        ];
        values.extend(self.address.values());
        values
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub room_number: u32,
    pub hotel_id: u64,
    pub price: f64,
    pub capacity: u32,
    pub sea_view: bool,
    pub mountain_view: bool,
    pub damages: bool,
    pub can_be_extended: bool,
}

impl InsertRow for Room {
    const TABLE: &'static str = "Room";
    const COLUMNS: &'static [&'static str] = &[
        "room_number",
        "hotel_id",
        "price",
        "capacity",
        "sea_view",
        "mountain_view",
        "damages",
        "can_be_extended",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::int(self.room_number),
            SqlValue::from(self.hotel_id),
            SqlValue::Money(self.price),
            SqlValue::int(self.capacity),
            SqlValue::Bool(self.sea_view),
            SqlValue::Bool(self.mountain_view),
            SqlValue::Bool(self.damages),
            SqlValue::Bool(self.can_be_extended),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub ssn: u64,
    pub name: String,
    pub hotel_id: u64,
    pub address: Address,
    pub password: String,
}

impl InsertRow for Employee {
    const TABLE: &'static str = "Employee";
    const COLUMNS: &'static [&'static str] = &[
        "ssn",
        "name",
        "hotel_id",
        "street_number",
        "street_name",
        "city",
        "province",
        "country",
        "zip",
        "password",
    ];

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![
            SqlValue::from(self.ssn),
            SqlValue::text(self.name.clone()),
            SqlValue::from(self.hotel_id),
        ];
        values.extend(self.address.values());
        values.push(SqlValue::text(self.password.clone()));
        values
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub ssn: u64,
    pub name: String,
    pub address: Address,
    pub password: String,
}

impl InsertRow for Customer {
    const TABLE: &'static str = "Customer";
    const COLUMNS: &'static [&'static str] = &[
        "ssn",
        "name",
        "street_number",
        "street_name",
        "city",
        "province",
        "country",
        "zip",
        "password",
    ];

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![SqlValue::from(self.ssn), SqlValue::text(self.name.clone())];
        values.extend(self.address.values());
        values.push(SqlValue::text(self.password.clone()));
        values
    }
}

/// A reservation whose dates are relative to the moment the SQL is loaded.
#[derive(Debug, Clone)]
pub struct BookingRental {
    pub stay: DayRange,
    pub checked_in: bool,
    pub room_id: u64,
    pub customer_ssn: u64,
}

impl InsertRow for BookingRental {
    const TABLE: &'static str = "BookingRental";
    const COLUMNS: &'static [&'static str] = &[
        "reservation_date",
        "check_in_date",
        "check_out_date",
        "checked_in",
        "room_id",
        "customer_ssn",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Expr("now()".to_string()),
            SqlValue::Expr(day_offset_expr(self.stay.check_in())),
            SqlValue::Expr(day_offset_expr(self.stay.check_out())),
            SqlValue::Bool(self.checked_in),
            SqlValue::from(self.room_id),
            SqlValue::from(self.customer_ssn),
        ]
    }
}

fn day_offset_expr(days: u32) -> String {
    format!("now() + INTERVAL '{days} DAY'")
}

#[derive(Debug, Clone)]
pub struct Amenity {
    pub room_id: u64,
    pub name: String,
}

impl InsertRow for Amenity {
    const TABLE: &'static str = "Amenity";
    const COLUMNS: &'static [&'static str] = &["room_id", "name", "description"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.room_id),
            SqlValue::text(self.name.clone()),
            SqlValue::Null,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Role {
    pub name: String,
}

impl InsertRow for Role {
    const TABLE: &'static str = "Role";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::text(self.name.clone()), SqlValue::Null]
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeRole {
    pub employee_ssn: u64,
    pub role_id: u64,
}

impl InsertRow for EmployeeRole {
    const TABLE: &'static str = "EmployeeRole";
    const COLUMNS: &'static [&'static str] = &["employee_ssn", "role_id"];

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::from(self.employee_ssn), SqlValue::from(self.role_id)]
    }
}

#[derive(Debug, Clone)]
pub struct ChainPhoneNumber {
    pub chain_id: u64,
    pub phone_number: String,
}

impl InsertRow for ChainPhoneNumber {
    const TABLE: &'static str = "ChainPhoneNumber";
    const COLUMNS: &'static [&'static str] = &["chain_id", "phone_number"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.chain_id),
            SqlValue::text(self.phone_number.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct HotelPhoneNumber {
    pub hotel_id: u64,
    pub phone_number: String,
}

impl InsertRow for HotelPhoneNumber {
    const TABLE: &'static str = "HotelPhoneNumber";
    const COLUMNS: &'static [&'static str] = &["hotel_id", "phone_number"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.hotel_id),
            SqlValue::text(self.phone_number.clone()),
        ]
    }
}

/// Statements emitted for a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub statements: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub tables: Vec<TableReport>,
    pub statements_total: u64,
    pub bookings_allocated: u64,
    pub allocation_retries: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            statements_total: 0,
            bookings_allocated: 0,
            allocation_retries: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    /// Build per-table entries from the counts gathered during generation,
    /// keeping the order in which tables first appeared.
    pub fn record_tables(&mut self, counts: &[(&'static str, u64)]) {
        self.tables = counts
            .iter()
            .map(|(table, statements)| TableReport {
                table: (*table).to_string(),
                statements: *statements,
            })
            .collect();
        self.statements_total = self.tables.iter().map(|table| table.statements).sum();
    }

    pub fn statements_for(&self, table: &str) -> u64 {
        self.tables
            .iter()
            .find(|report| report.table == table)
            .map(|report| report.statements)
            .unwrap_or(0)
    }
}

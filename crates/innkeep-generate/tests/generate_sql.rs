use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use innkeep_core::Error as CoreError;
use innkeep_generate::{GenerationEngine, GenerationError, GeneratorConfig};

fn seeded_config(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::default()
    }
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("innkeep_generate_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}

/// Pull `(room_id, check_in, check_out)` out of a rendered booking statement.
fn parse_booking(line: &str) -> (u64, u32, u32) {
    let values = line
        .split_once("VALUES (")
        .map(|(_, rest)| rest.trim_end_matches(");"))
        .expect("values list");
    let parts: Vec<&str> = values.split(", ").collect();
    assert_eq!(parts.len(), 6, "unexpected booking shape: {line}");
    let days = |expr: &str| -> u32 {
        expr.trim_start_matches("now() + INTERVAL '")
            .trim_end_matches(" DAY'")
            .parse()
            .expect("day offset")
    };
    (
        parts[4].parse().expect("room id"),
        days(parts[1]),
        days(parts[2]),
    )
}

#[test]
fn generate_is_deterministic() {
    let out_dir = temp_out_dir("determinism");
    let path_a = out_dir.join("a.sql");
    let path_b = out_dir.join("b.sql");

    let engine = GenerationEngine::new(seeded_config(17));
    let result_a = engine.run_to(&path_a).expect("run generation A");
    let result_b = engine.run_to(&path_b).expect("run generation B");

    let sql_a = fs::read_to_string(&path_a).expect("read a.sql");
    let sql_b = fs::read_to_string(&path_b).expect("read b.sql");
    assert_eq!(sql_a, sql_b, "seeded output should be identical");
    assert_eq!(result_a.report.seed, 17);
    assert_eq!(result_a.report.tables, result_b.report.tables);
    assert_ne!(result_a.report.run_id, result_b.report.run_id);

    let ledger_a = engine.generate(17).expect("dataset A").ledger;
    let ledger_b = engine.generate(17).expect("dataset B").ledger;
    assert_eq!(ledger_a, ledger_b);

    let _ = fs::remove_dir_all(out_dir);
}

#[test]
fn caller_run_id_reaches_report() {
    let out_dir = temp_out_dir("run_id");
    let result = GenerationEngine::new(seeded_config(8))
        .with_run_id("run-fixed")
        .run_to(&out_dir.join("MockData.sql"))
        .expect("run");

    assert_eq!(result.report.run_id, "run-fixed");

    let _ = fs::remove_dir_all(out_dir);
}

#[test]
fn generate_respects_entity_counts() {
    let config = seeded_config(3);
    let engine = GenerationEngine::new(config.clone());
    let out_dir = temp_out_dir("counts");
    let result = engine.run_to(&out_dir.join("MockData.sql")).expect("run");
    let report = &result.report;

    assert_eq!(report.statements_for("HotelChain"), u64::from(config.chains));
    assert_eq!(report.statements_for("Hotel"), config.total_hotels());
    assert_eq!(report.statements_for("Room"), config.total_rooms());
    assert_eq!(report.statements_for("Employee"), config.total_employees());
    assert_eq!(report.statements_for("Customer"), config.total_customers());
    assert_eq!(report.statements_for("BookingRental"), config.total_bookings());
    assert_eq!(report.statements_for("Role"), 4);
    assert_eq!(report.statements_for("EmployeeRole"), config.total_employees());
    assert_eq!(report.statements_for("ChainPhoneNumber"), u64::from(config.chains));
    assert_eq!(report.statements_for("HotelPhoneNumber"), config.total_hotels());
    assert!(report.statements_for("Amenity") <= config.total_rooms() * 6);
    assert_eq!(report.bookings_allocated, config.total_bookings());

    let sql = fs::read_to_string(&result.output).expect("read output");
    assert_eq!(sql.lines().count() as u64, report.statements_total);
    assert_eq!(report.bytes_written, sql.len() as u64);
    assert!(sql.lines().all(|line| line.starts_with("INSERT INTO ")));

    let _ = fs::remove_dir_all(out_dir);
}

#[test]
fn booking_statements_never_double_book_a_room() {
    let engine = GenerationEngine::new(seeded_config(99));
    let dataset = engine.generate(99).expect("generate");

    let mut stays: BTreeMap<u64, Vec<(u32, u32)>> = BTreeMap::new();
    for line in dataset
        .statements
        .iter()
        .filter(|line| line.starts_with("INSERT INTO BookingRental("))
    {
        let (room_id, check_in, check_out) = parse_booking(line);
        assert!(check_out > check_in);
        assert!(check_out - check_in <= 7);
        stays.entry(room_id).or_default().push((check_in, check_out));
    }

    for ranges in stays.values() {
        for (index, (start, end)) in ranges.iter().enumerate() {
            for (other_start, other_end) in &ranges[index + 1..] {
                assert!(
                    end <= other_start || other_end <= start,
                    "overlapping stays {start}..{end} and {other_start}..{other_end}"
                );
            }
        }
    }
    assert!(dataset.ledger.is_consistent());
}

#[test]
fn statements_follow_table_templates() {
    let config = GeneratorConfig {
        chains: 1,
        hotels_per_chain: 1,
        rooms_per_hotel: 1,
        employees_per_hotel: 1,
        customers_per_hotel: 1,
        bookings_per_customer: 1,
        seed: Some(5),
        ..GeneratorConfig::default()
    };
    let dataset = GenerationEngine::new(config).generate(5).expect("generate");
    let statements = &dataset.statements;

    assert!(statements[0].starts_with(
        "INSERT INTO HotelChain(chain_name, email, street_number, street_name, city, province, country, zip) VALUES ('Hotels 1', 'hotel1@hotels.com', "
    ));
    assert!(statements[0].ends_with(", 'Ontario', 'Canada', 'X1X 1X1');"));
    assert!(statements[1].starts_with(
        "INSERT INTO Hotel(chain_id, category, email, street_number, street_name, city, province, country, zip) VALUES (1, 1, 'hotel1@hotels1.com', "
    ));
    assert!(statements[2].starts_with(
        "INSERT INTO Room(room_number, hotel_id, price, capacity, sea_view, mountain_view, damages, can_be_extended) VALUES ("
    ));
    assert!(statements[3].starts_with("INSERT INTO Employee(ssn, name, hotel_id, "));
    assert!(statements[3].ends_with(", 'password');"));
    assert!(statements[4].starts_with("INSERT INTO Customer(ssn, name, "));
    assert!(statements[5].starts_with(
        "INSERT INTO BookingRental(reservation_date, check_in_date, check_out_date, checked_in, room_id, customer_ssn) VALUES (now(), now() + INTERVAL '"
    ));
    assert!(statements[5].ends_with(", false, 1, 1);"));

    let roles: Vec<&String> = statements
        .iter()
        .filter(|line| line.starts_with("INSERT INTO Role("))
        .collect();
    assert_eq!(
        roles[3],
        "INSERT INTO Role(name, description) VALUES ('Front Desk Person', NULL);"
    );
    assert!(
        statements
            .last()
            .expect("statements")
            .starts_with("INSERT INTO HotelPhoneNumber(hotel_id, phone_number) VALUES (1, '")
    );
}

#[test]
fn saturated_room_surfaces_capacity_exceeded() {
    let config = GeneratorConfig {
        chains: 1,
        hotels_per_chain: 1,
        rooms_per_hotel: 1,
        employees_per_hotel: 0,
        customers_per_hotel: 1,
        bookings_per_customer: 2,
        offset_window_per_booking: 0,
        max_stay: 1,
        max_allocation_attempts: 50,
        seed: Some(1),
        ..GeneratorConfig::default()
    };
    let out_dir = temp_out_dir("capacity");
    let output = out_dir.join("never.sql");

    let err = GenerationEngine::new(config)
        .run_to(&output)
        .expect_err("second booking cannot fit");

    assert!(matches!(
        err,
        GenerationError::Allocation(CoreError::CapacityExceeded {
            room_id: 1,
            attempts: 50
        })
    ));
    assert!(!output.exists());

    let _ = fs::remove_dir_all(out_dir);
}

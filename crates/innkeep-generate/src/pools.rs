use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "Bob", "Andrew", "Ashley", "Elizabeth", "Liam", "David", "Hudi", "Alex", "Natalia", "Ivana",
    "Jon", "Nick", "Ryan", "Meg", "Sarah", "Susan", "Mary", "Emily", "Sahil", "Paul",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Jones", "Brown", "Davis", "Miller", "Wilson", "Hernandez",
    "Young", "Rogers", "Reed", "Cook", "Wood", "Price", "Sanchez", "Stewart", "Ward", "Perez",
];

pub const CITIES: &[&str] = &[
    "Toronto",
    "London",
    "Milton",
    "Ottawa",
    "Mississauga",
    "Oshawa",
    "Oakville",
    "Brampton",
    "Hamilton",
    "Stratford",
];

pub const STREET_NAMES: &[&str] = &[
    "Bank", "First", "Third", "Main", "Second", "Metcalfe", "Bay", "Pine", "Elm", "Oak", "Willow",
    "Laurier",
];

pub const STREET_TYPES: &[&str] = &["Avenue", "Street", "Crescent", "Boulevard", "Lane", "Way"];

/// Amenity catalogue; a room's amenity mask is read against this order.
pub const AMENITY_NAMES: &[&str] = &[
    "Coffee Machine",
    "Mini-Fridge",
    "TV",
    "Room service",
    "Air conditioner",
    "Laundry Machine",
];

pub const ROLE_NAMES: &[&str] = &["Custodian", "Maid", "Bellboy", "Front Desk Person"];

/// Pick one value uniformly. Pools are non-empty constants.
pub fn pick<R: Rng>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values[rng.random_range(0..values.len())]
}

pub fn person_name<R: Rng>(rng: &mut R) -> String {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    format!("{first} {last}")
}

pub fn street_name<R: Rng>(rng: &mut R) -> String {
    let name = pick(rng, STREET_NAMES);
    let kind = pick(rng, STREET_TYPES);
    format!("{name} {kind}")
}

/// Ten-digit phone number without separators.
pub fn phone_number<R: Rng>(rng: &mut R) -> String {
    rng.random_range(1_000_000_000_u64..=9_999_999_999).to_string()
}

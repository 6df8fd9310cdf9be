use crate::error::GameError;
use crate::validation;
use crate::Chips;

/// Table-level parameters fixed for the life of a hand (§3 TableConfig).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableConfig {
    pub max_seats: u8,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub ante: Chips,
    pub starting_stack: Chips,
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        validation::require_range(self.max_seats as i64, 2, 10, "maxSeats")?;
        if self.big_blind < self.small_blind {
            return Err(GameError::invalid_config("bigBlind must be >= smallBlind").with_field("bigBlind"));
        }
        if self.small_blind < 0 || self.big_blind < 0 || self.ante < 0 || self.starting_stack < 0 {
            return Err(GameError::invalid_config("blinds, ante, and stack must be non-negative"));
        }
        Ok(())
    }
}

/// A hand's seating: which seats are occupied and who deals (§2 HandConfig).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HandConfig {
    pub table: TableConfig,
    pub dealer_seat: u8,
    pub seats: Vec<u8>,
}

impl HandConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        self.table.validate()?;
        if self.seats.len() < 2 {
            return Err(GameError::invalid_config("at least 2 active players are required"));
        }
        if self.seats.iter().any(|&s| s >= self.table.max_seats) {
            return Err(GameError::invalid_config("seat out of range").with_field("seats"));
        }
        if self.dealer_seat >= self.table.max_seats || !self.seats.contains(&self.dealer_seat) {
            return Err(GameError::invalid_config("dealerSeat out of range").with_field("dealerSeat"));
        }
        Ok(())
    }
}

impl crate::Arbitrary for TableConfig {
    fn random() -> Self {
        use rand::Rng;
        let small_blind = rand::rng().random_range(1..=25);
        let big_blind = small_blind * 2;
        TableConfig {
            max_seats: rand::rng().random_range(2..=9),
            small_blind,
            big_blind,
            ante: 0,
            starting_stack: big_blind * rand::rng().random_range(20..=200),
        }
    }
}

impl crate::Arbitrary for HandConfig {
    fn random() -> Self {
        use crate::Arbitrary as _;
        let table = TableConfig::random();
        let n_seats = {
            use rand::Rng;
            rand::rng().random_range(2..=table.max_seats)
        };
        let mut seats: Vec<u8> = (0..table.max_seats).collect();
        shuffle(&mut seats);
        seats.truncate(n_seats as usize);
        seats.sort_unstable();
        let dealer_seat = seats[{
            use rand::Rng;
            rand::rng().random_range(0..seats.len())
        }];
        HandConfig { table, dealer_seat, seats }
    }
}

fn shuffle(seats: &mut [u8]) {
    use rand::Rng;
    let mut rng = rand::rng();
    for i in (1..seats.len()).rev() {
        let j = rng.random_range(0..=i);
        seats.swap(i, j);
    }
}

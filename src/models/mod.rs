pub mod day_state;
pub mod location;
pub mod times;
pub mod tracking_period;

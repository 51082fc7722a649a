pub mod day_state_service;
pub mod location_resolver;
pub mod schedule_service;

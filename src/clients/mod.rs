pub mod schedule_client;

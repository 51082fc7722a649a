pub mod times_loader;

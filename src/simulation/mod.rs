pub mod trip_generator;

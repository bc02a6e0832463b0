pub mod aggregate_service;

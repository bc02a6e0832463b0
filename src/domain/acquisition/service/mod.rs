pub mod acquisition_service;

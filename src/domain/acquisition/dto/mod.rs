pub mod run_report;

pub mod affordability;
pub mod currency;
pub mod loan;
pub mod profile;
pub mod report;

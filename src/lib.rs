pub mod bank;
pub mod batch;
pub mod checksum;
pub mod country_format;
pub mod extract;
pub mod generator;
pub mod logging;
pub mod normalize;
pub mod reference;
pub mod structure;
pub mod util;
pub mod validation;

pub use bank::{BankLookup, BankRecord, BankRegistry};
pub use validation::{validate, ErrorKind, ValidIban, ValidationError, ValidationOutcome, Validator};

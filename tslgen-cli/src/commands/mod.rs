pub mod ci_status;
pub mod generate;

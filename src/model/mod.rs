pub mod outcome;
pub mod table;

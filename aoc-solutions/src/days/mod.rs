pub mod day_01;
pub mod day_04;
pub mod day_05;
pub mod day_10;
pub mod day_11;
pub mod day_12;

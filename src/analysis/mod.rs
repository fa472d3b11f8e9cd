pub mod budget;
pub mod category;

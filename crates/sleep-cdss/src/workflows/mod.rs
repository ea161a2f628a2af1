pub mod therapy;

pub mod carts;
pub mod recipes;

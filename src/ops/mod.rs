pub mod calendar;
pub mod due;
pub mod filter;
pub mod store;
pub mod todo_ops;

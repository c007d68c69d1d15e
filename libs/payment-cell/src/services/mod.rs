pub mod intent;
pub mod settlement;

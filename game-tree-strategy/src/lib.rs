mod strategy;

pub mod strategies;

pub use self::strategy::Strategy;

mod enumerable;

pub use enumerable::Enumerable;

pub mod writer;

pub use writer::ProductTableWriter;

pub mod augmented_matrix;
pub mod config;
pub mod elimination;
pub mod file_io;
pub mod solver_pipeline;

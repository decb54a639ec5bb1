// Utility functions
pub mod io;

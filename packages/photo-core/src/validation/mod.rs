pub mod filename;

pub use filename::sanitize_file_name;

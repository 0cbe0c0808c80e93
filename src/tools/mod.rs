mod index_file;
mod path_validator;
mod salt_reader;
mod source_scanner;

pub use index_file::{Index, IndexEntry};
pub use path_validator::{
    ensure_directory_exists, resolve_path, validate_directory_exists, validate_file_exists,
};
pub use salt_reader::read_salt;
pub use source_scanner::scan_source_files;

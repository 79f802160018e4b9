extern crate reqwest;

use crate::error;
use crate::lang::Error;
use crate::mach::FileSystem;

type Result<T> = std::result::Result<T, Error>;

/// Programs live in the real filesystem; LOAD also accepts http(s)
/// URLs so published programs can be fetched directly.
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> LocalFileSystem {
        LocalFileSystem
    }
}

fn io_error(error: std::io::Error) -> Error {
    error!(UnsupportedOperation; error.to_string().as_str())
}

fn http_error(error: reqwest::Error) -> Error {
    error!(UnsupportedOperation; error.to_string().as_str())
}

impl FileSystem for LocalFileSystem {
    fn catalog(
        &mut self,
        path: Option<&str>,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Vec<String>> {
        let path = path.unwrap_or(".");
        let mut entries: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(path).map_err(io_error)? {
            let name = entry.map_err(io_error)?.file_name();
            let name = name.to_string_lossy();
            if let Some(prefix) = prefix {
                if !name.starts_with(prefix) {
                    continue;
                }
            }
            if let Some(suffix) = suffix {
                if !name.ends_with(suffix) {
                    continue;
                }
            }
            entries.push(name.to_string());
        }
        entries.sort();
        Ok(entries)
    }

    fn save_program(&mut self, source: &str, filename: &str) -> Result<()> {
        std::fs::write(filename, source).map_err(io_error)
    }

    fn load_program(&mut self, filename: &str) -> Result<String> {
        if filename.starts_with("http://") || filename.starts_with("https://") {
            let response = reqwest::blocking::get(filename).map_err(http_error)?;
            return response.text().map_err(http_error);
        }
        std::fs::read_to_string(filename).map_err(io_error)
    }

    fn set_current_directory(&mut self, path: &str) -> Result<()> {
        std::env::set_current_dir(path).map_err(io_error)
    }

    fn scratch_file(&mut self, filename: &str) -> Result<()> {
        std::fs::remove_file(filename).map_err(io_error)
    }

    fn copy_file(&mut self, from: &str, to: &str) -> Result<()> {
        std::fs::copy(from, to).map(|_| ()).map_err(io_error)
    }

    fn rename_file(&mut self, from: &str, to: &str) -> Result<()> {
        std::fs::rename(from, to).map_err(io_error)
    }
}

use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Output collaborator. The core never renders; PRINT, INPUT prompts,
/// CATALOG listings and error display all pass through here.
pub trait Screen {
    /// Writes text followed by a newline.
    fn display_string(&mut self, text: &str);
    /// Writes text at the cursor with no newline.
    fn display_string_at_cursor(&mut self, text: &str);
    fn newline(&mut self);
    fn display_error(&mut self, error: &Error);
    fn clear_viewport(&mut self);
}

/// Program file store collaborator. Every call may fail; the core
/// surfaces failures as statement-level errors.
pub trait FileSystem {
    fn catalog(
        &mut self,
        path: Option<&str>,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Vec<String>>;
    fn save_program(&mut self, source: &str, filename: &str) -> Result<()>;
    fn load_program(&mut self, filename: &str) -> Result<String>;
    fn set_current_directory(&mut self, path: &str) -> Result<()>;
    fn scratch_file(&mut self, filename: &str) -> Result<()>;
    fn copy_file(&mut self, from: &str, to: &str) -> Result<()>;
    fn rename_file(&mut self, from: &str, to: &str) -> Result<()>;
}

/// Discards all output; the default for a runtime nobody is watching.
pub struct NullScreen;

impl Screen for NullScreen {
    fn display_string(&mut self, _text: &str) {}
    fn display_string_at_cursor(&mut self, _text: &str) {}
    fn newline(&mut self) {}
    fn display_error(&mut self, _error: &Error) {}
    fn clear_viewport(&mut self) {}
}

/// Refuses all file operations.
pub struct NullFileSystem;

impl FileSystem for NullFileSystem {
    fn catalog(
        &mut self,
        _path: Option<&str>,
        _prefix: Option<&str>,
        _suffix: Option<&str>,
    ) -> Result<Vec<String>> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
    fn save_program(&mut self, _source: &str, _filename: &str) -> Result<()> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
    fn load_program(&mut self, _filename: &str) -> Result<String> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
    fn set_current_directory(&mut self, _path: &str) -> Result<()> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
    fn scratch_file(&mut self, _filename: &str) -> Result<()> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
    fn copy_file(&mut self, _from: &str, _to: &str) -> Result<()> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
    fn rename_file(&mut self, _from: &str, _to: &str) -> Result<()> {
        Err(error!(UnsupportedOperation; "NO FILESYSTEM"))
    }
}

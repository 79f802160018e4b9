#![allow(dead_code)]

use microbasic::error;
use microbasic::lang::Error;
use microbasic::mach::{Event, FileSystem, Runtime, Screen};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// A Runtime wired to a recording screen and an in-memory filesystem,
/// with a driver that returns everything printed as a transcript.
pub struct Rig {
    pub runtime: Runtime,
    output: Rc<RefCell<String>>,
    pub files: Rc<RefCell<HashMap<String, String>>>,
}

impl Rig {
    pub fn new() -> Rig {
        let output = Rc::new(RefCell::new(String::new()));
        let files = Rc::new(RefCell::new(HashMap::new()));
        let runtime = Runtime::new(
            Box::new(RecordingScreen(output.clone())),
            Box::new(MemoryFileSystem(files.clone())),
        );
        Rig {
            runtime,
            output,
            files,
        }
    }

    pub fn enter(&mut self, source: &str) {
        self.runtime.enter(source);
    }

    /// Drains the runtime and returns everything printed since the
    /// last call. An INPUT suspension appends its prompt and returns;
    /// a program that refuses to finish gets a marker instead.
    pub fn exec(&mut self) -> String {
        let mut spins = 0;
        loop {
            match self.runtime.execute(5000) {
                Event::Stopped => break,
                Event::Input(prompt) => {
                    self.output.borrow_mut().push_str(&prompt);
                    break;
                }
                Event::Running => {
                    spins += 1;
                    if spins > 2 {
                        self.output.borrow_mut().push_str("~CYCLES EXCEEDED~");
                        break;
                    }
                }
            }
        }
        self.output.replace(String::new())
    }

    pub fn interrupt(&mut self) {
        self.runtime.interrupt();
    }
}

struct RecordingScreen(Rc<RefCell<String>>);

impl Screen for RecordingScreen {
    fn display_string(&mut self, text: &str) {
        let mut out = self.0.borrow_mut();
        out.push_str(text);
        out.push('\n');
    }

    fn display_string_at_cursor(&mut self, text: &str) {
        self.0.borrow_mut().push_str(text);
    }

    fn newline(&mut self) {
        self.0.borrow_mut().push('\n');
    }

    fn display_error(&mut self, error: &Error) {
        let mut out = self.0.borrow_mut();
        out.push_str(&error.to_string());
        out.push('\n');
    }

    fn clear_viewport(&mut self) {
        self.0.borrow_mut().clear();
    }
}

struct MemoryFileSystem(Rc<RefCell<HashMap<String, String>>>);

impl FileSystem for MemoryFileSystem {
    fn catalog(
        &mut self,
        _path: Option<&str>,
        prefix: Option<&str>,
        suffix: Option<&str>,
    ) -> Result<Vec<String>> {
        let mut entries: Vec<String> = self
            .0
            .borrow()
            .keys()
            .filter(|name| prefix.map_or(true, |p| name.starts_with(p)))
            .filter(|name| suffix.map_or(true, |s| name.ends_with(s)))
            .cloned()
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn save_program(&mut self, source: &str, filename: &str) -> Result<()> {
        self.0
            .borrow_mut()
            .insert(filename.to_string(), source.to_string());
        Ok(())
    }

    fn load_program(&mut self, filename: &str) -> Result<String> {
        match self.0.borrow().get(filename) {
            Some(source) => Ok(source.clone()),
            None => Err(error!(UnsupportedOperation; "FILE NOT FOUND")),
        }
    }

    fn set_current_directory(&mut self, _path: &str) -> Result<()> {
        Ok(())
    }

    fn scratch_file(&mut self, filename: &str) -> Result<()> {
        match self.0.borrow_mut().remove(filename) {
            Some(_) => Ok(()),
            None => Err(error!(UnsupportedOperation; "FILE NOT FOUND")),
        }
    }

    fn copy_file(&mut self, from: &str, to: &str) -> Result<()> {
        let source = self.load_program(from)?;
        self.0.borrow_mut().insert(to.to_string(), source);
        Ok(())
    }

    fn rename_file(&mut self, from: &str, to: &str) -> Result<()> {
        let source = self
            .0
            .borrow_mut()
            .remove(from)
            .ok_or_else(|| error!(UnsupportedOperation; "FILE NOT FOUND"))?;
        self.0.borrow_mut().insert(to.to_string(), source);
        Ok(())
    }
}

/*!
# Terminal module

The interactive REPL: linefeed line editing, a Ctrl-C BREAK flag, and
the local FileSystem collaborator behind SAVE/LOAD/CATALOG.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

mod fs;

use crate::lang::Error;
use crate::mach::{Event, Runtime, Screen};
use ansi_term::Style;
use fs::LocalFileSystem;
use linefeed::{Interface, ReadResult, Signal};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .is_err()
    {
        eprintln!("Unable to install the break handler.");
    }
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let mut runtime = Runtime::new(
        Box::new(TermScreen),
        Box::new(LocalFileSystem::new()),
    );
    let command = Interface::new("BASIC")?;
    let input = Interface::new("INPUT")?;
    input.set_report_signal(Signal::Interrupt, true);
    println!("microBASIC");
    println!("READY.");
    loop {
        if interrupted.load(Ordering::SeqCst) {
            interrupted.store(false, Ordering::SeqCst);
            runtime.interrupt();
        }
        match runtime.execute(5000) {
            Event::Running => {}
            Event::Stopped => {
                let string = match command.read_line()? {
                    ReadResult::Input(string) => string,
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                };
                if runtime.enter(&string) {
                    command.add_history_unique(string);
                }
            }
            Event::Input(prompt) => {
                input.set_prompt(&prompt)?;
                match input.read_line()? {
                    ReadResult::Input(string) => {
                        runtime.enter(&string);
                    }
                    ReadResult::Signal(Signal::Interrupt) => {
                        input.set_buffer("")?;
                        input.lock_reader().cancel_read_line()?;
                        runtime.interrupt();
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                }
            }
        }
    }
    Ok(())
}

struct TermScreen;

impl Screen for TermScreen {
    fn display_string(&mut self, text: &str) {
        println!("{}", text);
    }

    fn display_string_at_cursor(&mut self, text: &str) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
    }

    fn newline(&mut self) {
        println!();
    }

    fn display_error(&mut self, error: &Error) {
        println!("{}", Style::new().bold().paint(error.to_string()));
    }

    fn clear_viewport(&mut self) {
        print!("\x1b[2J\x1b[H");
        let _ = std::io::stdout().flush();
    }
}

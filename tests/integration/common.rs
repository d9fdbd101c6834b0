//! Common test utilities.

use hbnb_console::commands::CommandOutput;
use hbnb_console::console::Console;
use hbnb_console::persistence::FileStorage;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// A console over a store file in its own temporary directory.
pub struct TestConsole {
    pub console: Console,
    dir: TempDir,
}

impl TestConsole {
    pub fn new() -> Self {
        let dir = tempdir().unwrap();
        let store = FileStorage::open(dir.path().join("file.json")).unwrap();
        Self {
            console: Console::new(store),
            dir,
        }
    }

    /// Path of the store file.
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("file.json")
    }

    /// Executes one line and returns what it printed.
    pub fn exec(&mut self, line: &str) -> String {
        render(&self.console.execute(line))
    }

    /// Creates an instance and returns its id.
    pub fn create(&mut self, class: &str) -> String {
        self.exec(&format!("create {class}")).trim_end().to_string()
    }
}

/// Renders an output the way the console prints it.
pub fn render(output: &CommandOutput) -> String {
    let mut buf = Vec::new();
    output.write_to(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

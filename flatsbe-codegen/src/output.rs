//! Output sinks for generated units.
//!
//! The generator never decides where text goes. It asks an [`OutputManager`]
//! for one sink per unit, after the unit has been rendered in full.

use flatsbe_ir::to_snake_case;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Factory for named output sinks, one per generated unit.
pub trait OutputManager {
    /// Creates (or truncates) the sink for the unit `name`.
    ///
    /// # Errors
    /// Returns any I/O error raised while opening the sink.
    fn create_output(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>>;

    /// Returns the key identifying the sink that `name` is written to.
    ///
    /// Two names with the same key share one sink.
    fn key_for(&self, name: &str) -> String {
        name.to_string()
    }
}

impl<T: OutputManager + ?Sized> OutputManager for &mut T {
    fn create_output(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        (**self).create_output(name)
    }

    fn key_for(&self, name: &str) -> String {
        (**self).key_for(name)
    }
}

/// Keeps generated units in memory, in creation order.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutputManager {
    units: Vec<(String, Vec<u8>)>,
}

impl MemoryOutputManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text of unit `name`, if present and valid UTF-8.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|(unit, _)| unit == name)
            .and_then(|(_, bytes)| std::str::from_utf8(bytes).ok())
    }

    /// Iterates the unit names in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if no unit was created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl OutputManager for MemoryOutputManager {
    fn create_output(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let index = match self.units.iter().position(|(unit, _)| unit == name) {
            Some(index) => {
                self.units[index].1.clear();
                index
            }
            None => {
                self.units.push((name.to_string(), Vec::new()));
                self.units.len() - 1
            }
        };
        Ok(Box::new(&mut self.units[index].1))
    }
}

/// Writes each unit to `<snake_case name>.rs` inside a directory.
#[derive(Debug, Clone)]
pub struct DirectoryOutputManager {
    dir: PathBuf,
}

impl DirectoryOutputManager {
    /// Creates a manager for `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns any I/O error raised while creating the directory.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path used for unit `name`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.rs", to_snake_case(name)))
    }
}

impl OutputManager for DirectoryOutputManager {
    fn create_output(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let path = self.path_for(name);
        tracing::trace!("creating output file {}", path.display());
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }

    fn key_for(&self, name: &str) -> String {
        format!("{}.rs", to_snake_case(name))
    }
}

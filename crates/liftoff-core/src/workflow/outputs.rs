//! Step outputs for later workflow steps

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::inputs::WorkflowEnv;

/// Named values handed to later steps through the `GITHUB_OUTPUT` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutputs {
    entries: Vec<(String, String)>,
}

impl StepOutputs {
    /// Create an empty set of outputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an output, replacing an earlier value with the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Value of an output
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether no output was set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render in the `GITHUB_OUTPUT` file format
    ///
    /// Multi-line values use the heredoc form with a delimiter that does not
    /// occur as a line of the value.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            if value.contains('\n') {
                let mut delimiter = String::from("EOF");
                while value.lines().any(|line| line == delimiter) {
                    delimiter.push('_');
                }
                out.push_str(&format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter));
            } else {
                out.push_str(&format!("{}={}\n", name, value));
            }
        }
        out
    }

    /// Append the outputs to a file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(self.render().as_bytes())?;
        debug!(path = %path.display(), count = self.entries.len(), "step outputs written");
        Ok(())
    }

    /// Append the outputs to the file named by `GITHUB_OUTPUT`, if set
    ///
    /// Returns whether anything was written.
    pub fn write_to_env(&self, env: &WorkflowEnv) -> Result<bool> {
        match env.get("GITHUB_OUTPUT") {
            Some(path) => {
                self.write_to(Path::new(path))?;
                Ok(true)
            }
            None => {
                debug!("GITHUB_OUTPUT not set, skipping step outputs");
                Ok(false)
            }
        }
    }
}

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use policy_model::{join_rule, load_policy_line, PolicyModel, PolicyStore, StoreError};

/// File-backed policy store.
///
/// Holds only the path it was constructed with; every load and save opens
/// and closes its own handle, so nothing stays open between calls. Writes
/// are plain create-and-overwrite: not atomic, no backup file, and no
/// locking against concurrent writers.
///
/// Only bulk transfer is supported. The single-rule mutation methods of
/// [`PolicyStore`] always return [`StoreError::Unsupported`].
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store reading from and writing to `path`.
    ///
    /// The path is kept as given; it is not validated and the filesystem is
    /// not touched. An empty path only fails once load or save is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store was configured with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the policy file, feeding each line through `handler`.
    ///
    /// Lines are read one at a time and trimmed of surrounding whitespace
    /// before the handler sees them. The handler owns the grammar: it skips
    /// blanks, comments, and anything else it rejects, and appends accepted
    /// rules into `model`. Existing model content is kept — callers wanting
    /// an idempotent reload should [`PolicyModel::clear`] first.
    ///
    /// A read failure mid-stream stops the loop immediately; lines already
    /// handled stay applied to the model.
    pub fn load_policy_with<H>(
        &self,
        model: &mut PolicyModel,
        mut handler: H,
    ) -> Result<(), StoreError>
    where
        H: FnMut(&str, &mut PolicyModel),
    {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let file = File::open(&self.path).map_err(StoreError::Open)?;
        let mut reader = BufReader::new(file);
        let before = model.rule_count();

        let mut line = String::new();
        loop {
            line.clear();
            let bytes = reader.read_line(&mut line).map_err(StoreError::Read)?;
            if bytes == 0 {
                break;
            }
            handler(line.trim(), model);
        }

        debug!(
            path = %self.path.display(),
            rules = model.rule_count().saturating_sub(before),
            "loaded policy file"
        );
        Ok(())
    }

    /// Save `model` to the policy file, rendering each rule's fields with
    /// `format`.
    ///
    /// Every rule of the `p` section is written first, then every rule of
    /// the `g` section, one `<tag>, <fields>` line each. Tags within a
    /// section come out in the model's lexicographic order and rules under
    /// one tag in insertion order, so the output is stable across runs. The
    /// file ends without a trailing newline, and any previous content is
    /// overwritten.
    pub fn save_policy_with<F>(&self, model: &PolicyModel, format: F) -> Result<(), StoreError>
    where
        F: Fn(&[String]) -> String,
    {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath);
        }

        let mut text = String::new();
        for section in ["p", "g"] {
            for (ptype, rules) in model.section(section) {
                for rule in rules {
                    text.push_str(ptype);
                    text.push_str(", ");
                    text.push_str(&format(rule));
                    text.push('\n');
                }
            }
        }
        let text = text.trim_end_matches('\n');

        let file = File::create(&self.path).map_err(StoreError::Create)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .map_err(StoreError::Write)?;
        writer.flush().map_err(StoreError::Flush)?;

        debug!(
            path = %self.path.display(),
            bytes = text.len(),
            "saved policy file"
        );
        Ok(())
    }
}

impl PolicyStore for FileStore {
    fn load_policy(&self, model: &mut PolicyModel) -> Result<(), StoreError> {
        self.load_policy_with(model, load_policy_line)
    }

    fn save_policy(&mut self, model: &PolicyModel) -> Result<(), StoreError> {
        self.save_policy_with(model, join_rule)
    }

    fn add_policy(
        &mut self,
        _section: &str,
        _ptype: &str,
        _rule: &[String],
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("add_policy"))
    }

    fn remove_policy(
        &mut self,
        _section: &str,
        _ptype: &str,
        _rule: &[String],
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("remove_policy"))
    }

    fn remove_filtered_policy(
        &mut self,
        _section: &str,
        _ptype: &str,
        _field_index: usize,
        _field_values: &[String],
    ) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("remove_filtered_policy"))
    }
}

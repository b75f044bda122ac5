use crate::model::PolicyModel;

/// Errors produced by policy storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend was configured with an empty file path.
    #[error("file path cannot be empty")]
    EmptyPath,

    #[error("failed to open policy file: {0}")]
    Open(#[source] std::io::Error),

    #[error("failed to read policy file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to create policy file: {0}")]
    Create(#[source] std::io::Error),

    #[error("failed to write policy file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to flush policy file: {0}")]
    Flush(#[source] std::io::Error),

    /// The backend does not implement the requested operation. Carries the
    /// operation name.
    #[error("operation not supported by this policy store: {0}")]
    Unsupported(&'static str),
}

/// Contract implemented by every policy storage backend.
///
/// A backend moves whole rule sets between its medium and an in-memory
/// [`PolicyModel`]. Loading appends into the model rather than replacing it;
/// callers that want an idempotent reload should [`PolicyModel::clear`]
/// first.
///
/// Not every backend supports every operation. Bulk-only stores return
/// [`StoreError::Unsupported`] from the three single-rule mutation methods.
pub trait PolicyStore {
    /// Append every stored rule into `model`.
    fn load_policy(&self, model: &mut PolicyModel) -> Result<(), StoreError>;

    /// Replace the stored rule set with the contents of `model`.
    fn save_policy(&mut self, model: &PolicyModel) -> Result<(), StoreError>;

    /// Add a single rule to the stored rule set.
    fn add_policy(
        &mut self,
        section: &str,
        ptype: &str,
        rule: &[String],
    ) -> Result<(), StoreError>;

    /// Remove a single rule from the stored rule set. Removing a rule that
    /// is not present is not an error.
    fn remove_policy(
        &mut self,
        section: &str,
        ptype: &str,
        rule: &[String],
    ) -> Result<(), StoreError>;

    /// Remove every stored rule whose fields starting at `field_index`
    /// match `field_values`, with the empty string matching any value.
    fn remove_filtered_policy(
        &mut self,
        section: &str,
        ptype: &str,
        field_index: usize,
        field_values: &[String],
    ) -> Result<(), StoreError>;
}

/// Volatile backend holding its rule set in process memory.
///
/// Supports the full mutation contract, which makes it the store of choice
/// for tests and for engines that never persist. Contents are lost when the
/// store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    held: PolicyModel,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the held rule set.
    pub fn model(&self) -> &PolicyModel {
        &self.held
    }
}

impl PolicyStore for MemoryStore {
    fn load_policy(&self, model: &mut PolicyModel) -> Result<(), StoreError> {
        for (section, ptype, rules) in self.held.iter() {
            for rule in rules {
                model.add_rule(section, ptype, rule.clone());
            }
        }
        Ok(())
    }

    fn save_policy(&mut self, model: &PolicyModel) -> Result<(), StoreError> {
        self.held = model.clone();
        Ok(())
    }

    fn add_policy(
        &mut self,
        section: &str,
        ptype: &str,
        rule: &[String],
    ) -> Result<(), StoreError> {
        self.held.add_rule(section, ptype, rule.to_vec());
        Ok(())
    }

    fn remove_policy(
        &mut self,
        section: &str,
        ptype: &str,
        rule: &[String],
    ) -> Result<(), StoreError> {
        self.held.remove_rule(section, ptype, rule);
        Ok(())
    }

    fn remove_filtered_policy(
        &mut self,
        section: &str,
        ptype: &str,
        field_index: usize,
        field_values: &[String],
    ) -> Result<(), StoreError> {
        self.held
            .remove_filtered_rules(section, ptype, field_index, field_values);
        Ok(())
    }
}

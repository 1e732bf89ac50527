use summarize_core::RawInstance;

use crate::error::StoreError;

/// The module's persisted sub-settings.
pub trait SettingsStore {
    /// Every configured summarize instance, in configuration order.
    fn load_instances(&self) -> Result<Vec<RawInstance>, StoreError>;

    /// Clear the one-shot refresh flag of the instance at `index`.
    fn clear_refresh(&self, index: usize) -> Result<(), StoreError>;
}

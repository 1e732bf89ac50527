use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use summarize_core::{DataSlot, EventId, FieldName, RecordId, RecordValues, RepeatKind};

use crate::error::StoreError;

/// Outcome of a write the store accepted for processing. A non-empty
/// `errors` list means the write was rejected field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    pub item_count: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl WriteReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Record data access.
pub trait RecordStore {
    /// Stored values of `fields` for `record` at `slot`. Fields with nothing
    /// stored are left out of the map.
    fn read(
        &self,
        record: &RecordId,
        fields: &[FieldName],
        slot: &DataSlot,
    ) -> Result<RecordValues, StoreError>;

    /// Overwrite `values` at `slot`.
    fn write(
        &self,
        record: &RecordId,
        slot: &DataSlot,
        values: &IndexMap<FieldName, String>,
    ) -> Result<WriteReport, StoreError>;

    /// Every record with data in `event`.
    fn record_ids(&self, event: &EventId) -> Result<Vec<RecordId>, StoreError>;

    /// Existing instance numbers of `record` in `event` for a repeating
    /// `kind`, ascending. Always empty for [`RepeatKind::NoRepeat`].
    fn instances(
        &self,
        record: &RecordId,
        event: &EventId,
        kind: &RepeatKind,
    ) -> Result<Vec<u32>, StoreError>;
}

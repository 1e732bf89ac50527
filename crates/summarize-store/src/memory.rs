use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;

use summarize_core::{
    DataSlot, EventId, FieldName, RawInstance, RawValue, RecordId, RecordValues, RepeatKind,
};

use crate::error::StoreError;
use crate::records::{RecordStore, WriteReport};
use crate::settings::SettingsStore;

/// One accepted write, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteLogEntry {
    pub record: RecordId,
    pub slot: DataSlot,
    pub values: IndexMap<FieldName, String>,
}

/// In-memory record data and settings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<(RecordId, DataSlot), RecordValues>>,
    instances: RwLock<Vec<RawInstance>>,
    writes: RwLock<Vec<WriteLogEntry>>,
    rejected: RwLock<HashSet<FieldName>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instances(instances: Vec<RawInstance>) -> Self {
        Self {
            instances: RwLock::new(instances),
            ..Self::default()
        }
    }

    /// Store one raw value without logging it as a write.
    pub fn insert(
        &self,
        record: impl Into<RecordId>,
        slot: DataSlot,
        field: impl Into<FieldName>,
        value: RawValue,
    ) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((record.into(), slot))
            .or_default()
            .insert(field.into(), value);
    }

    pub fn value(&self, record: &RecordId, slot: &DataSlot, field: &FieldName) -> Option<RawValue> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(record.clone(), slot.clone()))
            .and_then(|values| values.get(field).cloned())
    }

    /// Make every write touching `field` come back with a field error.
    pub fn reject_field(&self, field: impl Into<FieldName>) {
        self.rejected
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(field.into());
    }

    pub fn writes(&self) -> Vec<WriteLogEntry> {
        self.writes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn raw_instances(&self) -> Vec<RawInstance> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecordStore for MemoryStore {
    fn read(
        &self,
        record: &RecordId,
        fields: &[FieldName],
        slot: &DataSlot,
    ) -> Result<RecordValues, StoreError> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let Some(stored) = data.get(&(record.clone(), slot.clone())) else {
            return Ok(RecordValues::new());
        };

        Ok(fields
            .iter()
            .filter_map(|field| stored.get(field).map(|value| (field.clone(), value.clone())))
            .collect())
    }

    fn write(
        &self,
        record: &RecordId,
        slot: &DataSlot,
        values: &IndexMap<FieldName, String>,
    ) -> Result<WriteReport, StoreError> {
        let rejected = self.rejected.read().unwrap_or_else(PoisonError::into_inner);
        let errors: Vec<String> = values
            .keys()
            .filter(|field| rejected.contains(*field))
            .map(|field| format!("{record}: field {field} rejected the value"))
            .collect();
        if !errors.is_empty() {
            return Ok(WriteReport {
                item_count: 0,
                errors,
            });
        }

        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let stored = data.entry((record.clone(), slot.clone())).or_default();
        for (field, value) in values {
            stored.insert(field.clone(), RawValue::text(value.clone()));
        }

        self.writes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(WriteLogEntry {
                record: record.clone(),
                slot: slot.clone(),
                values: values.clone(),
            });

        tracing::trace!(record = %record, slot = %slot, fields = values.len(), "memory write");
        Ok(WriteReport {
            item_count: values.len(),
            errors: Vec::new(),
        })
    }

    fn record_ids(&self, event: &EventId) -> Result<Vec<RecordId>, StoreError> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let ids: BTreeSet<RecordId> = data
            .keys()
            .filter(|(_, slot)| slot.event() == event)
            .map(|(record, _)| record.clone())
            .collect();
        Ok(ids.into_iter().collect())
    }

    fn instances(
        &self,
        record: &RecordId,
        event: &EventId,
        kind: &RepeatKind,
    ) -> Result<Vec<u32>, StoreError> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let numbers: BTreeSet<u32> = data
            .keys()
            .filter(|(r, _)| r == record)
            .filter_map(|(_, slot)| match (kind, slot) {
                (
                    RepeatKind::ByForm(wanted),
                    DataSlot::FormInstance {
                        event: e,
                        form,
                        instance,
                    },
                ) if e == event && form == wanted => Some(*instance),
                (RepeatKind::ByEvent, DataSlot::EventInstance { event: e, instance })
                    if e == event =>
                {
                    Some(*instance)
                }
                _ => None,
            })
            .collect();
        Ok(numbers.into_iter().collect())
    }
}

impl SettingsStore for MemoryStore {
    fn load_instances(&self) -> Result<Vec<RawInstance>, StoreError> {
        Ok(self.raw_instances())
    }

    fn clear_refresh(&self, index: usize) -> Result<(), StoreError> {
        let mut instances = self.instances.write().unwrap_or_else(PoisonError::into_inner);
        let instance = instances
            .get_mut(index)
            .ok_or_else(|| StoreError::Settings(format!("no summarize instance at index {index}")))?;
        instance.refresh = false;
        Ok(())
    }
}

// Draft / saved-list / edit-cursor state for one user
use crate::model::{AttributeField, AttributeRecord, ReferenceTable, SessionError, Severity, UNKNOWN};
use crate::normalizer::deduce;
use crate::notifier::NotificationSink;
use crate::storage::SavedCars;
use std::sync::Arc;
use tracing::{info, warn};

/// Draft, saved list and edit cursor for one user.
pub struct Session {
    table: Arc<ReferenceTable>,
    notifier: Arc<dyn NotificationSink>,
    draft: Option<AttributeRecord>,
    saved: SavedCars,
    editing: Option<AttributeField>,
}

impl Session {
    pub fn new(table: Arc<ReferenceTable>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            table,
            notifier,
            draft: None,
            saved: SavedCars::new(),
            editing: None,
        }
    }

    pub fn draft(&self) -> Option<&AttributeRecord> {
        self.draft.as_ref()
    }

    pub fn saved(&self) -> &SavedCars {
        &self.saved
    }

    pub fn editing(&self) -> Option<AttributeField> {
        self.editing
    }

    /// Unresolved make/model still leaves the draft set.
    pub fn submit(&mut self, text: &str) -> Result<&AttributeRecord, SessionError> {
        if text.trim().is_empty() {
            self.draft = None;
            self.editing = None;
            return Err(self.reject(SessionError::EmptyInput));
        }

        let car = deduce(text, &self.table);
        info!(
            "Deduced: make={} model={} year={} engine={}",
            car.make, car.model, car.reg_year, car.engine_size
        );

        let outcome = match (car.has_make(), car.has_model()) {
            (false, false) => Some(SessionError::UnresolvedBoth),
            (false, true) => Some(SessionError::UnresolvedMake),
            (true, false) => Some(SessionError::UnresolvedModel),
            (true, true) => None,
        };

        let draft = self.draft.insert(car);
        match outcome {
            Some(err) => {
                warn!("Deduction incomplete: {}", err);
                self.notifier.notify(&err.to_string(), Severity::Error);
                Err(err)
            }
            None => {
                self.notifier
                    .notify("Car details deduced successfully!", Severity::Success);
                Ok(draft)
            }
        }
    }

    pub fn clear(&mut self) {
        self.draft = None;
        self.editing = None;
    }

    pub fn add(&mut self) -> Result<usize, SessionError> {
        let car = match self.draft.take() {
            None => return Err(self.reject(SessionError::NoDraft)),
            Some(car) if !car.has_make() || !car.has_model() => {
                self.draft = Some(car);
                return Err(self.reject(SessionError::IncompleteRecord));
            }
            Some(car) => car,
        };
        info!("Saving car: {} {}", car.make, car.model);
        let index = self.saved.save(car);
        self.clear();
        self.notifier
            .notify("Car added successfully!", Severity::Success);
        Ok(index)
    }

    pub fn begin_edit(&mut self, field: AttributeField) {
        self.editing = Some(field);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // Cursor is cleared even when the edit is rejected.
    pub fn save_edit(&mut self, field: AttributeField, value: &str) -> Result<(), SessionError> {
        self.editing = None;

        let Some(draft) = self.draft.as_mut() else {
            return Ok(());
        };

        if field.is_required() && (value.trim().is_empty() || value == UNKNOWN) {
            return Err(self.reject(SessionError::InvalidFieldEdit(field)));
        }

        info!("Edited {}: '{}' -> '{}'", field, draft.get(field), value);
        draft.set(field, value);
        Ok(())
    }

    pub fn delete_saved(&mut self, index: usize) -> Result<AttributeRecord, SessionError> {
        match self.saved.delete(index) {
            Ok(car) => {
                info!("Deleted saved car #{}: {} {}", index, car.make, car.model);
                self.notifier
                    .notify("Car deleted successfully.", Severity::Success);
                Ok(car)
            }
            Err(e) => {
                warn!("Delete rejected: {}", e);
                Err(self.reject(SessionError::InvalidIndex(index)))
            }
        }
    }

    fn reject(&self, err: SessionError) -> SessionError {
        warn!("Rejected: {}", err);
        self.notifier.notify(&err.to_string(), Severity::Error);
        err
    }
}

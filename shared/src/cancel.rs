use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancelReasonId(pub u8);

impl fmt::Display for CancelReasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelReason {
    pub id: CancelReasonId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancelError {
    #[error("unknown cancellation reason: {0}")]
    UnknownReason(CancelReasonId),
    #[error("cancellation form is not open")]
    NotOpen,
}

/// What the rider told us when cancelling. Neither field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelSubmission {
    pub reason: Option<CancelReason>,
    pub details: String,
}

/// State of the cancellation modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelForm {
    pub is_open: bool,
    pub selected: Option<CancelReasonId>,
    pub details: String,
}

impl CancelForm {
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hides the modal. The selection and text survive until the next submit.
    pub fn dismiss(&mut self) {
        self.is_open = false;
    }

    /// Closes the modal and forgets everything entered.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Single-select with toggle-off: choosing the selected reason again clears it.
    pub fn toggle(&mut self, id: CancelReasonId, catalog: &Catalog) -> Result<(), CancelError> {
        if !self.is_open {
            return Err(CancelError::NotOpen);
        }
        if catalog.cancel_reason(id).is_none() {
            return Err(CancelError::UnknownReason(id));
        }
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        Ok(())
    }

    pub fn set_details(&mut self, details: impl Into<String>) -> Result<(), CancelError> {
        if !self.is_open {
            return Err(CancelError::NotOpen);
        }
        self.details = details.into();
        Ok(())
    }

    /// Closes the modal and hands back what was entered, leaving the form blank.
    pub fn submit(&mut self, catalog: &Catalog) -> Result<CancelSubmission, CancelError> {
        if !self.is_open {
            return Err(CancelError::NotOpen);
        }
        let reason = self
            .selected
            .and_then(|id| catalog.cancel_reason(id))
            .cloned();
        let details = std::mem::take(&mut self.details);
        self.reset();
        Ok(CancelSubmission { reason, details })
    }
}

use crate::{contents::Document, error::Result};

impl Document {
    /// Timeouts sections are collected but carry no rules yet.
    pub(super) fn check_timeouts_section(&self) -> Result<()> {
        Ok(())
    }
}

// SPDX-License-Identifier: GPL-3.0-only

//! Bounded program text assembly

use crate::constants::PROGRAM_BUDGET;
use crate::errors::{GlError, GlResult};

/// Substitute `$KEY` placeholders in `template`
///
/// A key is the longest run of upper-case ASCII letters after `$`. Unknown
/// keys are an error.
pub fn fill(template: &str, params: &[(&str, &str)]) -> GlResult<String> {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let key_len = after
            .bytes()
            .take_while(|b| b.is_ascii_uppercase())
            .count();
        let key = &after[..key_len];
        let value = params
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(*v))
            .ok_or_else(|| {
                GlError::InvalidParameter(format!("no value for template key ${}", key))
            })?;
        out.push_str(value);
        rest = &after[key_len..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Appends program fragments while tracking a byte budget
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    text: String,
    budget: usize,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new(PROGRAM_BUDGET)
    }
}

impl ProgramBuilder {
    /// Empty program holding at most `budget - 1` bytes
    pub fn new(budget: usize) -> Self {
        Self {
            text: String::new(),
            budget,
        }
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.text.len() + 1)
    }

    pub fn push(&mut self, fragment: &str) -> GlResult<()> {
        if fragment.len() > self.remaining() {
            return Err(GlError::InvalidParameter(format!(
                "fragment program exceeds {} bytes",
                self.budget
            )));
        }
        self.text.push_str(fragment);
        Ok(())
    }

    pub fn push_template(&mut self, template: &str, params: &[(&str, &str)]) -> GlResult<()> {
        let fragment = fill(template, params)?;
        self.push(&fragment)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn finish(self) -> String {
        self.text
    }
}

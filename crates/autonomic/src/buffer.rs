// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Two alternating buffer files let the host read one parameter set while
//! the next is being written.

use crate::generation::GenerationParameters;
use crate::types::{AutonomicError, AutonomicResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const BUFFER_EXTENSION: &str = "yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferSlot {
    A,
    B,
}

impl BufferSlot {
    pub fn identifier(&self) -> &'static str {
        match self {
            BufferSlot::A => "Autonomic_Buffer_A",
            BufferSlot::B => "Autonomic_Buffer_B",
        }
    }

    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            BufferSlot::A
        } else {
            BufferSlot::B
        }
    }
}

impl fmt::Display for BufferSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Single-bit selector: 0 targets buffer A, 1 targets buffer B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferToggle {
    bit: u8,
}

impl BufferToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a toggle from the integer the host hands back; anything
    /// other than 0 selects buffer B.
    pub fn from_host(value: i64) -> Self {
        Self {
            bit: u8::from(value != 0),
        }
    }

    pub fn bit(&self) -> u8 {
        self.bit
    }

    pub fn current(&self) -> BufferSlot {
        BufferSlot::from_bit(self.bit)
    }

    /// Selects the write target for the current bit, flips the bit and
    /// returns the selected slot together with the new bit.
    pub fn advance(&mut self) -> (BufferSlot, u8) {
        let slot = self.current();
        self.bit ^= 1;
        (slot, self.bit)
    }
}

#[derive(Debug, Clone)]
pub struct BufferWriter {
    dir: PathBuf,
}

impl BufferWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slot: BufferSlot) -> PathBuf {
        self.dir.join(format!("{}.{BUFFER_EXTENSION}", slot.identifier()))
    }

    pub fn write(
        &self,
        slot: BufferSlot,
        params: &GenerationParameters,
    ) -> AutonomicResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| AutonomicError::BufferIo {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(slot);
        let yaml = params.to_yaml()?;
        fs::write(&path, yaml).map_err(|source| AutonomicError::BufferIo {
            path: path.clone(),
            source,
        })?;

        debug!(target: "autonomic", buffer = %slot, path = %path.display(), "buffer written");
        Ok(path)
    }
}

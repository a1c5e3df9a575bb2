// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod constants;
pub mod load_config;
pub mod presets;
mod ring_config;

pub use presets::{PresetError, PresetMetadata, RingPreset};
pub use ring_config::*;

// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Command implementations

mod context;
mod report_cmds;
mod scope_cmds;

pub use report_cmds::*;
pub use scope_cmds::*;

// SPDX-License-Identifier: MIT
pub mod chart;
pub mod header;
pub mod samples;
pub mod stats;

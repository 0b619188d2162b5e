// SPDX-License-Identifier: MIT
pub mod app;
pub mod input;
pub mod panels;
pub mod theme;

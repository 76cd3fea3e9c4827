//! Shared test harness modules for the Swellmind CLI.

use super::*;

mod helpers;
mod unit;

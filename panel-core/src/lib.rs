#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

// Sequencing core for the TSD BV055HDE (ST7703) MIPI-DSI panel.
//
// This crate stays portable across MCU firmware and host tooling by avoiding
// the Rust standard library. The physical transport (DSI host, GPIO banks)
// lives behind the `ControlLines`, `CommandBus`, and `Delay` traits so the
// same lifecycle logic drives real hardware and the host emulator alike.

pub mod init;
pub mod lifecycle;
pub mod lines;
pub mod mode;
pub mod power;
pub mod telemetry;
pub mod trigger;

// Licensed under the Apache-2.0 license

//! XML register description to Verilog register block generator.
//!
//! This crate turns a declarative description of named registers into a
//! Verilog module that decodes a CPU-style bus (address, write data, read
//! data, read/write strobes and a request line) and implements each register
//! from a closed set of behavior templates.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use tv_registers_generator::{generate_verilog_from_file, GeneratorConfig, LogReporter};
//!
//! let files = generate_verilog_from_file(
//!     Path::new("uart_regs.xml"),
//!     &GeneratorConfig::new(),
//!     &mut LogReporter,
//! )
//! .unwrap();
//! for file in files {
//!     std::fs::write(&file.file_name, &file.contents).unwrap();
//! }
//! ```
//!
//! Groups can also be assembled directly:
//!
//! ```
//! use tv_registers_generator::{BusConfig, RegisterGroup, RegisterParams, RegisterType};
//!
//! let mut group = RegisterGroup::new("leds", BusConfig::default().with_base_address(0x40));
//! group.add_register(RegisterType::Config, &RegisterParams::new("led_ctl", 8));
//! let verilog = group.render();
//! assert!(verilog.contains("led_ctl_rd_sel : rd_data = led_ctl;"));
//! ```
//!
//! ## Module Organization
//!
//! - [`value`]: numeric literal parsing (`8'hFF`, `4'b101`, `10`)
//! - [`config`]: bus and error policy configuration ([`GeneratorConfig`])
//! - [`diag`]: diagnostic sinks ([`Reporter`])
//! - [`types`]: ports, signals and the register kinds
//! - [`output`]: module rendering ([`GeneratedModule`])
//! - `codegen`: register groups, logic generation and the XML loader

pub mod config;
pub mod diag;
pub mod error;
pub mod output;
pub mod types;
pub mod util;
pub mod value;

mod codegen;

// Re-export main public API
pub use codegen::{generate_verilog, generate_verilog_from_file, load_description, RegisterGroup};
pub use config::{BusConfig, BusMapping, ErrorPolicy, GeneratorConfig};
pub use diag::{CollectingReporter, LogReporter, Reporter};
pub use error::{GeneratorError, LiteralError, Result};
pub use output::{GeneratedFile, GeneratedModule};
pub use types::{
    Direction, Port, Register, RegisterIdx, RegisterKind, RegisterParams, RegisterType, Signal,
};

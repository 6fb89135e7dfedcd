// Licensed under the Apache-2.0 license

//! Register groups and the entry points for generating Verilog.
//!
//! This module contains:
//! - [`RegisterGroup`], the aggregate that collects registers and their
//!   ports/signals and assigns offsets
//! - Entry point functions for code generation
//!
//! The implementation is split across submodules:
//! - `parse`: Loading an XML description into register groups
//! - `generate`: Converting a register group into a Verilog module

mod generate;
mod parse;

use log::debug;
use std::path::Path;

use crate::config::{BusConfig, GeneratorConfig};
use crate::diag::Reporter;
use crate::error::{GeneratorError, Result};
use crate::output::GeneratedFile;
use crate::types::{
    Port, Register, RegisterIdx, RegisterKind, RegisterParams, RegisterType, Signal,
};
use crate::util::local_address_width;

pub use parse::load_description;

/// One address-mapped block of registers behind a single bus interface.
///
/// Registers are only ever added. Each addition appends the register's ports
/// and signals, then reassigns offsets `0..N-1` in insertion order and
/// recomputes the local address width.
#[derive(Clone, Debug)]
pub struct RegisterGroup {
    name: String,
    bus: BusConfig,
    local_width: usize,
    registers: Vec<Register>,
    ports: Vec<Port>,
    signals: Vec<Signal>,
}

impl RegisterGroup {
    /// Create an empty group with the bus interface ports already in place.
    pub fn new(name: &str, bus: BusConfig) -> Self {
        let mut group = Self {
            name: name.to_string(),
            bus,
            local_width: local_address_width(0),
            registers: Vec::new(),
            ports: vec![Port::input("clk", 1), Port::input("reset", 1)],
            signals: Vec::new(),
        };
        group.bus_interface();
        group
    }

    fn bus_interface(&mut self) {
        let (addr_width, data_width) = (self.bus.addr_width, self.bus.data_width);
        self.ports.extend([
            Port::input("addr", addr_width),
            Port::input("wr_data", data_width),
            Port::output("rd_data", data_width),
            Port::output("doe", 1),
            Port::input("rd_n", 1),
            Port::input("wr_n", 1),
            Port::input(self.bus.request_pin(), 1),
        ]);
        self.signals.extend([
            Signal::reg("rd_data", data_width),
            Signal::reg("doe", 1),
            Signal::reg("block_select", 1),
        ]);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bus(&self) -> &BusConfig {
        &self.bus
    }

    /// Address bits decoded inside the block.
    pub fn local_width(&self) -> usize {
        self.local_width
    }

    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Ports accumulated so far (without the render-time interrupt ports).
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Internal signals accumulated so far.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn has_interrupts(&self) -> bool {
        self.registers.iter().any(Register::is_interrupt)
    }

    /// Add a register of the given type and return the index of the register
    /// named `params.name`.
    ///
    /// `IntFixed` adds two registers: the pending register itself and its
    /// mask, a config register named `<name>_msk` that resets to
    /// `params.default`.
    pub fn add_register(&mut self, ty: RegisterType, params: &RegisterParams) -> RegisterIdx {
        let name = params.name.as_str();
        let width = params.width;
        let default = params.default;
        match ty {
            RegisterType::Status => self.add(Register::new(name, width, RegisterKind::Status)),
            RegisterType::ReadStb => {
                self.add(Register::new(name, width, RegisterKind::ReadStrobe))
            }
            RegisterType::Config => {
                self.add(Register::new(name, width, RegisterKind::Config { default }))
            }
            RegisterType::WriteStb => self.add(Register::new(
                name,
                width,
                RegisterKind::WriteStrobe { default },
            )),
            RegisterType::SoftSet => {
                self.add(Register::new(name, width, RegisterKind::SoftSet { default }))
            }
            RegisterType::IntFixed => {
                let mask = self.registers.len() + 1;
                let pending = self.add(Register::new(
                    name,
                    width,
                    RegisterKind::InterruptFixed {
                        mask,
                        vector: params.int_value,
                    },
                ));
                self.add(Register::new(
                    format!("{name}_msk"),
                    width,
                    RegisterKind::Config { default },
                ));
                pending
            }
        }
    }

    fn add(&mut self, register: Register) -> RegisterIdx {
        debug!(
            "{}: adding {:?} register {} ({} bits)",
            self.name, register.kind, register.name, register.width
        );
        self.ports.extend(register.ports());
        self.signals.extend(register.signals());
        self.registers.push(register);
        self.local_width = local_address_width(self.registers.len());
        for (offset, register) in self.registers.iter_mut().enumerate() {
            register.offset = offset;
        }
        self.registers.len() - 1
    }

    /// Name of the generated artifact for this group.
    pub fn file_name(&self) -> String {
        format!("{}.v", self.name)
    }
}

/// Generate one Verilog module per register group in an XML description.
pub fn generate_verilog(
    description: &str,
    config: &GeneratorConfig,
    reporter: &mut dyn Reporter,
) -> Result<Vec<GeneratedFile>> {
    let groups = load_description(description, config, reporter)?;
    Ok(groups
        .iter()
        .map(|group| GeneratedFile {
            file_name: group.file_name(),
            contents: group.render(),
        })
        .collect())
}

/// Generate Verilog modules from an XML description file.
pub fn generate_verilog_from_file(
    file: &Path,
    config: &GeneratorConfig,
    reporter: &mut dyn Reporter,
) -> Result<Vec<GeneratedFile>> {
    let description = std::fs::read_to_string(file).map_err(|source| GeneratorError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    generate_verilog(&description, config, reporter)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

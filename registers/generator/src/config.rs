// Licensed under the Apache-2.0 license

//! Configuration for bus geometry and error handling during generation.
//!
//! [`BusConfig`] describes the bus a register group sits on: base address,
//! address and data widths, and whether the block answers memory or I/O
//! requests. [`GeneratorConfig`] bundles the defaults for every group loaded
//! from a description together with the [`ErrorPolicy`].
//!
//! # Example
//!
//! ```
//! use tv_registers_generator::config::{BusConfig, ErrorPolicy, GeneratorConfig};
//!
//! let config = GeneratorConfig::new()
//!     .strict()
//!     .with_bus(BusConfig::default().with_data_width(16).memory_mapped(true));
//! assert_eq!(config.policy, ErrorPolicy::Strict);
//! assert_eq!(config.bus.request_pin(), "mreq_n");
//! ```

/// What to do with recoverable description problems.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report the problem and continue: bad literals become 0 and registers
    /// with unknown types or zero width are skipped.
    #[default]
    Lenient,
    /// Abort generation on the first problem.
    Strict,
}

/// Which request line qualifies bus cycles for this block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusMapping {
    #[default]
    Io,
    Memory,
}

impl BusMapping {
    /// Active-low request pin for this mapping.
    pub fn request_pin(self) -> &'static str {
        match self {
            BusMapping::Io => "iorq_n",
            BusMapping::Memory => "mreq_n",
        }
    }
}

/// Bus geometry of a register group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Address of the first register in the block.
    pub base_address: u64,
    /// Width of the `addr` bus in bits.
    pub addr_width: usize,
    /// Width of `wr_data` / `rd_data` in bits.
    pub data_width: usize,
    pub mapping: BusMapping,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            base_address: 0,
            addr_width: 16,
            data_width: 8,
            mapping: BusMapping::Io,
        }
    }
}

impl BusConfig {
    pub fn with_base_address(mut self, base_address: u64) -> Self {
        self.base_address = base_address;
        self
    }

    pub fn with_addr_width(mut self, addr_width: usize) -> Self {
        self.addr_width = addr_width;
        self
    }

    pub fn with_data_width(mut self, data_width: usize) -> Self {
        self.data_width = data_width;
        self
    }

    /// Select `mreq_n` (memory mapped) instead of `iorq_n` as request line.
    pub fn memory_mapped(mut self, memory_mapped: bool) -> Self {
        self.mapping = if memory_mapped {
            BusMapping::Memory
        } else {
            BusMapping::Io
        };
        self
    }

    pub fn request_pin(&self) -> &'static str {
        self.mapping.request_pin()
    }
}

/// Settings applied while loading a description.
///
/// Group attributes in the description override the matching [`BusConfig`]
/// fields; anything left unspecified comes from here.
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfig {
    pub policy: ErrorPolicy,
    pub bus: BusConfig,
}

impl GeneratorConfig {
    /// Lenient policy with a 16-bit address, 8-bit data, I/O mapped bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn recoverable problems into hard errors.
    pub fn strict(mut self) -> Self {
        self.policy = ErrorPolicy::Strict;
        self
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_bus(mut self, bus: BusConfig) -> Self {
        self.bus = bus;
        self
    }
}

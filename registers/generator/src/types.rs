// Licensed under the Apache-2.0 license

//! Core data types for the register block generator.
//!
//! ## Overview
//!
//! ```text
//! RegisterGroup
//! ├── ports: Vec<Port>          # module ports, in accumulation order
//! ├── signals: Vec<Signal>      # internal `reg` nets
//! └── registers: Vec<Register>  # insertion order == offset order
//!     └── kind: RegisterKind    # Status | ReadStrobe | Config | WriteStrobe
//!                               # | SoftSet | InterruptFixed
//! ```
//!
//! Every register kind contributes its own ports and internal signals; the
//! per-kind behavior text lives in `codegen::generate`.

use std::fmt;
use strum_macros::{Display, EnumString};

use crate::util::declaration;

/// Index into a group's register list.
pub type RegisterIdx = usize;

//=============================================================================
// Ports and signals
//=============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }
}

/// A named external signal of the generated module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Port {
    pub direction: Direction,
    pub name: String,
    pub width: usize,
}

impl Port {
    pub fn input(name: impl Into<String>, width: usize) -> Self {
        Self {
            direction: Direction::Input,
            name: name.into(),
            width,
        }
    }

    pub fn output(name: impl Into<String>, width: usize) -> Self {
        Self {
            direction: Direction::Output,
            name: name.into(),
            width,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&declaration(
            self.direction.keyword(),
            self.width,
            &self.name,
        ))
    }
}

/// An internal net with persistent (`reg`) storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signal {
    pub name: String,
    pub width: usize,
}

impl Signal {
    pub fn reg(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&declaration("reg", self.width, &self.name))
    }
}

//=============================================================================
// Register kinds
//=============================================================================

/// Register type names as written in a description (`type="int_fixed"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RegisterType {
    #[default]
    Config,
    Status,
    IntFixed,
    SoftSet,
    ReadStb,
    WriteStb,
}

/// Parameters supplied for one register by the description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterParams {
    pub name: String,
    pub width: usize,
    /// Reset value for config-like registers (and for an interrupt mask).
    pub default: u64,
    /// Vector reported on `rd_data` while this interrupt is the active one.
    pub int_value: u64,
}

impl RegisterParams {
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
            ..Default::default()
        }
    }

    pub fn with_default(mut self, default: u64) -> Self {
        self.default = default;
        self
    }

    pub fn with_int_value(mut self, int_value: u64) -> Self {
        self.int_value = int_value;
        self
    }
}

/// Behavior template of a register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterKind {
    /// Read-only view of an input port.
    Status,
    /// Status register that pulses `<name>_stb` after each read.
    ReadStrobe,
    /// Read/write register driving an output port.
    Config { default: u64 },
    /// Config register that pulses `<name>_stb` after each write.
    WriteStrobe { default: u64 },
    /// Output bits settable by the bus or by `<name>_set`, cleared by
    /// `<name>_clr`. A bit with `<name>_clr` high is cleared even when it is
    /// set or written in the same cycle.
    SoftSet { default: u64 },
    /// Hardware-set, write-1-to-clear interrupt pending bits, masked by the
    /// config register at `mask`.
    InterruptFixed { mask: RegisterIdx, vector: u64 },
}

/// One register of a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub(crate) name: String,
    pub(crate) width: usize,
    pub(crate) offset: usize,
    pub(crate) kind: RegisterKind,
}

impl Register {
    pub(crate) fn new(name: impl Into<String>, width: usize, kind: RegisterKind) -> Self {
        Self {
            name: name.into(),
            width,
            offset: 0,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Position in the group's local address space.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> &RegisterKind {
        &self.kind
    }

    fn sel(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.name)
    }

    /// External ports this register adds to the module.
    pub fn ports(&self) -> Vec<Port> {
        let (name, width) = (&self.name, self.width);
        match self.kind {
            RegisterKind::Status => vec![Port::input(name, width)],
            RegisterKind::ReadStrobe => {
                vec![Port::input(name, width), Port::output(self.sel("stb"), 1)]
            }
            RegisterKind::Config { .. } => vec![Port::output(name, width)],
            RegisterKind::WriteStrobe { .. } => {
                vec![Port::output(name, width), Port::output(self.sel("stb"), 1)]
            }
            RegisterKind::SoftSet { .. } => vec![
                Port::output(name, width),
                Port::input(self.sel("set"), width),
                Port::input(self.sel("clr"), width),
            ],
            RegisterKind::InterruptFixed { .. } => vec![Port::input(self.sel("set"), width)],
        }
    }

    /// Internal nets this register adds to the module.
    pub fn signals(&self) -> Vec<Signal> {
        let (name, width) = (&self.name, self.width);
        match self.kind {
            RegisterKind::Status => vec![Signal::reg(self.sel("rd_sel"), 1)],
            RegisterKind::ReadStrobe => vec![
                Signal::reg(self.sel("rd_sel"), 1),
                Signal::reg(self.sel("stb"), 1),
            ],
            RegisterKind::Config { .. } | RegisterKind::SoftSet { .. } => vec![
                Signal::reg(name, width),
                Signal::reg(self.sel("rd_sel"), 1),
                Signal::reg(self.sel("wr_sel"), 1),
            ],
            RegisterKind::WriteStrobe { .. } => vec![
                Signal::reg(name, width),
                Signal::reg(self.sel("rd_sel"), 1),
                Signal::reg(self.sel("wr_sel"), 1),
                Signal::reg(self.sel("stb"), 1),
            ],
            RegisterKind::InterruptFixed { .. } => vec![
                Signal::reg(self.sel("rd_sel"), 1),
                Signal::reg(self.sel("wr_sel"), 1),
                Signal::reg(name, width),
                Signal::reg(self.sel("int"), 1),
            ],
        }
    }

    /// Whether the bus can write this register (has a `_wr_sel`).
    pub fn is_writable(&self) -> bool {
        !matches!(
            self.kind,
            RegisterKind::Status | RegisterKind::ReadStrobe
        )
    }

    /// Interrupt vector, for interrupt registers.
    pub fn interrupt_vector(&self) -> Option<u64> {
        match self.kind {
            RegisterKind::InterruptFixed { vector, .. } => Some(vector),
            _ => None,
        }
    }

    pub fn is_interrupt(&self) -> bool {
        self.interrupt_vector().is_some()
    }
}

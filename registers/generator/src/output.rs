// Licensed under the Apache-2.0 license

//! Output types and Verilog module rendering.
//!
//! ## Code Generation Flow
//!
//! ```text
//! RegisterGroup → GeneratedModule → Verilog text
//!                 ├── ports[]    → port list + input/output declarations
//!                 ├── signals[]  → reg declarations
//!                 └── blocks[]   → always blocks, concatenated in order
//! ```
//!
//! ## Generated Code Structure
//!
//! ```text
//! module uart_regs (
//!   clk,
//!   reset,
//!   ...
//! );
//! input clk;
//! ...
//! reg block_select;
//! ...
//! always @*
//!   begin
//!     block_select = (addr[15:2] == 4) & !iorq_n;
//!     ...
//!   end
//! ...
//! endmodule
//! ```
//!
//! The renderer performs no validation: duplicate port or signal names are
//! emitted as they are.

use crate::types::{Port, Signal};
use std::fmt::Write;

/// A fully assembled module, ready to be rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Module name.
    pub name: String,
    /// Ports in declaration order.
    pub ports: Vec<Port>,
    /// Internal nets in declaration order.
    pub signals: Vec<Signal>,
    /// Pre-rendered logic blocks, emitted in order after the declarations.
    pub blocks: Vec<String>,
}

impl GeneratedModule {
    /// Generate the Verilog text for this module.
    pub fn generate_code(&self) -> String {
        let mut output = String::new();

        writeln!(output, "module {} (", self.name).unwrap();
        let names: Vec<String> = self.ports.iter().map(|p| format!("  {}", p.name)).collect();
        if !names.is_empty() {
            writeln!(output, "{}", names.join(",\n")).unwrap();
        }
        writeln!(output, ");").unwrap();

        for port in &self.ports {
            writeln!(output, "{port}").unwrap();
        }
        for signal in &self.signals {
            writeln!(output, "{signal}").unwrap();
        }
        for block in &self.blocks {
            output.push_str(block);
        }

        writeln!(output, "endmodule").unwrap();
        output
    }
}

/// One output artifact produced from a description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name, `<group name>.v`.
    pub file_name: String,
    pub contents: String,
}

// Licensed under the Apache-2.0 license

//! Logic generation for register groups.
//!
//! This module contains the `impl RegisterGroup` block that assembles the
//! address decoder, the read multiplexer and the interrupt logic, and the
//! per-kind register behavior templates.

use super::*;
use crate::output::GeneratedModule;
use crate::util::{comb_block, seq_block};

impl RegisterGroup {
    /// Render the group as Verilog text.
    ///
    /// Rendering does not modify the group; rendering twice yields identical
    /// text.
    pub fn render(&self) -> String {
        self.generate_module().generate_code()
    }

    /// Assemble ports, signals and logic blocks for this group.
    pub fn generate_module(&self) -> GeneratedModule {
        let mut ports = self.ports.clone();
        let mut signals = self.signals.clone();
        let interrupts = self.has_interrupts();
        if interrupts {
            ports.push(Port::output("int_n", 1));
            signals.push(Signal::reg("int_n", 1));
            signals.push(Signal::reg("int_vec", self.bus.data_width));
        }

        let mut blocks = vec![self.decode_block(), self.read_mux_block()];
        if interrupts {
            blocks.push(self.interrupt_block());
        }
        blocks.extend(
            self.registers
                .iter()
                .filter_map(|r| r.behavior(&self.registers)),
        );

        GeneratedModule {
            name: self.name.clone(),
            ports,
            signals,
            blocks,
        }
    }

    /// Block select plus per-register read/write selects.
    fn decode_block(&self) -> String {
        let local = self.local_width;
        let mut statements = vec![format!(
            "block_select = (addr[{}:{local}] == {}) & !{};",
            self.bus.addr_width.saturating_sub(1),
            self.bus.base_address >> local,
            self.bus.request_pin()
        )];

        for r in &self.registers {
            statements.push(format!(
                "{}_rd_sel = block_select & (addr[{}:0] == {}) & !rd_n;",
                r.name,
                local - 1,
                r.offset
            ));
            if r.is_writable() {
                statements.push(format!(
                    "{}_wr_sel = block_select & (addr[{}:0] == {}) & !wr_n;",
                    r.name,
                    local - 1,
                    r.offset
                ));
            }
        }

        comb_block(&statements)
    }

    /// Priority read multiplexer and the output enable.
    ///
    /// `case (1'b1)` takes the first matching arm, so registers listed
    /// earlier win.
    fn read_mux_block(&self) -> String {
        let mut statements = vec!["case (1'b1)".to_string()];
        for r in &self.registers {
            statements.push(format!("  {0}_rd_sel : rd_data = {0};", r.name));
        }
        if self.has_interrupts() {
            statements.push("  default : rd_data = int_vec;".to_string());
        } else {
            statements.push(format!(
                "  default : rd_data = {}'bx;",
                self.bus.data_width
            ));
        }
        statements.push("endcase".to_string());

        let rd_sels: Vec<String> = self
            .registers
            .iter()
            .map(|r| format!("{}_rd_sel", r.name))
            .collect();
        if rd_sels.is_empty() {
            statements.push("doe = 1'b0;".to_string());
        } else {
            statements.push(format!("doe = {};", rd_sels.join(" | ")));
        }

        comb_block(&statements)
    }

    /// Interrupt vector priority mux and the active-low interrupt request.
    fn interrupt_block(&self) -> String {
        let mut statements = vec!["case (1'b1)".to_string()];
        let mut int_nets = Vec::new();
        for r in &self.registers {
            if let Some(vector) = r.interrupt_vector() {
                statements.push(format!("  {}_int : int_vec = {vector};", r.name));
                int_nets.push(format!("{}_int", r.name));
            }
        }
        statements.push(format!(
            "  default : int_vec = {}'bx;",
            self.bus.data_width
        ));
        statements.push("endcase".to_string());
        statements.push(format!("int_n = ~({});", int_nets.join(" | ")));

        comb_block(&statements)
    }
}

impl Register {
    /// Logic blocks of this register, if it has any state.
    ///
    /// `registers` is the owning group's register list; interrupt registers
    /// look up their mask register in it. An interrupt without a mask in
    /// `registers` raises its flag on any pending bit.
    pub(crate) fn behavior(&self, registers: &[Register]) -> Option<String> {
        let name = &self.name;
        let statements = match &self.kind {
            RegisterKind::Status => return None,
            RegisterKind::ReadStrobe => strobe(name, "rd_sel"),
            RegisterKind::Config { default } => load(name, *default),
            RegisterKind::WriteStrobe { default } => {
                let mut statements = load(name, *default);
                statements.extend(strobe(name, "wr_sel"));
                statements
            }
            RegisterKind::SoftSet { default } => vec![
                format!("if (reset) {name} <= {default};"),
                format!(
                    "else {name} <= (({name}_wr_sel ? wr_data : {name}) | {name}_set) & ~{name}_clr;"
                ),
            ],
            RegisterKind::InterruptFixed { mask, .. } => {
                let pending = seq_block(
                    "clk",
                    &[
                        format!("if (reset) {name} <= 0;"),
                        format!(
                            "else {name} <= ({name} | {name}_set) & ~({{{}{{{name}_wr_sel}}}} & wr_data);",
                            self.width
                        ),
                    ],
                );
                // The flag follows pending and mask in the same cycle.
                let flag = match registers.get(*mask) {
                    Some(mask) => format!("{name}_int = |({name} & ~{});", mask.name),
                    None => format!("{name}_int = |{name};"),
                };
                return Some(pending + &comb_block(&[flag]));
            }
        };
        Some(seq_block("clk", &statements))
    }
}

/// Reset to `default`, load `wr_data` when selected for write.
fn load(name: &str, default: u64) -> Vec<String> {
    vec![
        format!("if (reset) {name} <= {default};"),
        format!("else if ({name}_wr_sel) {name} <= wr_data;"),
    ]
}

/// One-cycle pulse on `<name>_stb` following `<name>_<select>`.
fn strobe(name: &str, select: &str) -> Vec<String> {
    vec![
        format!("if (reset) {name}_stb <= 0;"),
        format!("else if ({name}_{select}) {name}_stb <= 1;"),
        format!("else {name}_stb <= 0;"),
    ]
}

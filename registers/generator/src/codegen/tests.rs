// Licensed under the Apache-2.0 license

//! Tests for register groups, logic generation and description loading.

mod test {
    use super::super::{generate_verilog, load_description, RegisterGroup};
    use crate::config::{BusConfig, BusMapping, GeneratorConfig};
    use crate::diag::CollectingReporter;
    use crate::error::GeneratorError;
    use crate::types::{RegisterKind, RegisterParams, RegisterType};

    fn group(name: &str) -> RegisterGroup {
        RegisterGroup::new(name, BusConfig::default())
    }

    fn load(description: &str) -> (Vec<RegisterGroup>, CollectingReporter) {
        let mut reporter = CollectingReporter::default();
        let groups = load_description(description, &GeneratorConfig::new(), &mut reporter)
            .expect("description loads");
        (groups, reporter)
    }

    #[test]
    fn test_offsets_follow_insertion_order() {
        let mut g = group("blk");
        for name in ["a", "b", "c", "d", "e"] {
            g.add_register(RegisterType::Config, &RegisterParams::new(name, 8));
        }
        let offsets: Vec<usize> = g.registers().iter().map(|r| r.offset()).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
        assert_eq!(g.local_width(), 3);
    }

    #[test]
    fn test_bus_interface_ports() {
        let g = group("blk");
        let names: Vec<&str> = g.ports().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["clk", "reset", "addr", "wr_data", "rd_data", "doe", "rd_n", "wr_n", "iorq_n"]
        );
        let code = g.render();
        assert!(code.contains("input [15:0] addr;"));
        assert!(code.contains("output [7:0] rd_data;"));
        assert!(code.contains("reg block_select;"));
    }

    #[test]
    fn test_single_status_register() {
        let mut g = group("st");
        g.add_register(RegisterType::Status, &RegisterParams::new("sr", 8));
        let code = g.render();

        assert!(code.starts_with("module st (\n  clk,\n"));
        assert!(code.contains("input [7:0] sr;"));
        assert!(code.contains("block_select = (addr[15:1] == 0) & !iorq_n;"));
        assert!(code.contains("sr_rd_sel = block_select & (addr[0:0] == 0) & !rd_n;"));
        assert!(!code.contains("sr_wr_sel"));
        assert_eq!(code.matches("sr_rd_sel : rd_data = sr;").count(), 1);
        assert!(code.contains("default : rd_data = 8'bx;"));
        assert!(code.contains("doe = sr_rd_sel;"));
        assert!(!code.contains("always @(posedge clk)"));
        assert!(!code.contains("int_n"));
        assert!(code.ends_with("endmodule\n"));
    }

    #[test]
    fn test_config_register_behavior() {
        let mut g = group("cfg");
        g.add_register(
            RegisterType::Config,
            &RegisterParams::new("ctl", 8).with_default(3),
        );
        let code = g.render();
        assert!(code.contains("output [7:0] ctl;"));
        assert!(code.contains("reg [7:0] ctl;"));
        assert!(code.contains("ctl_wr_sel = block_select & (addr[0:0] == 0) & !wr_n;"));
        assert!(code.contains(
            "always @(posedge clk)\n  begin\n    if (reset) ctl <= 3;\n    \
             else if (ctl_wr_sel) ctl <= wr_data;\n  end\n"
        ));
    }

    #[test]
    fn test_strobe_registers() {
        let mut g = group("stb");
        g.add_register(RegisterType::ReadStb, &RegisterParams::new("rx", 8));
        g.add_register(RegisterType::WriteStb, &RegisterParams::new("tx", 8));
        let code = g.render();

        assert!(code.contains("input [7:0] rx;"));
        assert!(code.contains("output rx_stb;"));
        assert!(code.contains("else if (rx_rd_sel) rx_stb <= 1;"));
        assert!(!code.contains("rx_wr_sel"));

        assert!(code.contains("output [7:0] tx;"));
        assert!(code.contains("output tx_stb;"));
        assert!(code.contains("else if (tx_wr_sel) tx <= wr_data;"));
        assert!(code.contains("else if (tx_wr_sel) tx_stb <= 1;"));
        assert!(code.contains("else tx_stb <= 0;"));
        assert!(code.contains("doe = rx_rd_sel | tx_rd_sel;"));
    }

    #[test]
    fn test_soft_set_register() {
        let mut g = group("ss");
        g.add_register(RegisterType::SoftSet, &RegisterParams::new("flags", 4));
        let code = g.render();
        assert!(code.contains("output [3:0] flags;"));
        assert!(code.contains("input [3:0] flags_set;"));
        assert!(code.contains("input [3:0] flags_clr;"));
        assert!(code.contains(
            "else flags <= ((flags_wr_sel ? wr_data : flags) | flags_set) & ~flags_clr;"
        ));
    }

    #[test]
    fn test_interrupt_adds_mask_register() {
        let mut g = group("irq");
        let idx = g.add_register(
            RegisterType::IntFixed,
            &RegisterParams::new("timer", 2).with_default(3).with_int_value(0x38),
        );
        assert_eq!(idx, 0);
        assert_eq!(g.registers().len(), 2);

        let mask = &g.registers()[1];
        assert_eq!(mask.name(), "timer_msk");
        assert_eq!(mask.width(), 2);
        assert_eq!(mask.kind(), &RegisterKind::Config { default: 3 });
        assert_eq!(
            g.registers()[0].kind(),
            &RegisterKind::InterruptFixed {
                mask: 1,
                vector: 0x38
            }
        );

        let code = g.render();
        assert!(code.contains("input [1:0] timer_set;"));
        assert!(code.contains("output [1:0] timer_msk;"));
        assert!(code.contains("else timer <= (timer | timer_set) & ~({2{timer_wr_sel}} & wr_data);"));
        assert!(code.contains("always @*\n  begin\n    timer_int = |(timer & ~timer_msk);\n  end\n"));
        assert!(!code.contains("timer_int <="));
        assert!(code.contains("reg timer_int;"));
        assert!(code.contains("if (reset) timer_msk <= 3;"));
    }

    #[test]
    fn test_interrupt_behavior_without_mask_in_list() {
        let mut g = group("irq");
        g.add_register(
            RegisterType::IntFixed,
            &RegisterParams::new("timer", 2).with_int_value(1),
        );
        let pending = &g.registers()[0];
        let logic = pending.behavior(&[]).expect("interrupt has logic");
        assert!(logic.contains("timer_int = |timer;"));
        assert!(logic.contains("else timer <= (timer | timer_set)"));
    }

    #[test]
    fn test_interrupt_priority_and_request() {
        let mut g = group("irq");
        g.add_register(
            RegisterType::IntFixed,
            &RegisterParams::new("a", 1).with_int_value(1),
        );
        g.add_register(
            RegisterType::IntFixed,
            &RegisterParams::new("b", 1).with_int_value(2),
        );
        assert_eq!(g.registers()[2].name(), "b");
        assert_eq!(g.registers()[2].interrupt_vector(), Some(2));
        assert_eq!(g.local_width(), 2);

        let code = g.render();
        assert!(code.contains("output int_n;"));
        assert!(code.contains("reg [7:0] int_vec;"));
        assert!(code.contains("int_n = ~(a_int | b_int);"));
        let first = code.find("a_int : int_vec = 1;").expect("a arm");
        let second = code.find("b_int : int_vec = 2;").expect("b arm");
        assert!(first < second);
        assert!(code.contains("default : rd_data = int_vec;"));
        assert_eq!(code.matches("output int_n;").count(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut g = group("twice");
        g.add_register(
            RegisterType::IntFixed,
            &RegisterParams::new("irq", 1).with_int_value(7),
        );
        g.add_register(RegisterType::Status, &RegisterParams::new("sr", 8));
        let ports = g.ports().len();
        let first = g.render();
        let second = g.render();
        assert_eq!(first, second);
        assert_eq!(g.ports().len(), ports);
        assert_eq!(first.matches("output int_n;").count(), 1);
    }

    #[test]
    fn test_read_mux_first_listed_wins() {
        let mut g = group("order");
        g.add_register(RegisterType::Status, &RegisterParams::new("z", 8));
        g.add_register(RegisterType::Status, &RegisterParams::new("a", 8));
        let code = g.render();
        let z = code.find("z_rd_sel : rd_data = z;").unwrap();
        let a = code.find("a_rd_sel : rd_data = a;").unwrap();
        assert!(z < a);
    }

    #[test]
    fn test_base_address_decode() {
        let bus = BusConfig::default().with_base_address(0x40);
        let mut g = RegisterGroup::new("based", bus);
        for name in ["a", "b", "c"] {
            g.add_register(RegisterType::Config, &RegisterParams::new(name, 8));
        }
        let code = g.render();
        assert!(code.contains("block_select = (addr[15:2] == 16) & !iorq_n;"));
        assert!(code.contains("c_rd_sel = block_select & (addr[1:0] == 2) & !rd_n;"));
    }

    #[test]
    fn test_memory_mapped_bus() {
        let bus = BusConfig::default().memory_mapped(true).with_data_width(16);
        let mut g = RegisterGroup::new("mem", bus);
        g.add_register(RegisterType::Status, &RegisterParams::new("sr", 16));
        let code = g.render();
        assert!(code.contains("input mreq_n;"));
        assert!(!code.contains("iorq_n"));
        assert!(code.contains("& !mreq_n;"));
        assert!(code.contains("default : rd_data = 16'bx;"));
    }

    #[test]
    fn test_empty_group() {
        let g = group("nothing");
        let code = g.render();
        assert!(code.contains("doe = 1'b0;"));
        assert!(code.contains("default : rd_data = 8'bx;"));
    }

    #[test]
    fn test_load_description() {
        let (groups, reporter) = load(
            r#"
<tv_registers name="uart_regs" addr_sz="16" base_addr="8'h80">
  <register name="status" type="status" width="8"/>
  <register name="ctl" width="8" default="8'h03"/>
  <register name="irq" type="int_fixed" width="2" int_value="8'h38"/>
</tv_registers>
"#,
        );
        assert!(reporter.messages.is_empty());
        assert_eq!(groups.len(), 1);

        let g = &groups[0];
        assert_eq!(g.name(), "uart_regs");
        assert_eq!(g.file_name(), "uart_regs.v");
        assert_eq!(g.bus().base_address, 0x80);
        let names: Vec<&str> = g.registers().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["status", "ctl", "irq", "irq_msk"]);
        assert_eq!(g.registers()[1].kind(), &RegisterKind::Config { default: 3 });
        assert_eq!(g.registers()[2].interrupt_vector(), Some(0x38));
        assert!(g.render().contains("block_select = (addr[15:2] == 32) & !iorq_n;"));
    }

    #[test]
    fn test_load_group_attributes() {
        let (groups, _) = load(
            r#"<tv_registers name="wide" addr_sz="8" data_sz="16" mem_mapped="1">
                 <register name="r" width="16"/>
               </tv_registers>"#,
        );
        let bus = groups[0].bus();
        assert_eq!(bus.addr_width, 8);
        assert_eq!(bus.data_width, 16);
        assert_eq!(bus.mapping, BusMapping::Memory);
        assert_eq!(bus.base_address, 0);
    }

    #[test]
    fn test_load_multiple_groups() {
        let files = generate_verilog(
            r#"<design>
                 <tv_registers name="first"><register name="a" type="status"/></tv_registers>
                 <tv_registers name="second"><register name="b"/></tv_registers>
               </design>"#,
            &GeneratorConfig::new(),
            &mut CollectingReporter::default(),
        )
        .unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["first.v", "second.v"]);
        assert!(files[0].contents.starts_with("module first ("));
        assert!(files[1].contents.contains("output b;"));
    }

    #[test]
    fn test_lenient_loading_reports_and_continues() {
        let (groups, reporter) = load(
            r#"<tv_registers name="lax">
                 <register name="bad" type="bogus" width="8"/>
                 <register name="num" width="8" default="8'hZZ"/>
                 <register name="nil" width="0"/>
               </tv_registers>"#,
        );
        assert_eq!(reporter.messages.len(), 3);
        assert!(reporter.messages[0].contains("bogus"));
        let g = &groups[0];
        assert_eq!(g.registers().len(), 1);
        assert_eq!(g.registers()[0].name(), "num");
        assert_eq!(g.registers()[0].kind(), &RegisterKind::Config { default: 0 });
    }

    #[test]
    fn test_strict_loading_fails() {
        let description = r#"<tv_registers name="tight">
                               <register name="num" width="8" default="8'hZZ"/>
                             </tv_registers>"#;
        let mut reporter = CollectingReporter::default();
        let result =
            load_description(description, &GeneratorConfig::new().strict(), &mut reporter);
        assert!(matches!(result, Err(GeneratorError::Literal(_))));
        assert!(reporter.messages.is_empty());

        let description = r#"<tv_registers name="tight">
                               <register name="r" type="bogus"/>
                             </tv_registers>"#;
        let result =
            load_description(description, &GeneratorConfig::new().strict(), &mut reporter);
        assert!(matches!(result, Err(GeneratorError::UnknownKind { .. })));
    }

    #[test]
    fn test_missing_group_name() {
        let mut reporter = CollectingReporter::default();
        let result = load_description(
            "<tv_registers><register name=\"r\"/></tv_registers>",
            &GeneratorConfig::new(),
            &mut reporter,
        );
        assert!(matches!(result, Err(GeneratorError::MissingGroupName)));
    }

    #[test]
    fn test_malformed_xml() {
        let mut reporter = CollectingReporter::default();
        let result = load_description(
            "<tv_registers name=\"x\"><register name=\"r\"></tv_registers>",
            &GeneratorConfig::new(),
            &mut reporter,
        );
        assert!(matches!(result, Err(GeneratorError::Xml(_))));
    }

    #[test]
    fn test_registers_outside_group_are_ignored() {
        let (groups, reporter) = load(r#"<root><register name="stray"/></root>"#);
        assert!(groups.is_empty());
        assert!(reporter.messages.is_empty());
    }
}

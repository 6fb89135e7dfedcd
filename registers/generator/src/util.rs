// Licensed under the Apache-2.0 license

//! Small helpers for emitting Verilog text.

/// Local address width needed to decode `count` registers.
///
/// This is `ceil(log2(count))`, but never less than one bit so that a group
/// with a single register still has an address comparison.
///
/// # Examples
/// ```
/// use tv_registers_generator::util::local_address_width;
/// assert_eq!(local_address_width(1), 1);
/// assert_eq!(local_address_width(4), 2);
/// assert_eq!(local_address_width(5), 3);
/// ```
pub fn local_address_width(count: usize) -> usize {
    if count <= 1 {
        return 1;
    }
    (usize::BITS - (count - 1).leading_zeros()) as usize
}

/// Formats a declaration such as `input [7:0] addr;` or `reg doe;`.
pub fn declaration(keyword: &str, width: usize, name: &str) -> String {
    if width <= 1 {
        format!("{keyword} {name};")
    } else {
        format!("{keyword} [{}:0] {name};", width - 1)
    }
}

/// Wraps statements in a combinational `always @*` block.
pub fn comb_block(statements: &[String]) -> String {
    let mut result = String::from("always @*\n  begin\n");
    for s in statements {
        result.push_str("    ");
        result.push_str(s);
        result.push('\n');
    }
    result.push_str("  end\n");
    result
}

/// Wraps statements in an `always @(posedge clock)` block.
pub fn seq_block(clock: &str, statements: &[String]) -> String {
    let mut result = format!("always @(posedge {clock})\n  begin\n");
    for s in statements {
        result.push_str("    ");
        result.push_str(s);
        result.push('\n');
    }
    result.push_str("  end\n");
    result
}

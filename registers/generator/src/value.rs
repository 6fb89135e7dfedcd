// Licensed under the Apache-2.0 license

//! Numeric literal parsing for register descriptions.
//!
//! Literals are either plain decimal numbers (`10`) or sized literals in
//! Verilog notation, `<width>'<radix><digits>` with radix `d`, `h` or `b`
//! (`8'hFF`, `4'b101`). The width prefix is accepted but not checked against
//! the number of digits.

use winnow::ascii::{digit1, hex_digit1};
use winnow::error::ModalResult;
use winnow::token::one_of;
use winnow::Parser;

use crate::diag::Reporter;
use crate::error::LiteralError;

/// `<width>'<radix><digits>`, matched as a prefix of the input.
fn sized_literal<'s>(input: &mut &'s str) -> ModalResult<(char, &'s str)> {
    (digit1, '\'', one_of(['d', 'h', 'b']), hex_digit1)
        .map(|(_width, _, radix, digits)| (radix, digits))
        .parse_next(input)
}

fn radix_of(letter: char) -> u32 {
    match letter {
        'h' => 16,
        'b' => 2,
        _ => 10,
    }
}

/// Parses a numeric literal.
///
/// # Examples
/// ```
/// use tv_registers_generator::value::parse_number;
/// assert_eq!(parse_number("8'hFF"), Ok(255));
/// assert_eq!(parse_number("4'b101"), Ok(5));
/// assert_eq!(parse_number("10"), Ok(10));
/// assert!(parse_number("8'hGG").is_err());
/// ```
pub fn parse_number(text: &str) -> Result<u64, LiteralError> {
    let token = text.trim();
    let mut input = token;
    if let Ok((letter, digits)) = sized_literal(&mut input) {
        let radix = radix_of(letter);
        return u64::from_str_radix(digits, radix).map_err(|_| LiteralError::BadDigits {
            text: token.to_string(),
            radix,
        });
    }
    token
        .parse::<u64>()
        .map_err(|_| LiteralError::Malformed(token.to_string()))
}

/// Parses a numeric literal, reporting a failure and yielding 0 instead of
/// returning an error.
pub fn parse_number_or_zero(text: &str, reporter: &mut dyn Reporter) -> u64 {
    match parse_number(text) {
        Ok(value) => value,
        Err(err) => {
            reporter.report(&err.into());
            0
        }
    }
}

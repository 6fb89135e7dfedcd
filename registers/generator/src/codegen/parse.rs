// Licensed under the Apache-2.0 license

//! Loading XML register descriptions.
//!
//! A description holds one or more groups:
//!
//! ```text
//! <tv_registers name="uart_regs" addr_sz="16" base_addr="8'h80">
//!   <register name="status" type="status" width="8"/>
//!   <register name="ctl" width="8" default="8'h03"/>
//!   <register name="irq" type="int_fixed" width="2" int_value="8'h38"/>
//! </tv_registers>
//! ```
//!
//! Group attributes: `name`, `addr_sz`, `base_addr`, and optionally
//! `data_sz` and `mem_mapped`. Register attributes: `name`, `type` (empty
//! means `config`), `width`, `default` (empty means 0) and `int_value`.

use log::{debug, info, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

use super::*;
use crate::config::{BusMapping, ErrorPolicy};
use crate::value::parse_number;

const GROUP_TAG: &[u8] = b"tv_registers";
const REGISTER_TAG: &[u8] = b"register";

/// Load every register group from an XML description.
///
/// Recoverable problems go through `reporter` under the lenient policy and
/// abort loading under the strict one.
pub fn load_description(
    description: &str,
    config: &GeneratorConfig,
    reporter: &mut dyn Reporter,
) -> Result<Vec<RegisterGroup>> {
    let mut reader = Reader::from_str(description);
    reader.config_mut().trim_text(true);

    let mut loader = Loader { config, reporter };
    let mut groups = Vec::new();
    let mut current: Option<RegisterGroup> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == GROUP_TAG => {
                let group = loader.group(&e)?;
                if let Some(open) = current.replace(group) {
                    warn!("register group {} is not closed", open.name());
                    groups.push(open);
                }
            }
            Event::Empty(e) if e.name().as_ref() == GROUP_TAG => {
                groups.push(loader.group(&e)?);
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == REGISTER_TAG => {
                match current.as_mut() {
                    Some(group) => loader.register(group, &e)?,
                    None => debug!("ignoring register outside of a register group"),
                }
            }
            Event::End(e) if e.name().as_ref() == GROUP_TAG => {
                if let Some(group) = current.take() {
                    groups.push(group);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(open) = current.take() {
        groups.push(open);
    }

    Ok(groups)
}

struct Loader<'a> {
    config: &'a GeneratorConfig,
    reporter: &'a mut dyn Reporter,
}

impl Loader<'_> {
    /// Report `result`'s error and continue with `fallback`, or fail,
    /// depending on the error policy.
    fn recover<T>(&mut self, result: Result<T>, fallback: T) -> Result<T> {
        match result {
            Err(err) if err.is_recoverable() && self.config.policy == ErrorPolicy::Lenient => {
                self.reporter.report(&err);
                Ok(fallback)
            }
            result => result,
        }
    }

    /// Numeric attribute; an empty attribute yields `default`, a malformed
    /// one yields 0 under the lenient policy.
    fn number(&mut self, text: &str, default: u64) -> Result<u64> {
        if text.trim().is_empty() {
            return Ok(default);
        }
        let value = parse_number(text).map_err(GeneratorError::from);
        self.recover(value, 0)
    }

    fn group(&mut self, element: &BytesStart) -> Result<RegisterGroup> {
        let attrs = attributes(element)?;
        let name = attr(&attrs, "name");
        if name.is_empty() {
            return Err(GeneratorError::MissingGroupName);
        }

        let config = self.config;
        let defaults = &config.bus;
        let mut bus = defaults.clone();
        bus.addr_width = self.number(attr(&attrs, "addr_sz"), defaults.addr_width as u64)? as usize;
        bus.base_address = self.number(attr(&attrs, "base_addr"), defaults.base_address)?;
        bus.data_width = self.number(attr(&attrs, "data_sz"), defaults.data_width as u64)? as usize;
        let memory_mapped = self.number(
            attr(&attrs, "mem_mapped"),
            u64::from(defaults.mapping == BusMapping::Memory),
        )?;
        let bus = bus.memory_mapped(memory_mapped != 0);

        info!(
            "register group {name}: base 0x{:x}, {}-bit address, {}-bit data, {}",
            bus.base_address,
            bus.addr_width,
            bus.data_width,
            bus.request_pin()
        );
        Ok(RegisterGroup::new(name, bus))
    }

    fn register(&mut self, group: &mut RegisterGroup, element: &BytesStart) -> Result<()> {
        let attrs = attributes(element)?;
        let name = attr(&attrs, "name");
        let type_name = attr(&attrs, "type");

        let ty = if type_name.is_empty() {
            Ok(Some(RegisterType::Config))
        } else {
            type_name
                .parse::<RegisterType>()
                .map(Some)
                .map_err(|_| GeneratorError::UnknownKind {
                    register: name.to_string(),
                    kind: type_name.to_string(),
                })
        };
        let Some(ty) = self.recover(ty, None)? else {
            return Ok(());
        };

        let width = self.number(attr(&attrs, "width"), 1)? as usize;
        if width == 0 {
            return self.recover(Err(GeneratorError::ZeroWidth(name.to_string())), ());
        }

        let mut params = RegisterParams::new(name, width);
        params.default = self.number(attr(&attrs, "default"), 0)?;
        if ty == RegisterType::IntFixed {
            params.int_value = self.number(attr(&attrs, "int_value"), 0)?;
        }

        group.add_register(ty, &params);
        Ok(())
    }
}

/// Unescaped attributes of an element, by name.
fn attributes(element: &BytesStart) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Attribute value, or an empty string when absent.
fn attr<'a>(attrs: &'a HashMap<String, String>, name: &str) -> &'a str {
    attrs.get(name).map(String::as_str).unwrap_or("")
}

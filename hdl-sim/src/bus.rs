//! Ordered groups of logic wires treated as an integer.

use std::fmt;
use std::ops::Index;

use hdl_types::Logic;

use crate::registry::SignalId;
use crate::signal::{Connect, Signal};

/// A fixed-width vector of [`Signal<Logic>`] wires, LSB first.
///
/// A bus is a construction convenience, not a netlist node of its own:
/// parts connect to the constituent wires, which carry names derived
/// from the bus name (`name[index]`).
#[derive(Clone)]
pub struct Bus {
    name: String,
    signals: Vec<Signal<Logic>>,
}

fn assert_fits(value: i128, width: u32) {
    if width >= 128 {
        return;
    }
    let fits_unsigned = value >= 0 && value >> width == 0;
    let fits_signed = value < 0 && value >> (width - 1) == -1;
    assert!(
        fits_unsigned || fits_signed,
        "value {value} does not fit in {width} bits"
    );
}

impl Bus {
    /// A bus of `width` undefined wires, with a generated name.
    ///
    /// # Panics
    ///
    /// Panics when `width` is zero.
    pub fn new(width: u32) -> Self {
        Self::create(width, None, 0, false)
    }

    /// A named bus of `width` undefined wires.
    pub fn with_name(width: u32, name: &str) -> Self {
        Self::create(width, Some(name), 0, false)
    }

    /// A bus initialized to the two's-complement bits of `value`.
    ///
    /// # Panics
    ///
    /// Panics when `width` is zero or `value` needs more than `width`
    /// bits.
    pub fn with_value(width: u32, value: i128) -> Self {
        Self::create(width, None, value, true)
    }

    fn create(width: u32, name: Option<&str>, value: i128, initialized: bool) -> Self {
        assert!(width > 0, "zero-width bus");
        if initialized {
            assert_fits(value, width);
        }
        let name = name.map(str::to_owned);
        let mut signals = Vec::with_capacity(width as usize);
        for bit in 0..width {
            let initial = if initialized {
                Logic::from(value >> bit & 1 == 1)
            } else {
                Logic::Undefined
            };
            let signal = Signal::new(initial);
            if let Some(name) = &name {
                signal.set_name(&format!("{name}[{bit}]"));
            }
            signals.push(signal);
        }
        let name = name.unwrap_or_else(|| format!("bus{}", signals[0].id().0));
        Self { name, signals }
    }

    /// Number of wires.
    pub fn width(&self) -> usize {
        self.signals.len()
    }

    /// The bus name.
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Rename the bus and its wires.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
        for (bit, signal) in self.signals.iter().enumerate() {
            signal.set_name(&format!("{name}[{bit}]"));
        }
    }

    /// Drive all wires from the two's-complement bits of `value`.
    ///
    /// # Panics
    ///
    /// Panics when `value` needs more than `self.width()` bits.
    pub fn assign(&self, value: i128) {
        assert_fits(value, self.width() as u32);
        for (bit, signal) in self.signals.iter().enumerate() {
            signal.drive(Logic::from(value >> bit & 1 == 1));
        }
    }

    /// Read back as an unsigned integer, or `None` while any wire is
    /// undefined or released.
    pub fn to_u128(&self) -> Option<u128> {
        assert!(self.width() <= 128, "bus too wide for u128");
        let mut value = 0u128;
        for (bit, signal) in self.signals.iter().enumerate() {
            match signal.read() {
                Logic::High => value |= 1 << bit,
                Logic::Low => (),
                _ => return None,
            }
        }
        Some(value)
    }

    /// Read back as a sign-extended integer, or `None` while any wire is
    /// undefined or released.
    pub fn to_i128(&self) -> Option<i128> {
        let value = self.to_u128()? as i128;
        let width = self.width() as u32;
        if width < 128 && value >> (width - 1) & 1 == 1 {
            Some(value | !0 << width)
        } else {
            Some(value)
        }
    }
}

impl Index<usize> for Bus {
    type Output = Signal<Logic>;

    fn index(&self, bit: usize) -> &Self::Output {
        &self.signals[bit]
    }
}

impl Connect for Bus {
    fn collect_signals(&self, into: &mut Vec<SignalId>) {
        for signal in &self.signals {
            signal.collect_signals(into);
        }
    }
}

impl fmt::Display for Bus {
    /// MSB-first binary rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for signal in self.signals.iter().rev() {
            write!(f, "{}", signal.read())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self)
    }
}

//! National LMX2326 PLL driver
//!
//! The chip sits on three output lines (data, clock and latch enable) plus
//! the lock detect input. Loading a register is a two step affair:
//!
//! 1. Shift the word into the input register, one bit per clock pulse, MSB
//!    first. All lines start low.
//! 2. Pulse latch enable to copy the input register into the register named
//!    by the word's control tag.
//!
//! The driver pauses for the settle time after every shifted word.

use embedded_hal::delay::DelayNs;
use stellex_core::config::SynthConfig;
use stellex_core::traits::{SynthError, Synthesizer};
use stellex_hal::{InputPin, OutputPin};

use super::word::{FunctionFlags, PllWord};

/// LMX2326 on a bit-banged bus
pub struct Lmx2326<DATA, CLK, LE, LD, DELAY> {
    data: DATA,
    clock: CLK,
    latch: LE,
    lock_detect: LD,
    delay: DELAY,
    settle_ms: u32,
}

impl<DATA, CLK, LE, LD, DELAY> Lmx2326<DATA, CLK, LE, LD, DELAY>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LE: OutputPin,
    LD: InputPin,
    DELAY: DelayNs,
{
    /// Take over the bus and drive every output low
    pub fn new(data: DATA, clock: CLK, latch: LE, lock_detect: LD, delay: DELAY) -> Self {
        let mut pll = Self {
            data,
            clock,
            latch,
            lock_detect,
            delay,
            settle_ms: SynthConfig::new().settle_ms,
        };
        pll.idle();
        pll
    }

    fn idle(&mut self) {
        self.data.set_low();
        self.clock.set_low();
        self.latch.set_low();
    }

    fn pulse_clock(&mut self) {
        self.clock.set_high();
        self.clock.set_low();
    }

    /// Shift a word into the input register
    ///
    /// The destination register is not updated until [`Lmx2326::latch`].
    pub fn write_word(&mut self, word: PllWord) {
        self.idle();
        for bit in word.iter_bits() {
            self.data.set_state(bit);
            self.pulse_clock();
        }
        debug!(
            "pll word {=u32:#x} ({=u8} bits) shifted",
            word.value,
            word.bits
        );
        self.delay.delay_ms(self.settle_ms);
    }

    /// Pulse latch enable
    pub fn latch(&mut self) {
        self.data.set_low();
        self.clock.set_low();
        self.latch.set_high();
        self.latch.set_low();
        debug!("pll latch");
    }

    /// Shift a word and latch it
    pub fn write_and_latch(&mut self, word: PllWord) {
        self.write_word(word);
        self.latch();
    }

    /// Load the N counter
    pub fn set_n_divisor(&mut self, n: u32) -> Result<(), SynthError> {
        let word = PllWord::n_divisor(n)?;
        self.write_and_latch(word);
        Ok(())
    }

    /// Load the R counter
    pub fn set_r_divider(&mut self, r: u32, five_cycle_lock_detect: bool) -> Result<(), SynthError> {
        let word = PllWord::r_divider(r, five_cycle_lock_detect)?;
        self.write_and_latch(word);
        Ok(())
    }

    /// Tune to `mhz`
    ///
    /// With the 250 kHz comparison frequency and the x4 prescaler one N count
    /// is one MHz, so N is the frequency itself.
    pub fn set_mhz(&mut self, mhz: u32) -> Result<(), SynthError> {
        self.set_n_divisor(mhz)
    }

    /// Load the function latch and the R counter
    ///
    /// Enables digital lock detect with a positive VCO characteristic, then
    /// sets the reference divider with five-cycle lock detection. Clocking
    /// where one N count is not one MHz is rejected before the bus is touched.
    pub fn initialize(&mut self, config: &SynthConfig) -> Result<(), SynthError> {
        if !config.n_is_mhz() {
            return Err(SynthError::UnsupportedConfig);
        }
        self.settle_ms = config.settle_ms;

        self.write_and_latch(PllWord::initialize(FunctionFlags::new()));
        self.set_r_divider(config.r_divider(), true)
    }

    /// Whether the lock detect line is high
    pub fn locked(&mut self) -> bool {
        self.lock_detect.is_high()
    }

    /// Release the bus
    pub fn release(self) -> (DATA, CLK, LE, LD, DELAY) {
        (self.data, self.clock, self.latch, self.lock_detect, self.delay)
    }
}

impl<DATA, CLK, LE, LD, DELAY> Synthesizer for Lmx2326<DATA, CLK, LE, LD, DELAY>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LE: OutputPin,
    LD: InputPin,
    DELAY: DelayNs,
{
    fn initialize(&mut self, config: &SynthConfig) -> Result<(), SynthError> {
        Lmx2326::initialize(self, config)
    }

    fn set_mhz(&mut self, mhz: u32) -> Result<(), SynthError> {
        Lmx2326::set_mhz(self, mhz)
    }

    fn is_locked(&mut self) -> bool {
        self.locked()
    }
}

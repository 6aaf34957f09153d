/// Pin mode, covering the four MODER states of the F4 pin matrix.
///
/// Alternate modes carry the function number (`AF0..AF15`) that is muxed
/// onto the pin.
#[derive(Clone, Copy, Debug)]
pub enum Mode {
    Input(Pull),
    Output(OutputType, Speed),
    Alternate(u8, OutputType, Speed),
    Analog,
}

/// Internal pull resistor selection.
#[derive(Clone, Copy, Debug)]
pub enum Pull {
    Floating,
    Up,
    Down,
}

/// Output driver type.
#[derive(Clone, Copy, Debug)]
pub enum OutputType {
    PushPull,
    OpenDrain,
}

/// Output switching speed.
///
/// Lower speeds reduce ringing; VeryHigh is for buses beyond ~50MHz.
#[derive(Clone, Copy, Debug)]
pub enum Speed {
    Low = 0,
    Medium = 1,
    High = 2,
    VeryHigh = 3,
}

/// Output subset of the pin [modes][Mode].
///
/// Used where only an output configuration makes sense, like the TX pin of a
/// serial bus.
#[derive(Clone, Copy, Debug)]
pub enum OutputMode {
    PushPull(Speed),
    OpenDrain(Speed),
}

/// Input subset of the pin [modes][Mode].
#[derive(Clone, Copy, Debug)]
pub enum InputMode {
    Floating,
    PullUp,
    PullDown,
}

impl Into<Mode> for OutputMode {
    #[inline]
    fn into(self) -> Mode {
        match self {
            Self::PushPull(speed) => Mode::Output(OutputType::PushPull, speed),
            Self::OpenDrain(speed) => Mode::Output(OutputType::OpenDrain, speed),
        }
    }
}

impl Into<Mode> for InputMode {
    #[inline]
    fn into(self) -> Mode {
        match self {
            Self::Floating => Mode::Input(Pull::Floating),
            Self::PullUp => Mode::Input(Pull::Up),
            Self::PullDown => Mode::Input(Pull::Down),
        }
    }
}

impl OutputMode {
    /// The same driver configuration, muxed to an alternate function.
    #[inline]
    pub fn as_af(self, function: u8) -> Mode {
        match self {
            Self::PushPull(speed) => Mode::Alternate(function, OutputType::PushPull, speed),
            Self::OpenDrain(speed) => Mode::Alternate(function, OutputType::OpenDrain, speed),
        }
    }
}

use clap::ValueEnum;
use riftdrive_vehicles::DriverInput;

/// Driver scripts, as a function of elapsed simulated time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Scenario {
    /// Full throttle, wheel straight.
    Launch,
    /// Accelerate for 3 s, then full brake.
    Brake,
    /// Throttle with steering swapping sides every 1.5 s.
    Slalom,
    /// Accelerate, then coast with no input.
    Coast,
}

impl Scenario {
    pub fn input(self, t: f32) -> DriverInput {
        match self {
            Scenario::Launch => DriverInput { throttle: true, ..DriverInput::NEUTRAL },
            Scenario::Brake => DriverInput { throttle: t < 3.0, brake: t >= 3.0, ..DriverInput::NEUTRAL },
            Scenario::Slalom => {
                let side = if ((t / 1.5) as u32) % 2 == 0 { 0.6 } else { -0.6 };
                DriverInput { steering: if t < 1.0 { 0.0 } else { side }, throttle: true, brake: false }
            }
            Scenario::Coast => DriverInput { throttle: t < 2.0, ..DriverInput::NEUTRAL },
        }
    }
}

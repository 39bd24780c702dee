mod count;
mod generate;
mod run;

use clap::ValueEnum;
pub use count::*;
pub use generate::*;
use isopath::color::ColoringPolicy;
pub use run::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColoringArg {
    /// Color every vertex 1.
    Constant,
    /// Color vertex v with v % 2.
    Parity,
}

impl From<ColoringArg> for ColoringPolicy {
    fn from(value: ColoringArg) -> Self {
        match value {
            ColoringArg::Constant => ColoringPolicy::Constant,
            ColoringArg::Parity => ColoringPolicy::Parity,
        }
    }
}

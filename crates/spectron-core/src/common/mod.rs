pub mod config;
pub mod constants;

pub use config::{
    AxisLayout, ConfigError, LegendLayout, PlotLayout, SpectronConfig, load_config, parse_config,
};

use clap::{Parser, ValueEnum};
use splitpay_domain::{MAX_DISPLAY_SCALE, RoundingContext, RoundingMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoundingArg {
    HalfUp,
    HalfEven,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfUp => RoundingMode::HalfUp,
            RoundingArg::HalfEven => RoundingMode::HalfEven,
        }
    }
}

/// Runs a bill form script and prints the settlement at every `calculate`.
#[derive(Debug, Parser)]
#[command(name = "splitpay", version)]
pub struct AppConfig {
    /// Script to run; reads stdin when omitted.
    pub script: Option<PathBuf>,

    /// Prefix printed before every amount.
    #[arg(long, env = "SPLITPAY_CURRENCY", default_value = "Rs.")]
    pub currency: String,

    /// Decimal places shown for amounts.
    #[arg(
        long,
        env = "SPLITPAY_SCALE",
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_DISPLAY_SCALE))
    )]
    pub scale: u32,

    #[arg(long, env = "SPLITPAY_ROUNDING", value_enum, default_value_t = RoundingArg::HalfUp)]
    pub rounding: RoundingArg,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn rounding_context(&self) -> RoundingContext {
        RoundingContext {
            scale: self.scale,
            rounding_mode: self.rounding.into(),
        }
    }
}

/// Initialize logging and tracing
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

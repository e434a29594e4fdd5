use clap::Parser;

use burger_engine::{DEFAULT_INGREDIENT_SECONDS, DEFAULT_NUM_LANES, DEFAULT_ORDER_INTERVAL_SECONDS};

fn default_bandas() -> u64 {
    DEFAULT_NUM_LANES as u64
}

fn default_tiempo_ingrediente() -> u64 {
    DEFAULT_INGREDIENT_SECONDS
}

fn default_tiempo_orden() -> u64 {
    DEFAULT_ORDER_INTERVAL_SECONDS
}

/// Command-line surface for the burger plant simulator.
#[derive(Debug, Clone, Parser)]
#[command(name = "burgerplant", version, about = "Burger assembly plant simulator")]
pub struct Cli {
    /// Number of preparation lanes to run, 1-10.
    #[arg(
        short = 'n',
        long = "bandas",
        env = "BURGER_BANDAS",
        default_value_t = default_bandas(),
        value_parser = clap::value_parser!(u64).range(1..=10)
    )]
    pub bandas: u64,

    /// Seconds spent dispensing each ingredient, 1-60.
    #[arg(
        short = 't',
        long = "tiempo-ingrediente",
        env = "BURGER_TIEMPO_INGREDIENTE",
        default_value_t = default_tiempo_ingrediente(),
        value_parser = clap::value_parser!(u64).range(1..=60)
    )]
    pub tiempo_ingrediente: u64,

    /// Seconds between generated orders, 1-300.
    #[arg(
        short = 'o',
        long = "tiempo-orden",
        env = "BURGER_TIEMPO_ORDEN",
        default_value_t = default_tiempo_orden(),
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub tiempo_orden: u64,

    /// Print the burger menu and exit.
    #[arg(short = 'm', long = "menu", default_value_t = false)]
    pub menu: bool,
}

mod cli;
mod commands;
mod render;
mod session;

use credit_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

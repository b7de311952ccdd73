mod adjust;
mod cli;
mod infra;
mod routes;
mod server;

use comp_adjust::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

mod cli;
mod console;
mod infra;
mod routes;
mod server;

use listing_search::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

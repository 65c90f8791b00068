//! AWS Lambda adapter for the calculate endpoint
//!
//! Set `PAGODA_RATES_FILE` to load rate table overrides at cold start.

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use pagoda_premium::handler::handle_calculate;
use pagoda_premium::{PremiumCalculator, RateTables};
use std::sync::Arc;

async fn function_handler(calculator: &PremiumCalculator, event: Request) -> Result<Response<Body>, Error> {
    let response = handle_calculate(event.body().as_ref(), calculator, Utc::now());
    log::info!("Calculate request answered with status {}", response.status);

    let body = serde_json::to_string(&response.body)?;
    let http_response = Response::builder()
        .status(response.status)
        .header("content-type", "application/json")
        .body(Body::Text(body))?;
    Ok(http_response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let rates = match std::env::var("PAGODA_RATES_FILE") {
        Ok(path) => RateTables::from_json_file(&path)?,
        Err(_) => RateTables::default(),
    };
    let calculator = Arc::new(PremiumCalculator::new(rates));

    run(service_fn(move |event: Request| {
        let calculator = Arc::clone(&calculator);
        async move { function_handler(&calculator, event).await }
    }))
    .await
}

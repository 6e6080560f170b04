use anyhow::Result;
use dni_lookup::{
    api::types::{INVALID_DNI_MESSAGE, NO_RESULTS_MESSAGE},
    config::Config,
    query::{LookupCoordinator, LookupError},
    types::{ApiResponse, LookupResponse},
};

/// Run one lookup from the command line and print the envelope as JSON
pub async fn run_lookup(config: Config, dni: String, pretty: bool) -> Result<()> {
    let coordinator = LookupCoordinator::from_config(&config)?;

    let envelope: ApiResponse<LookupResponse> = match coordinator.lookup(&dni).await {
        Ok(response) => ApiResponse::ok(response),
        Err(LookupError::InvalidInput(_)) => ApiResponse::err(INVALID_DNI_MESSAGE),
        Err(LookupError::NoResultsFound) => ApiResponse::err(NO_RESULTS_MESSAGE),
        Err(LookupError::Internal(e)) => return Err(e),
    };

    let output = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{}", output);

    if !envelope.success {
        std::process::exit(1);
    }
    Ok(())
}

// crates/stakescope-analysis/src/census.rs
//
// Validator census: active vs. delinquent vote accounts.

use stakescope_core::{QueryClient, QueryError, ValidatorCensus};

/// Count current and delinquent validators in one round trip.
///
/// Transport failures propagate unmodified.
pub async fn take_census<C>(client: &C) -> Result<ValidatorCensus, QueryError>
where
    C: QueryClient + ?Sized,
{
    let sets = client.get_validator_sets().await?;
    let census = ValidatorCensus::from(&sets);

    tracing::info!(
        active = census.active_count(),
        delinquent = census.delinquent_count(),
        total = census.total_count(),
        "Validator census complete"
    );

    Ok(census)
}

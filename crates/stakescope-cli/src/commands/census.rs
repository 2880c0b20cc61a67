// crates/stakescope-cli/src/commands/census.rs
//
// `stakescope census`: active vs. delinquent validator counts.

use stakescope_analysis::take_census;
use stakescope_core::{AnalysisError, ValidatorCensus};

use super::AppContext;
use crate::output::{print_section, FieldRow};

/// Fetch the census with a client scoped to this call.
pub async fn collect(ctx: &AppContext) -> Result<ValidatorCensus, AnalysisError> {
    let client = ctx.connect()?;
    Ok(take_census(&client).await?)
}

pub fn rows(census: &ValidatorCensus) -> Vec<FieldRow> {
    vec![
        FieldRow::new("Active validators", census.active_count()),
        FieldRow::new("Delinquent validators", census.delinquent_count()),
        FieldRow::new("Total validators", census.total_count()),
    ]
}

/// Run the census command.
pub async fn run(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let census = collect(ctx).await?;
    print_section(ctx.format, "Validator Census", &census, &rows(&census));
    Ok(())
}

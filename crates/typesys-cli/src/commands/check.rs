//! Check command implementation.

use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::loader;
use crate::output::Formatter;
use tracing::info;
use typesys_gatekeeper::{Gatekeeper, ValidationConfig, ValidationResult};

/// Execute the check command.
///
/// Fails with [`CliError::Rejected`] when any relationship def is rejected.
pub fn execute_check(
    args: CheckArgs,
    validation: &ValidationConfig,
    formatter: &Formatter,
) -> Result<()> {
    let results = run_check(&args, validation)?;

    println!("{}", formatter.format_results(&results)?);
    eprintln!("{}", formatter.check_summary(&results));

    let rejected = results.iter().filter(|r| !r.is_accepted()).count();
    if rejected > 0 {
        return Err(CliError::Rejected(rejected));
    }
    Ok(())
}

/// Load the files and validate every relationship def in them.
pub fn run_check(args: &CheckArgs, validation: &ValidationConfig) -> Result<Vec<ValidationResult>> {
    let config = if args.strict {
        ValidationConfig::strict()
    } else if args.permissive {
        ValidationConfig::permissive()
    } else {
        validation.clone()
    };

    let types = loader::load_files(&args.files)?;
    info!(
        "Checking {} relationship def(s) from {} file(s)",
        types.relationship_defs.len(),
        args.files.len()
    );

    Ok(Gatekeeper::new(config).validate_types(&types))
}

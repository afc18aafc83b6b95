//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::loader;
use crate::output::Formatter;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, formatter: &Formatter) -> Result<()> {
    let types = loader::load_files(&args.files)?;
    println!("{}", formatter.format_relationship_defs(&types.relationship_defs)?);
    Ok(())
}

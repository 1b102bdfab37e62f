use std::io::{self, Write};

use super::{create_client, load_config};
use crate::api::reference::{fetch_all_reference, fetch_reference, ReferenceType};
use crate::cli::args::{CommonArgs, ReferenceArgs};
use crate::error::{GleifError, Result};
use crate::output;
use crate::progress::{FetchProgress, ProgressManager};

/// Execute reference data command.
///
/// `--list` is a human-readable table on stderr; stdout only ever carries a JSON document.
pub async fn execute(args: ReferenceArgs, common: &CommonArgs, out: &mut dyn Write) -> Result<()> {
    if args.list {
        return output::write_reference_types(&mut io::stderr());
    }

    // Resolve the requested type before any configuration or network work
    let kind = match (args.all, args.data_type.as_deref()) {
        (true, _) => None,
        (false, Some(data_type)) => Some(data_type.parse::<ReferenceType>()?),
        (false, None) => {
            return Err(GleifError::InvalidArgument(format!(
                "No reference data type given. Pass one of [{}], --all, or --list",
                ReferenceType::available()
            )))
        }
    };

    let config = load_config(common)?;
    let options = config.reference_options();
    let client = create_client(&config)?;
    let progress_manager = ProgressManager::new(common.quiet);

    match kind {
        Some(kind) => {
            let progress = FetchProgress::new(&progress_manager, &format!("Fetching {}...", kind));
            let envelope = fetch_reference(&client, kind, &options).await;
            progress.finish_and_clear();

            output::write_json(out, &envelope?, common.compact)
        }
        None => {
            let progress = FetchProgress::new(
                &progress_manager,
                &format!("Fetching {} reference data types...", ReferenceType::ALL.len()),
            );
            let bundle = fetch_all_reference(&client, &options).await;
            progress.finish_and_clear();

            output::write_json(out, &bundle?, common.compact)
        }
    }
}

use std::io::Write;

use super::{create_client, load_config};
use crate::api::search::{search_entities, SearchRequest};
use crate::cli::args::{CommonArgs, SearchArgs};
use crate::error::Result;
use crate::output;
use crate::progress::{FetchProgress, ProgressManager};

/// Execute entity search command
pub async fn execute(args: SearchArgs, common: &CommonArgs, out: &mut dyn Write) -> Result<()> {
    // Reject bad input before any configuration or network work
    let request = SearchRequest::new(&args.query, args.fulltext, args.country.as_deref())?;

    let config = load_config(common)?;
    let options = config.search_options(args.include_instruments, args.instrument_request_budget);
    let client = create_client(&config)?;

    let progress_manager = ProgressManager::new(common.quiet);
    let progress = FetchProgress::new(
        &progress_manager,
        &format!("Searching GLEIF for '{}'...", request.query()),
    );

    let envelope = search_entities(&client, &request, &options).await;
    progress.finish_and_clear();

    output::write_json(out, &envelope?, common.compact)
}

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use fundscope::currency::DEFAULT_RATES_FILE;
use fundscope::pipeline::resolve_rates;
use fundscope::report::print_analysis_results;
use fundscope::utils::{setup_logging, validate_args};
use fundscope::{analyze_campaigns, init_default_rates, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if args.init {
        return init_default_rates(Path::new(DEFAULT_RATES_FILE));
    }

    validate_args(&args)?;

    let rates = resolve_rates(&args)?;

    // Fatal errors are printed once, by anyhow, on the way out of main.
    match analyze_campaigns(&args.source(), &rates)? {
        Some(result) => print_analysis_results(&result, args.format, args.top),
        // Nothing scraped; the failure is already logged.
        None => Ok(()),
    }
}

use anyhow::Result;
use tracing::{info, warn};

use takeout_history::{cli, config, logging, metadata, takeout, util};

fn main() -> Result<()> {
    logging::init_logging();

    let cli_opts = cli::parse();
    let loaded = config::load_config(cli_opts.config_path.as_deref())?;
    let mut cfg = loaded.config;

    let unknown_documents = util::filter_documents(&mut cfg, cli_opts.documents.as_deref());
    for unknown in unknown_documents {
        warn!("unknown document id in --documents: {unknown}");
    }
    if cli_opts.documents.is_some() && cfg.documents.is_empty() {
        warn!("no documents selected after applying --documents filter");
    }

    let run_output_dir = cli_opts.output.join(&cfg.run_id);
    let tool_version = env!("CARGO_PKG_VERSION");

    info!(
        "starting run_id={} input={} output={} documents={}",
        cfg.run_id,
        cli_opts.input.display(),
        run_output_dir.display(),
        cfg.documents.len()
    );

    let meta_sink = if cli_opts.dry_run {
        info!("dry run: no output files will be written");
        metadata::build_dry_run_sink()
    } else {
        util::ensure_output_dir(&run_output_dir)?;
        let meta_backend = util::backend_from_cli(cli_opts.metadata_backend);
        metadata::build_sink(
            meta_backend,
            &cfg.run_id,
            tool_version,
            &loaded.config_hash,
            &run_output_dir,
        )?
    };

    let summary = takeout::run_extraction(&cfg, &cli_opts.input, meta_sink.as_ref())?;

    info!(
        "takeout-history run finished: documents={} failed={} records={} record_errors={}",
        summary.documents_processed,
        summary.documents_failed,
        summary.records_extracted,
        summary.record_errors
    );
    Ok(())
}

//! script-voiceover CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use script_voiceover::backend::create_backend;
use script_voiceover::cli::{Args, load_script, write_output};
use script_voiceover::engine::{
    CancelToken, PipelineController, ProgressEvent, ProgressSink, RunConfig, prepare_utterances,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env before parsing so env-backed flags pick it up
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.run_config().context("Invalid voice settings")?;
    let source = args.source()?;
    let raw = load_script(&source).context("Failed to read script")?;

    if args.dry_run {
        return preview(&raw, &config);
    }

    generate_voiceover(&args, &raw, &config)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("script_voiceover=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn preview(raw: &str, config: &RunConfig) -> Result<()> {
    let utterances = prepare_utterances(raw, config).context("Nothing to synthesize")?;

    println!("{} utterance(s):", utterances.len());
    for utterance in &utterances {
        println!(
            "  {:>3}  {:<9}  {}",
            utterance.sequence_index,
            utterance.profile.voice,
            utterance.text
        );
    }

    Ok(())
}

fn generate_voiceover(args: &Args, raw: &str, config: &RunConfig) -> Result<()> {
    let backend = create_backend(&args.host, args.timeout())
        .with_context(|| format!("Failed to set up backend at {}", args.host))?;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCancelling after the current line...");
        handler_token.cancel();
    })
    .context("Error setting Ctrl-C handler")?;

    println!("Generating voiceover...");
    println!("  Backend: {}", backend.base_url());
    println!("  Mode: {:?}", config.voice_mode);
    println!(
        "  Rate: {}  Pitch: {}",
        config.prosody.rate_string(),
        config.prosody.pitch_string()
    );
    println!("  Format: {}", config.audio_format);

    let mut controller = PipelineController::new(backend);
    let progress = BarProgress::new()?;
    let result = controller.run(raw, config, &progress, &cancel);
    progress.finish();

    let output = result.context("Failed to generate voiceover")?;

    write_output(&args.output, &output.audio)
        .with_context(|| format!("Failed to write audio to: {}", args.output.display()))?;

    println!("Audio saved to: {}", args.output.display());
    println!("  Lines: {}", output.utterance_count);
    println!("  Size: {} bytes ({})", output.audio.len(), output.audio.mime_type());
    println!("  Time: {:.1}s", output.elapsed.as_secs_f64());

    Ok(())
}

/// Terminal progress bar fed by pipeline progress events.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} lines {msg}",
        )
        .context("Invalid progress bar template")?
        .progress_chars("#>-");
        bar.set_style(style);

        Ok(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for BarProgress {
    fn on_progress(&self, event: &ProgressEvent) {
        self.bar.set_length(event.total as u64);
        self.bar.set_position(event.completed as u64);
        self.bar.set_message(format!("({:.1}s)", event.elapsed_seconds()));
    }
}

// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints results. All work is
// delegated to Layer 2 (application).
//
//   inspect  — show one encoded record
//   stats    — tokenized length summary
//   prepare  — encode, split and write the corpus

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PrepareArgs, StatsArgs};

use crate::application::{
    inspect_use_case::InspectUseCase,
    prepare_use_case::PrepareUseCase,
};
use crate::domain::mask::AttentionMask;

#[derive(Parser, Debug)]
#[command(
    name = "bilingual-dataset",
    version,
    about = "Tokenize, pad and mask parallel sentence pairs for seq2seq training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => run_inspect(args),
            Commands::Stats(args)   => run_stats(args),
            Commands::Prepare(args) => run_prepare(args),
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let config   = args.data.dataset_config()?;
    let use_case = InspectUseCase::new(&args.data.source(), &config)?;
    let record   = use_case.record(args.index)?;

    println!("src_text:      {}", record.src_text);
    println!("tgt_text:      {}", record.tgt_text);
    println!("encoder_input: {:?}", record.encoder_input);
    println!("decoder_input: {:?}", record.decoder_input);
    println!("label:         {:?}", record.label);
    println!("encoder_mask:  {}", render_row(&record.encoder_mask, 0));
    println!(
        "decoder_mask:  shape {:?}, {} visible positions",
        record.decoder_mask.shape(),
        record.decoder_mask.count_true()
    );
    if args.full_mask {
        for i in 0..record.seq_len() {
            println!("  {}", render_row(&record.decoder_mask, i));
        }
    }
    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let config   = args.data.dataset_config()?;
    let use_case = InspectUseCase::new(&args.data.source(), &config)?;
    let stats    = use_case.stats()?;

    println!("rows:              {}", stats.rows);
    println!(
        "source tokens:     max {}, mean {:.1}, over budget {}",
        stats.source.max_tokens, stats.source.mean_tokens, stats.source.over_budget
    );
    println!(
        "target tokens:     max {}, mean {:.1}, over budget {}",
        stats.target.max_tokens, stats.target.mean_tokens, stats.target.over_budget
    );
    println!("rejected at {:>4}:  {}", stats.seq_len, stats.rejected);
    println!("min seq_len:       {}", stats.min_seq_len());
    Ok(())
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let output_dir = args.output_dir.clone();
    let summary    = PrepareUseCase::new(args.try_into()?).execute()?;

    println!(
        "Wrote {} train and {} validation records to '{}' ({} skipped).",
        summary.train, summary.val, output_dir, summary.skipped
    );
    Ok(())
}

/// One mask row as `1`/`0` characters.
fn render_row(mask: &AttentionMask, row: usize) -> String {
    let [_, _, width] = mask.shape();
    (0..width)
        .map(|j| if mask.get(0, row, j) { '1' } else { '0' })
        .collect()
}

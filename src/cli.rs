// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use log::LevelFilter;

use crate::config::{options::{AnalysisOptions, CrawlOptions}, settings};
use crate::file::read_list_file;
use crate::log::LogTarget;
use crate::progress::StderrProgress;
use crate::source::{HttpSource, PageSource, SnapshotSource};
use crate::sport::Sport;
use crate::{report, runner, store};

#[derive(Debug, Parser)]
#[command(name = "fixture_stats")]
#[command(about = "Crawl league results tables and measure top-vs-bottom head-to-heads", long_about = None)]
pub struct Cli {
    /// Mirror the debug log to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crawl results pages into one CSV per league season
    Crawl(CrawlArgs),
    /// Build the best-vs-worst report for a sport directory
    Analyse(AnalyseArgs),
    /// Parse a saved token dump (one token per line)
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
    #[arg(long)]
    pub sport: Sport,
    /// File with one league path per line (e.g. spain/acb)
    #[arg(long)]
    pub leagues: PathBuf,
    /// File with one season per line (e.g. 2020-2021)
    #[arg(long)]
    pub seasons: PathBuf,
    #[arg(long, default_value = crate::config::consts::DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
    /// Read saved pages from this directory instead of fetching
    #[arg(long)]
    pub snapshots: Option<PathBuf>,
    /// Re-crawl leagues whose CSV already exists
    #[arg(long)]
    pub overwrite: bool,
}

#[derive(Debug, Args)]
pub struct AnalyseArgs {
    /// Directory holding one sub-directory per season
    #[arg(long)]
    pub sport_dir: PathBuf,
    #[arg(long)]
    pub outfile: PathBuf,
    /// key=value settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub best: Option<usize>,
    #[arg(long)]
    pub worst: Option<usize>,
    #[arg(long)]
    pub stabilization_round: Option<u32>,
    #[arg(long)]
    pub last_round: Option<u32>,
    #[arg(long)]
    pub max_withdrawn_teams: Option<usize>,
    /// List the classified matches under each championship
    #[arg(long)]
    pub details: Option<bool>,
    /// Write the effective settings to this file
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    #[arg(long)]
    pub sport: Sport,
    #[arg(long)]
    pub tokens: PathBuf,
    /// Season name used to resolve years, e.g. 2020-2021
    #[arg(long)]
    pub season: Option<String>,
    /// Write the matches here instead of printing them
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl AnalyseArgs {
    /// Defaults < settings file < flags.
    pub fn analysis_options(&self) -> crate::error::Result<AnalysisOptions> {
        let mut opts = match &self.config {
            Some(path) => settings::load(path)?,
            None => AnalysisOptions::default(),
        };
        if let Some(v) = self.best { opts.best_count = v; }
        if let Some(v) = self.worst { opts.worst_count = v; }
        if let Some(v) = self.stabilization_round { opts.stabilization_round = v; }
        if let Some(v) = self.last_round { opts.last_round = Some(v); }
        if let Some(v) = self.max_withdrawn_teams { opts.max_withdrawn_teams = v; }
        if let Some(v) = self.details { opts.include_match_details = v; }
        Ok(opts)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    crate::log::init(LogTarget { stderr: cli.verbose, ..LogTarget::default() }, level);

    match cli.command {
        Command::Crawl(args) => crawl(args),
        Command::Analyse(args) => analyse(args),
        Command::Parse(args) => parse(args),
    }
}

fn crawl(args: CrawlArgs) -> Result<()> {
    let leagues = read_list_file(&args.leagues)?;
    let seasons = read_list_file(&args.seasons)?;
    if leagues.is_empty() || seasons.is_empty() {
        return Err(eyre!("Nothing to crawl: need at least one league and one season"));
    }

    let opts = CrawlOptions { sport: args.sport, out_dir: args.out_dir, overwrite: args.overwrite };
    let mut source: Box<dyn PageSource> = match args.snapshots {
        Some(dir) => Box::new(SnapshotSource::new(dir)),
        None => Box::new(HttpSource::new()?),
    };

    let mut progress = StderrProgress::new();
    let summary = runner::crawl(&leagues, &seasons, source.as_mut(), &opts, Some(&mut progress))?;

    println!(
        "Written: {}, skipped: {}, failed: {}",
        summary.written.len(), summary.skipped.len(), summary.failures.len()
    );
    for f in &summary.failures {
        println!("FAILED {} ({}): {}", f.league_id, f.url, f.reason);
    }
    Ok(())
}

fn analyse(args: AnalyseArgs) -> Result<()> {
    let opts = args.analysis_options()?;
    if let Some(path) = &args.save_config {
        settings::save(path, &opts)?;
    }
    let mut progress = StderrProgress::new();
    let summary = runner::analyse_dir(&args.sport_dir, &args.outfile, &opts, Some(&mut progress))?;

    println!(
        "Report: {} (win rate {}), {} issue(s) in {}",
        summary.report_path.display(),
        report::format_win_rate(summary.totals.win_rate()),
        summary.issues.len(),
        summary.issues_path.display()
    );
    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    let matches = runner::parse_token_file(&args.tokens, args.sport, args.season.as_deref())?;
    match args.out {
        Some(path) => {
            store::write_matches(&path, &matches)?;
            println!("{} matches -> {}", matches.len(), path.display());
        }
        None => {
            for m in &matches {
                println!("{} {m}", m.date);
            }
        }
    }
    Ok(())
}

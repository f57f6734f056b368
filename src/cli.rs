//! EchoMind CLI - interactive journaling session
//!
//! One process is one session: memories live until you quit.
//!
//! Usage:
//!   echomind                          Start a session
//!   echomind --window-days 14         Reflect over two weeks instead of one
//!
//! Session commands:
//!   capture                           Capture a new thought
//!   recall [--emotion E] [--tag T]    Recall past thoughts, newest first
//!   reflect                           Weekly emotional reflection
//!   emotions                          List the emotions you can pick
//!   quit                              End the session

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use echomind::{
    most_recent_first, DailyEmotionMatrix, DailyEmotionRow, Emotion, EmotionCount, Journal,
    Memory, RecallFilter, Reflection, ReflectionConfig, WeeklySummary,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M %p";
const BAR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "echomind")]
#[command(about = "EchoMind - Capture thoughts, recall them, reflect on your week")]
#[command(version)]
struct Cli {
    /// Length of the reflection window in days
    #[arg(long, env = "ECHOMIND_WINDOW_DAYS", default_value = "7")]
    window_days: i64,

    /// Number of highlights shown in a reflection
    #[arg(long, default_value = "3")]
    highlights: usize,

    /// Hours east of UTC used for dates and times
    #[arg(long, env = "ECHOMIND_UTC_OFFSET", default_value = "0", allow_hyphen_values = true)]
    utc_offset_hours: i32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// One line typed inside the session
#[derive(Parser)]
#[command(no_binary_name = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Capture a new thought or insight
    Capture,

    /// Recall past thoughts
    Recall {
        /// Filter by emotion
        #[arg(short, long, value_enum)]
        emotion: Option<CliEmotion>,

        /// Search by tag (exact, case-insensitive); quote tags containing spaces
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Weekly emotional reflection
    Reflect,

    /// List the available emotions
    Emotions,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliEmotion {
    Happy,
    Stressed,
    Curious,
    Frustrated,
    Calm,
}

impl From<CliEmotion> for Emotion {
    fn from(cli: CliEmotion) -> Self {
        match cli {
            CliEmotion::Happy => Emotion::Happy,
            CliEmotion::Stressed => Emotion::Stressed,
            CliEmotion::Curious => Emotion::Curious,
            CliEmotion::Frustrated => Emotion::Frustrated,
            CliEmotion::Calm => Emotion::Calm,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "echomind=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ReflectionConfig::builder()
        .window_days(cli.window_days)
        .highlight_limit(cli.highlights)
        .utc_offset_hours(cli.utc_offset_hours)
        .build()?;

    run_session(Journal::with_config(config))
}

fn run_session(mut journal: Journal) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("{}", "🧠 EchoMind - Personal Contextual Memory OS".bold().green());
    println!("Capture your thoughts, recall them by emotion or tag, and reflect on your week.");
    println!("Type {} for commands.\n", "help".cyan());

    loop {
        let line = match rl.readline("echomind> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = rl.add_history_entry(line) {
            tracing::debug!("Could not record history entry: {}", e);
        }

        let Some(words) = shlex::split(line) else {
            println!("{}", "Unbalanced quotes in command".red());
            continue;
        };
        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // also covers `help` and `--help`
                if let Err(io) = e.print() {
                    tracing::debug!("Could not print usage: {}", io);
                }
                continue;
            }
        };

        match parsed.command {
            SessionCommand::Capture => cmd_capture(&mut rl, &mut journal)?,
            SessionCommand::Recall { emotion, tag } => cmd_recall(&journal, emotion, tag),
            SessionCommand::Reflect => cmd_reflect(&journal),
            SessionCommand::Emotions => cmd_emotions(),
            SessionCommand::Quit => break,
        }
    }

    println!("Goodbye! {} thoughts captured this session.", journal.all().len());
    Ok(())
}

/// Read one answer; `None` when the user cancels with Ctrl-C or Ctrl-D.
fn ask(rl: &mut DefaultEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(answer) => Ok(Some(answer)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Accepts a 1-based picker number, a name, a label or an emoji.
fn parse_emotion_choice(answer: &str) -> Option<Emotion> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(Emotion::ALL[0]);
    }
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Emotion::ALL.get(i)).copied();
    }
    answer.parse().ok()
}

fn cmd_capture(rl: &mut DefaultEditor, journal: &mut Journal) -> anyhow::Result<()> {
    println!("{}", "💭 Capture a New Thought or Insight".bold());

    let Some(thought) = ask(rl, "What's on your mind? ")? else {
        return Ok(());
    };

    for (i, emotion) in Emotion::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, emotion);
    }
    let emotion = loop {
        let Some(answer) = ask(rl, "What are you feeling? [1] ")? else {
            return Ok(());
        };
        match parse_emotion_choice(&answer) {
            Some(emotion) => break emotion,
            None => println!("{}", format!("'{}' is not one of the emotions above", answer.trim()).red()),
        }
    };

    let Some(tags) = ask(rl, "Tags (comma-separated, e.g., idea, strategy, team): ")? else {
        return Ok(());
    };

    if journal.capture(&thought, emotion, &tags).is_some() {
        println!("{}", "🧠 Thought captured successfully!".green().bold());
    }

    Ok(())
}

fn cmd_recall(journal: &Journal, emotion: Option<CliEmotion>, tag: Option<String>) {
    println!("{}", "🔍 Recall Past Thoughts".bold());

    let mut filter = RecallFilter::new();
    if let Some(emotion) = emotion {
        filter = filter.with_emotion(emotion.into());
    }
    if let Some(tag) = tag {
        filter = filter.with_tag(tag);
    }

    let found = journal.recall(&filter);
    if found.is_empty() {
        println!("{}", "No matching memories found.".yellow());
        return;
    }

    for memory in most_recent_first(found) {
        print_memory(journal.config(), memory, true);
    }
}

fn cmd_reflect(journal: &Journal) {
    println!("{}", "📈 Weekly Emotional Reflection".bold());

    let reflection = journal.reflect(chrono::Utc::now());
    let summary = match &reflection {
        Reflection::NoData => {
            println!(
                "{}",
                "You have not captured any thoughts in the past week.".yellow()
            );
            return;
        }
        Reflection::Summary(summary) => summary,
    };

    println!(
        "{}",
        format!("You've captured {} thoughts this week.", summary.total_count).bold()
    );

    println!("\n{}", "🧠 Emotional Trends".bold().underline());
    for entry in &summary.emotion_counts {
        println!("  {}: {} times", entry.emotion, entry.count);
    }

    println!("\n{}", "📝 Sample Highlights".bold().underline());
    for memory in summary.highlights_for_display() {
        print_memory(journal.config(), memory, false);
    }

    println!("\n{}", "📊 Mood Graph".bold().underline());
    print_daily_table(summary);
    println!();
    print_weekly_bars(summary);
}

fn cmd_emotions() {
    for (i, emotion) in Emotion::ALL.iter().enumerate() {
        let (r, g, b) = emotion.rgb();
        println!(
            "  {}. {:<14} {} {}",
            i + 1,
            emotion.label(),
            emotion.name().cyan(),
            "■".truecolor(r, g, b)
        );
    }
}

fn paint(emotion: Emotion, text: &str) -> ColoredString {
    let (r, g, b) = emotion.rgb();
    text.truecolor(r, g, b)
}

fn print_memory(config: &ReflectionConfig, memory: &Memory, with_tags: bool) {
    let when = memory
        .timestamp
        .with_timezone(&config.utc_offset)
        .format(TIMESTAMP_FORMAT);
    println!("{}", format!("🕒 {}", when).bold());
    println!("  Emotion: {}", memory.emotion);
    if with_tags {
        println!("  Tags: {}", memory.tags.join(", ").cyan());
    }
    println!("  > {}", memory.text);
    println!("{}", "---".dimmed());
}

/// Mood trend: one row per captured day, one column per observed emotion.
fn print_daily_table(summary: &WeeklySummary) {
    let matrix = &summary.daily_emotion_matrix;

    println!("{}", daily_table_header(matrix));
    for row in &matrix.rows {
        println!("{}", daily_table_row(matrix, row));
    }
}

fn daily_table_header(matrix: &DailyEmotionMatrix) -> String {
    let mut header = format!("  {:<8}", "Date");
    for emotion in &matrix.emotions {
        header.push_str(&format!(" {:>4}", emotion.emoji()));
    }
    header
}

fn daily_table_row(matrix: &DailyEmotionMatrix, row: &DailyEmotionRow) -> String {
    let mut line = format!("  {:<8}", row.date.format("%b %d").to_string());
    for (emotion, count) in matrix.emotions.iter().zip(&row.counts) {
        let cell = format!("{:>5}", count);
        if *count == 0 {
            line.push_str(&cell.dimmed().to_string());
        } else {
            line.push_str(&paint(*emotion, &cell).to_string());
        }
    }
    line
}

/// Weekly summary bars, largest first.
fn print_weekly_bars(summary: &WeeklySummary) {
    let totals = &summary.weekly_emotion_totals;

    for (entry, len) in totals.iter().zip(weekly_bar_lengths(totals)) {
        println!(
            "  {:<14} {} {}",
            entry.emotion.label(),
            paint(entry.emotion, &"█".repeat(len)),
            entry.count
        );
    }
}

/// Bar lengths scaled so the largest total fills `BAR_WIDTH`; any non-zero
/// total gets at least one cell.
fn weekly_bar_lengths(totals: &[EmotionCount]) -> Vec<usize> {
    let max = totals.iter().map(|c| c.count).max().unwrap_or(0);
    totals.iter().map(|c| bar_length(c.count, max)).collect()
}

fn bar_length(count: usize, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    (count * BAR_WIDTH).div_ceil(max)
}

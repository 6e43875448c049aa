use anyhow::Context;
use clap::{Parser, Subcommand};
use lyricfetch::config;
use lyricfetch::lyrics::{self, LyricRecord, LyricsSession, Query};

#[derive(Debug, Parser)]
#[command(name = "lyricfetch", version, about = "Look up song lyrics by artist and title")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Log every pipeline step.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for a song and print its lyrics.
    Search {
        artist: String,
        title: String,
        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fetch lyrics directly by handle id.
    Lyric {
        hid: String,
        #[arg(long)]
        json: bool,
    },
    /// Dump the raw search XML to stdout.
    RawSearch { artist: String, title: String },
    /// Print the config file location.
    ConfigPath,

    /// Raw-response archive settings.
    Archive {
        #[command(subcommand)]
        cmd: ArchiveCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ArchiveCommand {
    /// Keep copies of raw search and lyric documents.
    On,
    /// Stop keeping raw documents.
    Off,
    /// Store raw documents under a different directory.
    Dir { path: std::path::PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Command::ConfigPath = cli.command {
        let path = match cli.config {
            Some(p) => p,
            None => config::default_config_path().context("default config path")?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    if let Command::Archive { cmd } = cli.command {
        let mut cfg = cfg;
        match cmd {
            ArchiveCommand::On => cfg.archive.enabled = true,
            ArchiveCommand::Off => cfg.archive.enabled = false,
            ArchiveCommand::Dir { path } => {
                cfg.archive.dir = path;
                cfg.archive.enabled = true;
            }
        }
        config::save(&cfg, cli.config.as_deref()).context("save config")?;
        println!("Updated archive settings.");
        return Ok(());
    }

    let client = lyrics::client_from_config(&cfg).context("build lyrics client")?;
    let mut session = LyricsSession::new(client);

    match cli.command {
        Command::Search {
            artist,
            title,
            json,
        } => {
            session.set_artist(artist);
            session.set_title(title);
            match session.try_search().await.context("search lyrics")? {
                Some(record) => print_record(record, json)?,
                None => println!("No lyrics found."),
            }
        }
        Command::Lyric { hid, json } => {
            let record = session
                .client()
                .lyric_by_handle(&hid)
                .await
                .context("fetch lyric")?;
            print_record(&record, json)?;
        }
        Command::RawSearch { artist, title } => {
            let raw = session
                .client()
                .search_document(&Query::new(artist, title))
                .await
                .context("fetch search document")?;
            println!("{raw}");
        }
        Command::ConfigPath | Command::Archive { .. } => {}
    }

    Ok(())
}

fn print_record(record: &LyricRecord, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{} - {}", record.artist, record.title);
    if let Some(writer) = &record.writer {
        println!("Written by {writer}");
    }
    println!();
    println!("{}", record.body.as_deref().unwrap_or("(no lyric text)"));
    Ok(())
}

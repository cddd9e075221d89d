use anyhow::{bail, Context};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use mathfun::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    generator,
    grade::Grade,
    logging,
    randomizer::{Randomizer, SeededRandomizer, ThreadRandomizer},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    topic::{Catalogue, TopicId},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin, Write},
    path::PathBuf,
};

/// arithmetic and logic practice for primary school kids
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Arithmetic and logic practice for grades 1-4: procedurally generated questions, hints, a timed drill and achievements."
)]
pub struct Cli {
    /// school grade, 1-4 (defaults to the config file)
    #[clap(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
    grade: Option<u8>,

    /// topic to start with, skipping the menus
    #[clap(short, long, value_enum)]
    topic: Option<TopicId>,

    /// start a timed drill (mixed topics unless --topic is given)
    #[clap(long)]
    timer: bool,

    /// seed for reproducible questions
    #[clap(long)]
    seed: Option<u64>,

    /// drill length in seconds
    #[clap(long)]
    timer_secs: Option<u32>,

    /// write logs here instead of the state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// print N generated questions as JSON and exit
    #[clap(long, value_name = "N")]
    dump: Option<usize>,

    /// persist the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Flags override values loaded from the config file
    fn apply(&self, mut config: Config) -> Config {
        if let Some(grade) = self.grade.and_then(Grade::new) {
            config.default_grade = grade;
        }
        if let Some(secs) = self.timer_secs {
            config.timer_secs = secs;
        }
        config
    }

    fn randomizer(&self) -> Box<dyn Randomizer> {
        match self.seed {
            Some(seed) => Box::new(SeededRandomizer::new(seed)),
            None => Box::new(ThreadRandomizer),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // dumps stay quiet unless a log file is asked for
    if cli.dump.is_none() || cli.log_file.is_some() {
        if let Some(path) = logging::init(cli.log_file.clone()) {
            tracing::info!(path = %path.display(), "logging to file");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("saving config to {}", store.path().display()))?;
    }

    if let Some(count) = cli.dump {
        return dump(&cli, &config, count);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let catalogue = Catalogue::embedded().context("loading topic catalogue")?;
    let mut app = App::new(config, catalogue, cli.randomizer());
    app.start(cli.grade.and_then(Grade::new), cli.topic, cli.timer);

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let snapshot = app.session.snapshot();
    tracing::info!(
        total_correct = snapshot.total_correct,
        achievements = snapshot.achievements_unlocked,
        "session closed"
    );
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    while !app.should_quit {
        match runner.step() {
            AppEvent::Tick(elapsed) => app.on_tick(elapsed),
            AppEvent::Resize => {}
            AppEvent::Key(key) => app.on_key(key),
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }
    Ok(())
}

/// Print `count` questions for the chosen topic and grade as a JSON array
fn dump(cli: &Cli, config: &Config, count: usize) -> anyhow::Result<()> {
    let grade = config.default_grade;
    let topic = cli.topic.unwrap_or(TopicId::Mixed);
    if !topic.is_available_for(grade) {
        bail!("topic {topic} is not offered for grade {grade}");
    }

    let mut rng = cli.randomizer();
    let questions: Vec<_> = (0..count)
        .map(|_| generator::generate(topic, grade, rng.as_mut()))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &questions).context("writing questions")?;
    writeln!(out)?;
    Ok(())
}

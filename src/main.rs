use cardpress::{
    CardpressError, DEFAULT_CARDS_PER_PAGE, ExportBuilder, ExportFormat, PageSetup, Project, ProjectStore,
    import_workbook,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lay out business cards from a saved project and export printable sheets.
#[derive(Parser, Debug)]
#[command(name = "cardpress", version, about)]
struct Cli {
    /// Project store directory (defaults to $CARDPRESS_HOME or ~/.business-card-generator)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved projects
    List,
    /// Create a project with the default fields
    Create { name: String },
    /// Export a project's cards to PDF or Word
    Export {
        project: String,
        output: PathBuf,
        #[arg(short = 'n', long, default_value_t = DEFAULT_CARDS_PER_PAGE)]
        cards_per_page: usize,
        /// Output format; inferred from the output extension when omitted
        #[arg(short, long)]
        format: Option<String>,
        #[arg(long, value_enum, default_value_t = Paper::Letter)]
        paper: Paper,
    },
    /// Replace a project's fields and cards with the contents of a spreadsheet
    Import { spreadsheet: PathBuf, project: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Paper {
    Letter,
    A4,
}

impl Paper {
    fn setup(self) -> PageSetup {
        match self {
            Paper::Letter => PageSetup::letter(),
            Paper::A4 => PageSetup::a4(),
        }
    }
}

fn main() -> Result<(), CardpressError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let store = match cli.store {
        Some(dir) => ProjectStore::new(dir),
        None => ProjectStore::from_env()?,
    };

    match cli.command {
        Command::List => {
            for name in store.list()? {
                println!("{}", name);
            }
        }
        Command::Create { name } => {
            let project = store.create(&name)?;
            println!("Created {}", project.dir().display());
        }
        Command::Export { project, output, cards_per_page, format, paper } => {
            let project = store.open(&project)?;
            let mut builder = ExportBuilder::new()
                .with_cards_per_page(cards_per_page)
                .with_page_setup(paper.setup())
                .with_asset_root(project.dir());
            if let Some(format) = format {
                builder = builder.with_format(format.parse::<ExportFormat>()?);
            }
            let report = builder
                .build()?
                .export(&project.deck.template, &project.deck.records, &output)?;
            for warning in &report.warnings {
                eprintln!("warning: {}", warning);
            }
            println!(
                "Wrote {} cards on {} page(s) to {}",
                report.cards,
                report.pages,
                output.display()
            );
        }
        Command::Import { spreadsheet, project } => {
            let deck = import_workbook(&spreadsheet)?;
            let mut project = match store.open(&project) {
                Ok(mut existing) => {
                    existing.deck = deck;
                    existing
                }
                Err(cardpress::ProjectError::NotFound(_)) => Project::new(&project, store.project_dir(&project)?, deck),
                Err(e) => return Err(e.into()),
            };
            let report = store.save(&mut project)?;
            for warning in &report.warnings {
                eprintln!("warning: {}", warning);
            }
            println!(
                "Imported {} cards with {} fields into '{}'",
                project.deck.records.len(),
                project.deck.template.len(),
                project.name()
            );
        }
    }
    Ok(())
}

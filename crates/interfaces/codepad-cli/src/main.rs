use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use codepad_cli::commands::{self, PreviewSource};
use codepad_cli::Session;
use codepad_persistence::FileClientStore;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Base URL of the project store
    #[arg(long, global = true, env = codepad_config::API_URL_ENV, default_value = codepad_config::DEFAULT_API_URL)]
    api: String,
    /// Directory holding the session file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session and remember its token
    Login {
        email: String,
        #[arg(long, env = "CODEPAD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        username: String,
        email: String,
        #[arg(long, env = "CODEPAD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// List projects, optionally filtered by name
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Create a project from the starter template
    Create { name: String },
    Show { id: String },
    /// Write a project's HTML, CSS and JS into a directory
    Pull { id: String, dir: Utf8PathBuf },
    /// Upload a directory written by `pull` back into a project
    Push { id: String, dir: Utf8PathBuf },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Compose a project into a single HTML file
    Export {
        id: String,
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
    /// Render a project (or a local directory) and open it in the browser
    Preview {
        #[arg(required_unless_present = "dir")]
        id: Option<String>,
        #[arg(long, conflicts_with = "id")]
        dir: Option<Utf8PathBuf>,
        #[arg(long, help = "Write the preview here instead of the cache dir")]
        out_dir: Option<Utf8PathBuf>,
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    let store = match &cli.config_dir {
        Some(dir) => FileClientStore::in_dir(dir),
        None => FileClientStore::platform()?,
    };
    let session = Session::new(&cli.api, store)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::cmd_login(&session, &email, &password).await?
        }
        Commands::Register {
            username,
            email,
            password,
        } => commands::cmd_register(&session, &username, &email, &password).await?,
        Commands::Logout => commands::cmd_logout(&session)?,
        Commands::List { search, json } => {
            commands::cmd_list(&session, search.as_deref(), json).await?;
        }
        Commands::Create { name } => {
            commands::cmd_create(&session, &name).await?;
        }
        Commands::Show { id } => {
            commands::cmd_show(&session, &id).await?;
        }
        Commands::Pull { id, dir } => commands::cmd_pull(&session, &id, &dir).await?,
        Commands::Push { id, dir } => commands::cmd_push(&session, &id, &dir).await?,
        Commands::Delete { id, yes } => commands::cmd_delete(&session, &id, yes).await?,
        Commands::Export { id, output } => {
            commands::cmd_export(&session, &id, output).await?;
        }
        Commands::Preview {
            id,
            dir,
            out_dir,
            no_open,
        } => {
            let source = match (id, dir) {
                (_, Some(dir)) => PreviewSource::Dir(dir),
                (Some(id), None) => PreviewSource::Project(id),
                (None, None) => anyhow::bail!("Either a project id or --dir is required"),
            };
            commands::cmd_preview(&session, source, out_dir, !no_open).await?;
        }
    }

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::{Args, Parser, Subcommand};
    use std::io::{self, Write};
    use std::process::ExitCode;
    use tablarian::client::DetailLevel;
    use tablarian::commands::{self, index, init, publish, show, version};
    use tablarian::config::{DEFAULT_CONFIG_FILE, load_config};
    use tablarian::error::Result;
    use tablarian::locale::Locale;
    use tablarian::logging;
    use tablarian::publish::Format;

    #[derive(Parser)]
    #[command(name = "tablarian")]
    #[command(about = "Print and publish definitions of database tables")]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Print version
        Version,
        /// Create config file template in the working directory
        Init {
            /// Database system driver name (postgres)
            driver: String,
        },
        /// Print definition of a table to console
        Show(ShowArgs),
        /// Print table names to console
        Index(IndexArgs),
        /// Output definitions of all tables to files
        Publish(PublishArgs),
    }

    #[derive(Args)]
    struct ConfigArg {
        /// Config file path, `@` prefix for an absolute path
        #[arg(short, long = "config", default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    }

    #[derive(Args)]
    struct ShowArgs {
        /// Table name
        table: String,
        #[command(flatten)]
        config: ConfigArg,
        /// Also print indices, constraints and keys
        #[arg(short, long)]
        all: bool,
        /// Use conventional type names
        #[arg(short, long)]
        pretty: bool,
        /// Header locale (en, ja)
        #[arg(short, long, default_value = "en")]
        locale: String,
    }

    #[derive(Args)]
    struct IndexArgs {
        #[command(flatten)]
        config: ConfigArg,
        /// Without table comment
        #[arg(short = 'C', long)]
        no_comment: bool,
    }

    #[derive(Args)]
    struct PublishArgs {
        #[command(flatten)]
        config: ConfigArg,
        /// Use conventional type names
        #[arg(short, long)]
        pretty: bool,
        /// File format (markdown)
        #[arg(short, long, default_value = "markdown")]
        format: String,
        /// Document locale (en, ja)
        #[arg(short, long, default_value = "en")]
        locale: String,
        /// Print created files
        #[arg(short, long)]
        verbose: bool,
    }

    pub fn main() -> ExitCode {
        logging::init();
        let cli = Cli::parse();

        match run(cli.command) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    fn run(command: Command) -> Result<ExitCode> {
        let mut out = io::stdout().lock();

        match command {
            Command::Version => version::run(&mut out)?,
            Command::Init { driver } => init::run(&std::env::current_dir()?, &driver, &mut out)?,
            Command::Show(args) => {
                let config = load_config(&args.config.config)?;
                let mut client = commands::client_for(&config)?;
                let opts = show::ShowOptions {
                    table: args.table,
                    detail: DetailLevel::from_all_flag(args.all),
                    pretty: args.pretty,
                    locale: Locale::from_id(&args.locale),
                };
                show::run(client.as_mut(), &config, &opts, &mut out)?;
            }
            Command::Index(args) => {
                let config = load_config(&args.config.config)?;
                let mut client = commands::client_for(&config)?;
                let opts = index::IndexOptions {
                    with_comment: !args.no_comment,
                };
                index::run(client.as_mut(), &config, &opts, &mut out)?;
            }
            Command::Publish(args) => {
                let format = Format::from_str(&args.format)?;
                let config = load_config(&args.config.config)?;
                let mut client = commands::client_for(&config)?;
                let opts = publish::PublishOptions {
                    pretty: args.pretty,
                    format,
                    locale: Locale::from_id(&args.locale),
                    verbose: args.verbose,
                };
                let errors = publish::run(client.as_mut(), &config, &opts, &mut out)?;
                if !errors.is_empty() {
                    out.flush()?;
                    publish::report(&errors, &mut io::stderr().lock())?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        out.flush()?;
        Ok(ExitCode::SUCCESS)
    }
}

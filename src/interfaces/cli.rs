use clap::Parser;

#[derive(Parser)]
#[command(name = "mtl")]
#[command(about = "Translate HTML or text through pluggable translation backends.")]
#[command(version)]
pub struct Cli {
    /// Treat input as plain text instead of HTML
    #[arg(short = 't', long)]
    pub text: bool,

    /// Target language code (overrides config)
    #[arg(short = 'T', long)]
    pub target: Option<String>,

    /// Provider id (overrides config)
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Don't report progress
    #[arg(long)]
    pub no_progress: bool,

    /// List registered provider ids
    #[arg(long)]
    pub list_providers: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Input text (reads stdin when empty)
    #[arg(num_args = 0..)]
    pub input: Vec<String>,
}

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for values otherwise read from `MENU_CONTENT_*` variables.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Class of the `<div>` wrapped around each table.
    #[arg(long, global = true)]
    pub table_wrapper_class: Option<String>,

    /// Suffix repeated heading slugs (`-2`, `-3`, ...) so anchors are unique.
    #[arg(long, global = true)]
    pub unique_ids: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the anchor slug for a piece of text.
    Slugify(SlugifyArgs),
    /// Remove JSON-LD script blocks and stray JSON-LD text.
    StripJsonLd(StripJsonLdArgs),
    /// Add ids to h2/h3 headings that lack one.
    InjectIds(IoArgs),
    /// Print the table of contents as JSON.
    Toc(IoArgs),
    /// Inject heading ids and print `{processed_html, toc_items}` as JSON.
    Process(IoArgs),
    /// Wrap tables and add responsive image attributes.
    Responsive(IoArgs),
    /// Run the whole post pipeline and print `{html, toc_items, json_ld_blocks}`.
    Render(IoArgs),
}

#[derive(Debug, Args)]
pub struct SlugifyArgs {
    /// Text to slugify.
    pub text: String,
}

#[derive(Debug, Args)]
pub struct IoArgs {
    /// Input HTML file (default: stdin).
    #[arg(long)]
    pub input: Option<String>,

    /// Output file (default: stdout).
    #[arg(long)]
    pub out: Option<String>,

    /// Overwrite `--out` if it already exists.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct StripJsonLdArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Print `{cleaned_html, json_ld_blocks}` as JSON instead of HTML.
    #[arg(long)]
    pub blocks: bool,
}

//! Command-line interface for the `weft` binary.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::error::Result;
use crate::expand::Expander;
use crate::loader::{DebugLoader, Loader, TemplateLoader};

/// Weft - Expand custom component tags in HTML-like documents.
#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a markup file and print the result.
    Expand {
        /// Input file, or `-` for stdin.
        input: PathBuf,

        /// Write the result to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append the catch-all debug loader, dumping every component's
        /// attributes instead of leaving unknown tags untouched.
        #[arg(long)]
        debug: bool,
    },

    /// Render the built-in sample page through the sample components.
    Demo,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Expand {
            input,
            output,
            debug,
        } => expand_command(&input, output.as_deref(), debug),
        Commands::Demo => demo_command(),
    }
}

/// Execute the expand command.
fn expand_command(input: &Path, output: Option<&Path>, debug: bool) -> Result<()> {
    let source = read_input(input)?;

    let mut loaders: Vec<Box<dyn Loader>> = Vec::new();
    if debug {
        loaders.push(Box::new(DebugLoader::new()));
    } else {
        tracing::info!("no component loaders configured, expansion is a pass-through");
    }

    let expander = Expander::new(loaders);
    let html = expander.expand_str(&source)?;

    match output {
        Some(path) => {
            std::fs::write(path, &html)?;
            eprintln!("{} {}", style("Expanded to:").green().bold(), path.display());
        }
        None => println!("{html}"),
    }

    Ok(())
}

/// Execute the demo command: the sample page through the sample components.
fn demo_command() -> Result<()> {
    let expander = Expander::new(vec![Box::new(sample_components())]);
    let html = expander.expand_str(SAMPLE_PAGE)?;
    println!("{html}");
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Sample blog page used by the demo command.
const SAMPLE_PAGE: &str = r#"
  <main>
    <Header title="Field Notes" sub-title="a weft sample"></Header>
    <ArticleSnippet title="Shipping the parser" sub-title="what broke and why">
      The lenient tree builder landed this week.
      <ArticleSnippet title="A nested aside">
        Inner snippets expand before their parent renders.
      </ArticleSnippet>
    </ArticleSnippet>
    <ArticleSnippet title="Hello from weft">
      First entry.
    </ArticleSnippet>
  </main>
"#;

/// Component set for the demo command: a page header and an article
/// snippet that nests.
fn sample_components() -> TemplateLoader {
    TemplateLoader::new()
        .with_template("Header", |attrs, _children| {
            let title = attrs.get("title").map(String::as_str).unwrap_or_default();
            let subtitle = attrs
                .get("sub-title")
                .map(String::as_str)
                .unwrap_or_default();
            Ok(format!("<h1><strong>{title}</strong> {subtitle}</h1>"))
        })
        .with_template("ArticleSnippet", |attrs, children| {
            let title = attrs.get("title").map(String::as_str).unwrap_or_default();
            let subtitle = attrs
                .get("sub-title")
                .map(|s| format!("<p>{s}</p>"))
                .unwrap_or_default();
            Ok(format!(
                "<article><h2>{title}</h2>{subtitle}<div>{children}</div></article>"
            ))
        })
}

mod generate;
mod interactive;
mod schema;

use crate::config::ErdConfig;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate as generate_completions, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-erd")]
#[command(version)]
#[command(about = "Turn MySQL CREATE TABLE statements into Mermaid ER diagrams", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by commands that generate diagrams
#[derive(Args, Debug, Default)]
pub struct ErdArgs {
    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to look for inline comments: statement or global
    #[arg(long)]
    pub comment_scope: Option<String>,

    /// Mark columns listed in table-level PRIMARY KEY / UNIQUE constraints
    #[arg(long)]
    pub promote_table_keys: bool,

    /// How to print column types: declared or base
    #[arg(long)]
    pub type_style: Option<String>,

    /// Mermaid CLI executable used for SVG output
    #[arg(long)]
    pub mmdc: Option<String>,
}

impl ErdArgs {
    /// Config file values with command-line overrides applied
    pub fn resolve(&self) -> anyhow::Result<ErdConfig> {
        let mut config = ErdConfig::load_or_default(self.config.as_deref())?;

        if let Some(ref scope) = self.comment_scope {
            config.extract.comment_scope = scope.parse().map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        if self.promote_table_keys {
            config.extract.promote_table_keys = true;
        }
        if let Some(ref style) = self.type_style {
            config.markup.type_style = style.parse().map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        if let Some(ref command) = self.mmdc {
            config.render.command = command.clone();
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an ER diagram from CREATE TABLE statements
    Generate {
        /// Input SQL file, or - for stdin
        /// Supports .gz, .bz2, .xz, .zst compression
        file: PathBuf,

        /// Output file (default: stdout; er_diagram.svg for svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: mermaid, json, html, svg (default: from output extension, else mermaid)
        #[arg(short, long)]
        format: Option<String>,

        /// Only include these tables (comma-separated glob patterns)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude these tables (comma-separated glob patterns)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Output results as JSON (same as --format json)
        #[arg(long, conflicts_with = "format")]
        json: bool,

        #[command(flatten)]
        erd: ErdArgs,
    },

    /// Interactive prompt: paste CREATE TABLE statements and generate diagrams
    Interactive {
        /// Where .generate writes SVG when SVG output is on (default: er_diagram.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render SVG on every .generate
        #[arg(long)]
        svg: bool,

        #[command(flatten)]
        erd: ErdArgs,
    },

    /// Print the JSON Schema of --json output
    Schema {
        /// Command whose output schema to print
        #[arg(default_value = "generate")]
        command: String,

        /// List available schema names
        #[arg(long)]
        list: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            file,
            output,
            format,
            tables,
            exclude,
            json,
            erd,
        } => generate::run(file, output, format, tables, exclude, json, &erd),
        Commands::Interactive { output, svg, erd } => interactive::run(output, svg, &erd),
        Commands::Schema { command, list } => schema::run(&command, list),
        Commands::Completions { shell } => {
            generate_completions(shell, &mut Cli::command(), "sql-erd", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erd::format::TypeStyle;
    use crate::extract::CommentScope;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let args = ErdArgs {
            comment_scope: Some("global".into()),
            promote_table_keys: true,
            type_style: Some("base".into()),
            mmdc: Some("npx-mmdc".into()),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.extract.comment_scope, CommentScope::Global);
        assert!(config.extract.promote_table_keys);
        assert_eq!(config.markup.type_style, TypeStyle::Base);
        assert_eq!(config.render.command, "npx-mmdc");
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let args = ErdArgs {
            comment_scope: Some("nowhere".into()),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }
}

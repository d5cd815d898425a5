//! Interactive prompt: SQL is typed or pasted line by line, `.generate`
//! turns the buffer into a diagram.

use super::ErdArgs;
use crate::config::ErdConfig;
use crate::erd::{to_html, to_json, HtmlPage, OutputFormat};
use crate::input::read_sql;
use crate::render::{MermaidCli, Renderer};
use crate::session::{Generation, Session};
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the interactive prompt
pub fn run(output: Option<PathBuf>, svg: bool, erd: &ErdArgs) -> Result<()> {
    let config = erd.resolve()?;
    let mut repl = Repl {
        svg_path: output.unwrap_or_else(|| PathBuf::from(&config.output.file_name)),
        render_svg: svg,
        session: Session::default(),
        config,
    };

    let mut rl = DefaultEditor::new()?;

    // Load history
    let history_path = dirs::cache_dir()
        .map(|d| d.join("sql-erd").join("history"))
        .unwrap_or_else(|| PathBuf::from(".sql_erd_history"));

    let _ = rl.load_history(&history_path);

    println!("sql-erd interactive");
    println!("Paste CREATE TABLE statements, then type .generate (.help for commands)");
    println!();

    loop {
        let prompt = if repl.session.sql().is_empty() {
            "erd> "
        } else {
            " ..> "
        };

        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed.starts_with('.') {
                    let _ = rl.add_history_entry(trimmed);
                    if repl.handle_meta_command(trimmed)? {
                        break;
                    }
                    continue;
                }

                repl.session.push_line(&line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                repl.session.clear();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(parent) = history_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}

struct Repl {
    session: Session,
    config: ErdConfig,
    render_svg: bool,
    svg_path: PathBuf,
}

impl Repl {
    /// Handle REPL meta-commands. Returns true if REPL should exit.
    fn handle_meta_command(&mut self, command: &str) -> Result<bool> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            ".exit" | ".quit" | ".q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            ".help" | ".h" | ".?" => {
                println!("Available commands:");
                println!("  .generate, .g        Build the diagram from the current buffer");
                println!("  .show                Print the current SQL buffer");
                println!("  .clear               Empty the buffer and drop the last diagram");
                println!("  .load <file>         Replace the buffer with a SQL file");
                println!("  .svg on|off          Render SVG on .generate (now: {})", on_off(self.render_svg));
                println!("  .save <file>         Save the last diagram (.mmd, .json, .html, .svg)");
                println!("  .exit, .quit, .q     Exit the REPL");
                println!();
            }
            ".generate" | ".g" => self.generate(),
            ".show" => {
                if self.session.sql().is_empty() {
                    println!("(buffer is empty)");
                } else {
                    print!("{}", self.session.sql());
                }
            }
            ".clear" => {
                self.session.clear();
                println!("Buffer cleared");
            }
            ".load" => match parts.get(1) {
                Some(path) => match read_sql(Path::new(path)) {
                    Ok(sql) => {
                        println!("Loaded {} lines from {}", sql.lines().count(), path);
                        self.session.set_sql(sql);
                    }
                    Err(e) => eprintln!("Error: {:#}", e),
                },
                None => eprintln!("Usage: .load <file>"),
            },
            ".svg" => match parts.get(1).copied() {
                Some("on") => self.render_svg = true,
                Some("off") => self.render_svg = false,
                _ => println!("SVG rendering is {} (usage: .svg on|off)", on_off(self.render_svg)),
            },
            ".save" => match parts.get(1) {
                Some(path) => self.save(Path::new(path))?,
                None => eprintln!("Usage: .save <file>"),
            },
            _ => {
                eprintln!(
                    "Unknown command: {}. Type .help for available commands.",
                    cmd
                );
            }
        }

        Ok(false)
    }

    fn generate(&mut self) {
        let renderer: Option<&dyn Renderer> = if self.render_svg {
            Some(&MermaidCli)
        } else {
            None
        };
        self.generate_with(renderer);
    }

    fn generate_with(&mut self, renderer: Option<&dyn Renderer>) {
        match self.session.generate(&self.config, renderer) {
            Generation::Ignored => println!("Generation already in progress"),
            Generation::Failed => {
                if let Some(message) = self.session.error() {
                    eprintln!("Error: {}", message);
                }
            }
            Generation::Succeeded => {
                if let Some(diagram) = self.session.diagram() {
                    print!("{}", diagram.markup);
                    if let Some(ref svg) = diagram.svg {
                        match fs::write(&self.svg_path, svg) {
                            Ok(()) => println!("SVG written to: {}", self.svg_path.display()),
                            Err(e) => eprintln!(
                                "Error: failed to write {}: {}",
                                self.svg_path.display(),
                                e
                            ),
                        }
                    }
                }
            }
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        let Some(diagram) = self.session.diagram() else {
            eprintln!("Nothing to save yet. Run .generate first.");
            return Ok(());
        };

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or(OutputFormat::Mermaid);

        let content = match format {
            OutputFormat::Mermaid => diagram.markup.clone(),
            OutputFormat::Json => to_json(&diagram.tables),
            OutputFormat::Html => {
                let page = HtmlPage {
                    title: "Entity Relationship Diagram",
                    download_name: &self.config.output.file_name,
                    render: &self.config.render,
                };
                to_html(&diagram.tables, &self.config.markup, &page)
            }
            OutputFormat::Svg => match diagram.svg {
                Some(ref svg) => svg.clone(),
                None => match MermaidCli.render(&diagram.markup, &self.config.render) {
                    Ok(svg) => svg,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return Ok(());
                    }
                },
            },
        };

        match fs::write(path, content) {
            Ok(()) => println!("Saved {} to {}", format, path.display()),
            Err(e) => eprintln!("Error: failed to write {}: {}", path.display(), e),
        }
        Ok(())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use crate::render::RenderConfig;

    struct StaticSvg;

    impl Renderer for StaticSvg {
        fn render(&self, _markup: &str, _config: &RenderConfig) -> Result<String, GenerateError> {
            Ok("<svg></svg>".to_string())
        }
    }

    fn repl(svg_path: PathBuf) -> Repl {
        Repl {
            session: Session::new("CREATE TABLE t (id INT);"),
            config: ErdConfig::default(),
            render_svg: true,
            svg_path,
        }
    }

    #[test]
    fn test_generate_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erd.svg");
        let mut repl = repl(path.clone());

        repl.generate_with(Some(&StaticSvg));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg></svg>");
    }

    #[test]
    fn test_unwritable_svg_path_keeps_repl_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut repl = repl(dir.path().join("missing").join("erd.svg"));

        repl.generate_with(Some(&StaticSvg));
        assert!(repl.session.diagram().is_some());
        let missing = dir.path().join("missing").join("erd.mmd");
        let save = format!(".save {}", missing.display());
        assert!(!repl.handle_meta_command(&save).unwrap());
        assert!(!repl.handle_meta_command(".show").unwrap());
    }

    #[test]
    fn test_exit_commands() {
        let mut repl = repl(PathBuf::from("erd.svg"));
        assert!(repl.handle_meta_command(".quit").unwrap());
        assert!(!repl.handle_meta_command(".clear").unwrap());
        assert!(repl.session.sql().is_empty());
    }
}

use std::{fs, path::Path, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::{Error, Grammar, SetKind};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub tool: Tool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Latex,
    Json,
}

#[derive(Subcommand)]
pub enum Tool {
    /// Eliminate left recursion
    Elf {
        /// Grammar to rewrite
        #[arg(short, long, default_value = "input_original_CFG_left_recursion.txt")]
        input: PathBuf,
        /// Where the rewritten grammar goes
        #[arg(short, long, default_value = "fine_tuned_CFG_left_recursion.txt")]
        output: PathBuf,
    },
    /// Left factor
    Lf {
        /// Grammar to rewrite
        #[arg(short, long, default_value = "input_original_CFG_left_factoring.txt")]
        input: PathBuf,
        /// Where the rewritten grammar goes
        #[arg(short, long, default_value = "fine_tuned_CFG_left_factoring.txt")]
        output: PathBuf,
    },
    /// FIRST sets
    First {
        /// Grammar free of left recursion
        #[arg(short, long, default_value = "fine-tuned_CFG.txt")]
        input: PathBuf,
        #[arg(short, long, default_value = "First_function.txt")]
        output: PathBuf,
    },
    /// FOLLOW sets
    Follow {
        /// Grammar free of left recursion
        #[arg(short, long, default_value = "fine-tuned_CFG.txt")]
        input: PathBuf,
        #[arg(short, long, default_value = "Follow_function.txt")]
        output: PathBuf,
    },
    /// Nullable, FIRST and FOLLOW in one table
    Nff {
        /// Grammar free of left recursion
        #[arg(short, long, default_value = "fine-tuned_CFG.txt")]
        input: PathBuf,
        #[arg(short, long, default_value = "Nullable_First_Follow.txt")]
        output: PathBuf,
    },
}

impl Tool {
    pub fn paths(&self) -> (&Path, &Path) {
        match self {
            Tool::Elf { input, output }
            | Tool::Lf { input, output }
            | Tool::First { input, output }
            | Tool::Follow { input, output }
            | Tool::Nff { input, output } => (input.as_path(), output.as_path()),
        }
    }
}

fn render_productions(g: &Grammar, format: OutputFormat) -> Result<String, Error> {
    let t = g.to_production_output_vec();
    Ok(match format {
        OutputFormat::Plain => t.to_plaintext(),
        OutputFormat::Latex => t.to_latex(),
        OutputFormat::Json => t.to_json()?,
    })
}

fn render_sets(g: &mut Grammar, kind: SetKind, format: OutputFormat) -> Result<String, Error> {
    g.calculate_nullable_first_follow()?;
    let t = g.to_set_output_vec(kind);
    Ok(match format {
        OutputFormat::Plain => t.to_plaintext(),
        OutputFormat::Latex => t.to_latex(),
        OutputFormat::Json => t.to_json()?,
    })
}

/// Applies `tool` to grammar text and renders the result.
pub fn apply(tool: &Tool, format: OutputFormat, input: &str) -> Result<String, Error> {
    let mut g = Grammar::parse(input);

    match tool {
        Tool::Elf { .. } => {
            g.eliminate_left_recursion();
            render_productions(&g, format)
        }
        Tool::Lf { .. } => {
            g.left_factor();
            render_productions(&g, format)
        }
        Tool::First { .. } => render_sets(&mut g, SetKind::First, format),
        Tool::Follow { .. } => render_sets(&mut g, SetKind::Follow, format),
        Tool::Nff { .. } => {
            g.calculate_nullable_first_follow()?;
            let t = g.to_non_terminal_output_vec();
            Ok(match format {
                OutputFormat::Plain => t.to_plaintext(),
                OutputFormat::Latex => t.to_latex(),
                OutputFormat::Json => t.to_json()?,
            })
        }
    }
}

/// Reads the input file, applies the tool and writes the output file.
/// Returns the confirmation message.
pub fn run(cli: &Cli) -> Result<String, Error> {
    let (input, output) = cli.tool.paths();

    let text = fs::read_to_string(input).map_err(|source| Error::InputFile {
        path: input.to_path_buf(),
        source,
    })?;

    let mut rendered = apply(&cli.tool, cli.format, &text)?;
    rendered.push('\n');

    fs::write(output, rendered).map_err(|source| Error::OutputFile {
        path: output.to_path_buf(),
        source,
    })?;

    let what = match cli.tool {
        Tool::Elf { .. } => "Left recursion removed",
        Tool::Lf { .. } => "Left factoring complete",
        Tool::First { .. } => "FIRST sets computed",
        Tool::Follow { .. } => "FOLLOW sets computed",
        Tool::Nff { .. } => "Nullable, FIRST and FOLLOW computed",
    };
    Ok(format!("{}. Output written to {}", what, output.display()))
}

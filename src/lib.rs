extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod cli;
mod error;
mod grammar;
pub use error::Error;
pub use grammar::{FreshNames, Grammar, SetKind};

fn error_to_json(e: &Error) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn eliminate_left_recursion(grammar: &str) -> String {
    let mut g = Grammar::parse(grammar);
    g.eliminate_left_recursion();
    g.to_string()
}

#[wasm_bindgen]
pub fn left_factor(grammar: &str) -> String {
    let mut g = Grammar::parse(grammar);
    g.left_factor();
    g.to_string()
}

fn sets_to_json(grammar: &str, kind: Option<SetKind>) -> Result<String, Error> {
    let mut g = Grammar::parse(grammar);
    g.calculate_nullable_first_follow()?;
    let json = match kind {
        Some(kind) => g.to_set_output_vec(kind).to_json()?,
        None => g.to_non_terminal_output_vec().to_json()?,
    };
    Ok(json)
}

#[wasm_bindgen]
pub fn first_sets_to_json(grammar: &str) -> String {
    sets_to_json(grammar, Some(SetKind::First)).unwrap_or_else(|e| error_to_json(&e))
}

#[wasm_bindgen]
pub fn follow_sets_to_json(grammar: &str) -> String {
    sets_to_json(grammar, Some(SetKind::Follow)).unwrap_or_else(|e| error_to_json(&e))
}

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    sets_to_json(grammar, None).unwrap_or_else(|e| error_to_json(&e))
}

#[cfg(test)]
mod parse_tests {
    use crate::grammar::grammar::EPSILON_INDEX;

    #[test]
    fn simple_parse() {
        let g = crate::Grammar::parse("S -> a");

        let s = g.symbol_table.get("S").unwrap().clone();
        let a = g.symbol_table.get("a").unwrap().clone();

        assert_eq!(g.get_symbol_name(s), "S");
        assert_eq!(g.get_symbol_name(a), "a");
        assert!(g.is_non_terminal(s));
        assert!(!g.is_non_terminal(a));
        assert_eq!(g.start_symbol, Some(s));

        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
    }

    #[test]
    fn simple_parse_with_space() {
        let g = crate::Grammar::parse("  S -> a ");

        let s = g.symbol_table.get("S").unwrap().clone();
        let a = g.symbol_table.get("a").unwrap().clone();

        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
    }

    #[test]
    fn empty_parse() {
        let g = crate::Grammar::parse("  \n  ");
        assert!(g.order.is_empty());
        assert_eq!(g.start_symbol, None);
        assert_eq!(g.to_string(), "");
    }

    #[test]
    fn lines_without_arrow_are_skipped() {
        let g = crate::Grammar::parse("S -> a\n| b c\nnonsense\n\nB -> b");
        assert_eq!(g.to_string(), "S -> a\nB -> b");
    }

    #[test]
    fn bad_left_sides_are_skipped() {
        let g = crate::Grammar::parse("S a S -> x\n-> y\n$ -> z\nepsilon -> w\nS -> a");
        assert_eq!(g.to_string(), "S -> a");
    }

    #[test]
    fn split_on_first_arrow() {
        let g = crate::Grammar::parse("S -> a -> b");
        assert_eq!(g.to_string(), "S -> a -> b");
    }

    #[test]
    fn empty_alternative_is_epsilon() {
        let g = crate::Grammar::parse("A -> a |\nB ->");
        assert_eq!(g.to_string(), "A -> a | ε\nB -> ε");

        let b = g.get_symbol_index("B").unwrap();
        assert_eq!(g.productions(b), &[vec![EPSILON_INDEX]]);
    }

    #[test]
    fn epsilon_spellings() {
        let g = crate::Grammar::parse("A -> epsilon | a ε b | ε ε");
        assert_eq!(g.to_string(), "A -> ε | a b");
    }

    #[test]
    fn forward_reference_is_non_terminal() {
        let g = crate::Grammar::parse("S -> A b\nA -> a");
        assert!(g.is_non_terminal(g.get_symbol_index("A").unwrap()));
        assert!(!g.is_non_terminal(g.get_symbol_index("b").unwrap()));
    }

    #[test]
    fn repeated_left_side_appends() {
        let g = crate::Grammar::parse("A -> a\nB -> c\nA -> b | a");
        assert_eq!(g.to_string(), "A -> a | b\nB -> c");
    }

    #[test]
    fn round_trip() {
        let text = "E -> T E'\nE' -> + T E' | ε\nT -> ( E ) | id";
        let once = crate::Grammar::parse(text).to_string();
        let twice = crate::Grammar::parse(&once).to_string();
        assert_eq!(once, text);
        assert_eq!(twice, once);
    }
}





#[cfg(test)]
mod cli_tests {
    use std::{fs, path::Path, path::PathBuf};

    use clap::Parser;

    use crate::{
        cli::{run, Cli},
        Error,
    };

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("grammar-prep-{}-{}", std::process::id(), name))
    }

    fn run_tool(tool: &str, grammar: &str, extra: &[&str]) -> String {
        let input = temp_path(&format!("{}-in.txt", tool));
        let output = temp_path(&format!("{}-out.txt", tool));
        fs::write(&input, grammar).unwrap();

        let mut args = vec![
            "grammar-prep",
            tool,
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        let cli = Cli::try_parse_from(args).unwrap();

        let message = run(&cli).unwrap();
        assert!(message.contains(output.to_str().unwrap()));

        let result = fs::read_to_string(&output).unwrap();
        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&output);
        result
    }

    #[test]
    fn pipeline() {
        let eliminated = run_tool("elf", "E -> E + T | T\nT -> id\n", &[]);
        assert_eq!(eliminated, "E -> T E'\nE' -> + T E' | ε\nT -> id\n");

        let factored = run_tool("lf", &eliminated, &[]);
        assert_eq!(factored, eliminated);

        let first = run_tool("first", &factored, &[]);
        assert_eq!(first, "E -> { id }\nE' -> { +, ε }\nT -> { id }\n");

        let follow = run_tool("follow", &factored, &[]);
        assert_eq!(follow, "E -> { $ }\nE' -> { $ }\nT -> { $, + }\n");
    }

    #[test]
    fn json_format() {
        let output = run_tool("nff", "S -> a", &["-f", "json"]);
        assert_eq!(
            output,
            "{\"data\":[{\"name\":\"S\",\"nullable\":false,\"first\":[\"a\"],\"follow\":[\"$\"]}]}\n"
        );
    }

    #[test]
    fn default_paths() {
        let cli = Cli::try_parse_from(["grammar-prep", "lf"]).unwrap();
        assert_eq!(
            cli.tool.paths(),
            (
                Path::new("input_original_CFG_left_factoring.txt"),
                Path::new("fine_tuned_CFG_left_factoring.txt")
            )
        );
    }

    #[test]
    fn missing_input() {
        let input = temp_path("does-not-exist.txt");
        let output = temp_path("never-written.txt");
        let cli = Cli::try_parse_from([
            "grammar-prep",
            "first",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        assert!(matches!(run(&cli), Err(Error::InputFile { path, .. }) if path == input));
        assert!(!output.exists());
    }

    #[test]
    fn left_recursive_input_fails() {
        let input = temp_path("recursive-in.txt");
        let output = temp_path("recursive-out.txt");
        fs::write(&input, "A -> A a | b").unwrap();
        let cli = Cli::try_parse_from([
            "grammar-prep",
            "follow",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        assert!(matches!(run(&cli), Err(Error::LeftRecursion(_))));
        let _ = fs::remove_file(&input);
    }

    #[test]
    fn unwritable_output() {
        let input = temp_path("unwritable-in.txt");
        let output = temp_path("missing-dir").join("out.txt");
        fs::write(&input, "S -> a").unwrap();
        let cli = Cli::try_parse_from([
            "grammar-prep",
            "elf",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let result = run(&cli);
        let _ = fs::remove_file(&input);
        assert!(matches!(result, Err(Error::OutputFile { path, .. }) if path == output));
    }
}

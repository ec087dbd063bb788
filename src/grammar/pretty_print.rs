use std::{borrow::Cow, fmt};

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        format!(
            "{} -> {}",
            self.left,
            self.rights
                .iter()
                .map(|right| right.join(" "))
                .collect::<Vec<_>>()
                .join(" | ")
        )
    }

    pub fn to_latex(&self) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = format!("{} & \\rightarrow &", escape::tex(self.left));
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| latex_symbol(s, "\\epsilon"))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        left + &right
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.productions
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .map(|nt| ProductionOutput {
                left: nt.name.as_str(),
                rights: nt
                    .productions
                    .iter()
                    .map(|production| self.production_to_vec_str(production))
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_production_output_vec().to_plaintext())
    }
}

/// Escapes one symbol. Epsilon is matched as a whole symbol only.
fn latex_symbol<'a>(s: &'a str, epsilon: &'a str) -> Cow<'a, str> {
    if s == EPSILON {
        Cow::Borrowed(epsilon)
    } else {
        escape::tex(s)
    }
}

fn latex_symbols(a: &[&str]) -> String {
    a.iter()
        .map(|s| latex_symbol(s, r"$\epsilon$"))
        .collect::<Vec<_>>()
        .join(r"\ ")
}

/// Which set a `SetOutputVec` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetKind {
    First,
    Follow,
}

impl SetKind {
    fn title(self) -> &'static str {
        match self {
            SetKind::First => "First",
            SetKind::Follow => "Follow",
        }
    }
}

#[derive(Serialize)]
struct SetOutput<'a> {
    name: &'a str,
    set: Vec<&'a str>,
}

impl SetOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!("{} -> {{ {} }}", self.name, self.set.join(", "))
    }
    fn to_latex(&self) -> String {
        format!(
            "{} & \\{{ {} \\}}",
            escape::tex(self.name),
            latex_symbols(&self.set)
        )
    }
}

#[derive(Serialize)]
pub struct SetOutputVec<'a> {
    #[serde(skip)]
    kind: SetKind,
    data: Vec<SetOutput<'a>>,
}

impl SetOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|l}\n".to_string()
            + &format!("Symbol & {}\\\\\\hline\n", self.kind.title())
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }
    fn to_latex(&self) -> String {
        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            latex_symbols(&self.first),
            latex_symbols(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    /// FIRST sets, sorted, with epsilon last for nullable nonterminals.
    fn sorted_first(&self, idx: usize) -> Vec<&str> {
        let Some(nt) = self.symbols[idx].non_terminal() else {
            return Vec::new();
        };
        let mut first: Vec<&str> = nt.first.iter().map(|i| self.get_symbol_name(*i)).collect();
        first.sort();
        if nt.nullable {
            first.push(EPSILON);
        }
        first
    }

    fn sorted_follow(&self, idx: usize) -> Vec<&str> {
        let Some(nt) = self.symbols[idx].non_terminal() else {
            return Vec::new();
        };
        let mut follow: Vec<&str> = nt.follow.iter().map(|i| self.get_symbol_name(*i)).collect();
        follow.sort();
        follow
    }

    pub fn to_set_output_vec(&self, kind: SetKind) -> SetOutputVec {
        let data = self
            .non_terminal_iter()
            .map(|nt| SetOutput {
                name: nt.name.as_str(),
                set: match kind {
                    SetKind::First => self.sorted_first(nt.index),
                    SetKind::Follow => self.sorted_follow(nt.index),
                },
            })
            .collect();
        SetOutputVec { kind, data }
    }

    pub fn to_non_terminal_output_vec(&self) -> NonTerminalOutputVec {
        let data = self
            .non_terminal_iter()
            .map(|nt| NonTerminalOutput {
                name: nt.name.as_str(),
                nullable: nt.nullable,
                first: self.sorted_first(nt.index),
                follow: self.sorted_follow(nt.index),
            })
            .collect();
        NonTerminalOutputVec { data }
    }
}

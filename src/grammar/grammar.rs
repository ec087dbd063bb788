use std::collections::{HashMap, HashSet};

use super::{END_MARK, EPSILON, EPSILON_WORD};

pub const EPSILON_INDEX: usize = 0;
pub const END_MARK_INDEX: usize = 1;

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub first: HashSet<usize>,
    pub follow: HashSet<usize>,
    pub nullable: bool,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            first: HashSet::new(),
            follow: HashSet::new(),
            nullable: false,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Symbol {
    Epsilon,
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            _ => None,
        }
    }

    pub fn mut_non_terminal(&mut self) -> Option<&mut NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            _ => None,
        }
    }
}

/// A grammar with interned symbols.
///
/// `order` lists the nonterminals in declaration order; generated nonterminals
/// are placed after the one they were derived from. Every ordered operation
/// (left recursion elimination, serialization, reports) walks this list.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub symbols: Vec<Symbol>,
    pub symbol_table: HashMap<String, usize>,
    pub order: Vec<usize>,
    pub start_symbol: Option<usize>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        let mut g = Self {
            symbols: vec![Symbol::Epsilon],
            symbol_table: HashMap::new(),
            order: Vec::new(),
            start_symbol: None,
        };

        g.symbol_table.insert(EPSILON.to_string(), EPSILON_INDEX);
        g.symbol_table.insert(EPSILON_WORD.to_string(), EPSILON_INDEX);
        g.add_terminal(END_MARK.to_string());

        g
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.order
            .iter()
            .filter_map(move |&idx| self.symbols[idx].non_terminal())
    }

    pub fn non_terminal_iter_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.symbols.iter_mut().filter_map(|s| s.mut_non_terminal())
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn is_non_terminal(&self, index: usize) -> bool {
        matches!(self.symbols[index], Symbol::NonTerminal(_))
    }

    pub fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.push_non_terminal(name);
        self.order.push(idx);
        idx
    }

    /// Adds a nonterminal and places it right after `anchor` in `order`.
    pub fn insert_non_terminal_after(&mut self, anchor: usize, name: &str) -> usize {
        let idx = self.push_non_terminal(name);
        match self.order.iter().position(|&i| i == anchor) {
            Some(pos) => self.order.insert(pos + 1, idx),
            None => self.order.push(idx),
        }
        idx
    }

    fn push_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    /// Appends an alternative, normalizing epsilon and skipping duplicates.
    pub fn add_production(&mut self, left: usize, right: Vec<usize>) {
        let right = concat_production(&[], &right);
        if let Some(nt) = self.symbols[left].mut_non_terminal() {
            if !nt.productions.contains(&right) {
                nt.productions.push(right);
            }
        }
    }

    pub fn productions(&self, non_terminal: usize) -> &[Vec<usize>] {
        self.symbols[non_terminal]
            .non_terminal()
            .map(|nt| nt.productions.as_slice())
            .unwrap_or(&[])
    }

    pub fn take_productions(&mut self, non_terminal: usize) -> Vec<Vec<usize>> {
        self.symbols[non_terminal]
            .mut_non_terminal()
            .map(|nt| std::mem::take(&mut nt.productions))
            .unwrap_or_default()
    }

    pub fn set_productions(&mut self, non_terminal: usize, productions: Vec<Vec<usize>>) {
        if let Some(nt) = self.symbols[non_terminal].mut_non_terminal() {
            nt.productions = productions;
        }
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        match &self.symbols[index] {
            Symbol::Epsilon => EPSILON,
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }

    pub fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        production
            .iter()
            .map(|idx| self.get_symbol_name(*idx))
            .collect()
    }

    pub fn get_symbol_prime_name(&self, mut name: String) -> String {
        while self.symbol_table.contains_key(&name) {
            name.push('\'');
        }
        name
    }
}

/// Concatenates two symbol sequences. Epsilon is the identity: it disappears
/// from the result unless the result would otherwise be empty.
pub fn concat_production(prefix: &[usize], suffix: &[usize]) -> Vec<usize> {
    let production: Vec<usize> = prefix
        .iter()
        .chain(suffix.iter())
        .filter(|&&idx| idx != EPSILON_INDEX)
        .cloned()
        .collect();
    if production.is_empty() {
        vec![EPSILON_INDEX]
    } else {
        production
    }
}

pub fn push_unique(productions: &mut Vec<Vec<usize>>, production: Vec<usize>) {
    if !productions.contains(&production) {
        productions.push(production);
    }
}

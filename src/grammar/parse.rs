use crate::Grammar;

impl Grammar {
    /// Reads `NonTerminal -> alt1 | alt2 | ...` lines.
    ///
    /// Lines without `->`, or whose left side is not a single fresh or
    /// nonterminal name, are skipped. Every left side is declared before any
    /// right side is read, so the terminal/nonterminal split does not depend
    /// on line order.
    pub fn parse(grammar: &str) -> Self {
        let mut g = Self::new();

        let mut raw_productions: Vec<(usize, &str)> = Vec::new();

        for line in grammar.lines() {
            let Some((left_str, rights)) = line.split_once("->") else {
                continue;
            };
            let left_str = left_str.trim();
            if left_str.is_empty() || left_str.split_whitespace().count() != 1 {
                continue;
            }
            let left = match g.get_symbol_index(left_str) {
                Some(idx) if g.is_non_terminal(idx) => idx,
                Some(_) => continue,
                None => g.add_non_terminal(left_str),
            };

            raw_productions.push((left, rights));
        }

        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let symbols = right
                    .split_whitespace()
                    .map(|s| match g.get_symbol_index(s) {
                        Some(idx) => idx,
                        None => g.add_terminal(s.to_string()),
                    })
                    .collect();
                g.add_production(left, symbols);
            }
        }

        g.start_symbol = g.order.first().cloned();

        g
    }
}
